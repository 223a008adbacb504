use std::process::ExitCode;

use git_fogbugz::{cli, ui};

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(code) => code,
        Err(err) => {
            ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
