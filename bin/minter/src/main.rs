use std::process::ExitCode;

use dotenv::dotenv;
mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
