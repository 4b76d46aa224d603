use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    lp_apr::start(std::env::args()).await
}
