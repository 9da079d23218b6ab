use anyhow::Result;

mod cli;
mod echoenv;

#[tokio::main]
async fn main() -> Result<()> {
    let (port, verbosity) = cli::start()?;

    cli::telemetry::init(verbosity)?;

    echoenv::new(port).await
}
