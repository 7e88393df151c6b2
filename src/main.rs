use anyhow::Result;
use tasktime::commands::Cli;
use tasktime::libs::logging;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    Cli::menu().await
}
