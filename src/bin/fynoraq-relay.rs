use anyhow::Result;
use fynoraq::config::RelayConfig;
use fynoraq::relay;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = RelayConfig::from_env()?;
    relay::serve(config).await?;
    Ok(())
}
