use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    Store::with_pool_options(&config.database.connection_url(), 1, 1).await?;
    println!("✓ Database schema is up to date");
    Ok(())
}
