use crate::config::Config;
use crate::db::Store;

pub async fn cmd_promote(config: &Config, username: &str, revoke: bool) -> anyhow::Result<()> {
    let store = Store::with_pool_options(&config.database.connection_url(), 1, 1).await?;

    if store.set_user_admin(username, !revoke).await? {
        if revoke {
            println!("✓ {username} is no longer an admin");
        } else {
            println!("✓ {username} is now an admin");
        }
        println!("The change applies from the user's next login.");
    } else {
        println!("User '{username}' not found.");
    }

    Ok(())
}
