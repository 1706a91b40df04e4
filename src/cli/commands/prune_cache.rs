use chrono::Utc;

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_prune_cache(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let removed = store.suggestion_cache().delete_expired(Utc::now()).await?;

    if removed == 0 {
        println!("No expired suggestion cache entries.");
    } else {
        println!("Removed {removed} expired suggestion cache entries.");
    }
    Ok(())
}
