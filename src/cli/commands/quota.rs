use crate::api::QuotaStatusDto;
use crate::config::Config;
use crate::db::Store;
use crate::domain::QuotaTier;
use crate::services::QuotaService;

fn print_status(user_id: &str, status: &QuotaStatusDto) {
    println!("Quota for {user_id}:");
    println!("{:-<40}", "");
    println!("  Tier:      {}", status.tier);
    println!("  Used:      {} / {}", status.current_count, status.limit);
    println!("  Remaining: {}", status.remaining);
    println!(
        "  Allowed:   {}",
        if status.allowed { "yes" } else { "no" }
    );
}

pub async fn cmd_quota(
    config: &Config,
    user_id: &str,
    tier: Option<QuotaTier>,
    reset: bool,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let quota = QuotaService::new(store);

    let mut status = quota.check_user(user_id).await?;
    if let Some(tier) = tier {
        status = quota.set_tier(user_id, tier).await?;
        println!("✓ Tier set to {tier}");
    }
    if reset {
        status = quota.reset(user_id).await?;
        println!("✓ Generation count reset");
    }

    print_status(user_id, &status);
    Ok(())
}
