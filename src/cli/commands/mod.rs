mod migrate;
mod prune_cache;
mod quota;

pub use migrate::cmd_migrate;
pub use prune_cache::cmd_prune_cache;
pub use quota::cmd_quota;
