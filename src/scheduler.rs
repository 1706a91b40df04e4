use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tracing::{error, info};

use crate::config::SchedulerConfig;
use crate::services::SuggestionService;

/// Background housekeeping for the API process.
///
/// Expired suggestion cache rows are never served, but nothing else removes
/// them; this loop does.
pub struct Scheduler {
    suggestions: Arc<SuggestionService>,
    config: SchedulerConfig,
    running: Arc<RwLock<bool>>,
}

impl Scheduler {
    #[must_use]
    pub fn new(suggestions: Arc<SuggestionService>, config: SchedulerConfig) -> Self {
        Self {
            suggestions,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Scheduler is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;

        let interval_mins = self.config.cache_prune_interval_minutes;
        info!("Scheduler pruning suggestion cache every {} minutes", interval_mins);

        let mut prune_interval = interval(Duration::from_secs(interval_mins * 60));

        loop {
            prune_interval.tick().await;
            if !*self.running.read().await {
                break;
            }
            if let Err(e) = self.run_once().await {
                error!("Scheduled cache prune failed: {}", e);
            }
        }

        Ok(())
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }

    pub async fn run_once(&self) -> Result<u64> {
        self.suggestions.prune_expired().await
    }
}
