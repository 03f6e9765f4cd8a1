//! Periodic purge of expired password resets.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info};

use lenslocked_core::config::AuthConfig;
use lenslocked_core::result::AppResult;

use super::store::PasswordResetStore;

/// Background task deleting expired reset rows on a fixed interval.
#[derive(Debug, Clone)]
pub struct ResetCleanup {
    store: Arc<PasswordResetStore>,
    interval: Duration,
}

impl ResetCleanup {
    /// Creates a cleanup task using `reset_cleanup_interval_minutes`.
    /// A zero interval is treated as one minute.
    pub fn new(store: Arc<PasswordResetStore>, config: &AuthConfig) -> Self {
        let minutes = config.reset_cleanup_interval_minutes.max(1);
        Self::with_interval(store, Duration::from_secs(minutes * 60))
    }

    /// Creates a cleanup task with an explicit interval.
    pub fn with_interval(store: Arc<PasswordResetStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Runs one purge cycle.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let purged = self.store.purge_expired().await?;
        if purged > 0 {
            info!(purged, "Expired password resets purged");
        } else {
            debug!("No expired password resets");
        }
        Ok(purged)
    }

    /// Purge on every tick until `cancel` flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Password reset cleanup started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cleanup().await {
                        error!(error = %e, "Password reset cleanup failed");
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Password reset cleanup shutting down");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lenslocked_database::{MemoryDatabase, PasswordResetRepository, UserRepository};
    use lenslocked_entity::user::CreateUser;

    use crate::token::TokenManager;

    async fn seeded() -> (MemoryDatabase, Arc<PasswordResetStore>) {
        let db = MemoryDatabase::new();
        let config = AuthConfig::default();
        let store = Arc::new(PasswordResetStore::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            TokenManager::new(&config),
            &config,
        ));
        let user = UserRepository::create(
            &db,
            &CreateUser {
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();
        PasswordResetRepository::upsert(
            &db,
            user.id,
            "stale",
            Utc::now() - chrono::Duration::minutes(1),
        )
        .await
        .unwrap();
        (db, store)
    }

    #[tokio::test]
    async fn test_run_cleanup_purges() {
        let (db, store) = seeded().await;
        let cleanup = ResetCleanup::new(store, &AuthConfig::default());
        assert_eq!(cleanup.run_cleanup().await.unwrap(), 1);
        assert_eq!(cleanup.run_cleanup().await.unwrap(), 0);
        assert_eq!(db.reset_count().await, 0);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancel() {
        let (db, store) = seeded().await;
        let cleanup = ResetCleanup::with_interval(store, Duration::from_millis(10));
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { cleanup.run(rx).await });
        time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(db.reset_count().await, 0);
    }
}
