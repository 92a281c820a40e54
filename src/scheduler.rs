//! Recurring maturation scheduler.
//!
//! An explicit component owning the scan loop: constructed with the database
//! handle and settings, started by the process lifecycle, stopped on
//! shutdown. Each tick awaits a full maturation pass before the next one can
//! fire, so passes never overlap. A failed pass is logged and the schedule
//! continues.

use crate::{config::settings::AppSettings, core::maturation};
use sea_orm::DatabaseConnection;
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, error, info};

/// Owns the recurring maturation pass over a database connection.
pub struct MaturationScheduler {
    db: DatabaseConnection,
    settings: AppSettings,
}

/// Handle to a running scheduler; dropping it stops the loop.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MaturationScheduler {
    /// Creates a scheduler over the given connection and settings. The scan
    /// interval comes from `settings.scan_interval_secs`.
    #[must_use]
    pub fn new(db: DatabaseConnection, settings: AppSettings) -> Self {
        Self { db, settings }
    }

    /// Spawns the scan loop and returns its handle.
    ///
    /// The first pass runs immediately; subsequent passes run once per
    /// interval. Pass failures are logged and never stop the schedule.
    #[must_use]
    pub fn start(self) -> SchedulerHandle {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let period = Duration::from_secs(self.settings.scan_interval_secs.max(1));
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!("Maturation scheduler running every {period:?}");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match maturation::run_maturation_pass(&self.db, &self.settings).await {
                            Ok(result) if result.matured.is_empty() => {
                                debug!("Maturation pass found no due investments");
                            }
                            Ok(result) => {
                                info!("{}", maturation::format_maturation_summary(&result));
                            }
                            Err(e) => {
                                error!("Maturation pass failed: {e}");
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!("Maturation scheduler stopping");
                        break;
                    }
                }
            }
        });

        SchedulerHandle { shutdown, task }
    }
}

impl SchedulerHandle {
    /// Signals the loop to stop and waits for it to finish. A pass already
    /// in flight runs to completion first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::investment;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_start_and_stop() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let settings = test_settings();

        let handle = MaturationScheduler::new(db, settings).start();
        handle.stop().await;

        Ok(())
    }

    #[tokio::test]
    async fn test_due_investment_matured_by_first_tick() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let settings = test_settings();
        create_test_wallet(&db).await?;
        let user = create_test_user(&db, "+15550001").await?;

        let confirmed = confirmed_investment(&db, &user, 500.0).await?;
        backdate_completion(&db, confirmed.id, 1).await?;

        let handle = MaturationScheduler::new(db.clone(), settings).start();

        // The first tick fires immediately; give the pass a moment to commit
        tokio::time::sleep(Duration::from_millis(500)).await;
        handle.stop().await;

        let done = investment::get_investment_by_id(&db, confirmed.id)
            .await?
            .unwrap();
        assert!(done.is_completed);
        assert_eq!(done.final_amount, Some(1000.0));

        Ok(())
    }
}
