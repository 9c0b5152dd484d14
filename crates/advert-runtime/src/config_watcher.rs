//! Applies published configuration snapshots to the running broadcaster.

use std::sync::Arc;

use advert_core::{AdvertBroadcaster, AdvertConfig};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::scheduler::Scheduler;

/// Swap in `config` and restart the timer with its interval.
///
/// The broadcaster state is updated first, so the next firing already sees
/// the new rotation. A snapshot with an unusable interval still replaces the
/// rotation but leaves the previous timer running.
pub fn apply_snapshot(
    broadcaster: &AdvertBroadcaster,
    scheduler: &Scheduler,
    config: Arc<AdvertConfig>,
) {
    let period = config.period();
    broadcaster.apply_config(config);

    match period {
        Ok(period) => match scheduler.restart(period) {
            Ok(()) => info!(?period, "Advert timer restarted"),
            Err(e) => error!(error = %e, "Failed to restart advert timer"),
        },
        Err(e) => error!(error = %e, "Keeping previous advert timer"),
    }
}

/// Spawn the task that follows config changes until cancelled.
pub fn spawn_config_watcher(
    mut updates: watch::Receiver<Arc<AdvertConfig>>,
    broadcaster: Arc<AdvertBroadcaster>,
    scheduler: Arc<Scheduler>,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    // Only changes published after this point matter.
    updates.borrow_and_update();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = cancel_token.cancelled() => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        debug!("Config provider closed");
                        break;
                    }
                    let config = Arc::clone(&updates.borrow_and_update());
                    apply_snapshot(&broadcaster, &scheduler, config);
                }
            }
        }
        debug!("Config watcher task stopped");
    })
}
