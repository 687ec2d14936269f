use std::sync::Arc;
use std::sync::Once;
use std::time::Duration;

use arc_swap::ArcSwap;
use log::{error, warn};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::backup::BackupStore;
use crate::builder::Options;
use crate::constants::BACKUP_FORMAT_VERSION;
use crate::errors::{ClientError, ErrorKind};
use crate::fetch::fetcher::{FetchResponse, Fetcher};
use crate::model::toggle::{snapshot_from_json, Snapshot};
use crate::modes::PollingMode;
use crate::utils::sha1;

struct ServiceState {
    fetcher: Fetcher,
    snapshot: ArcSwap<Snapshot>,
    backup_key: String,
    // Serializes fetch/fallback cycles so a tick firing during a slow cycle
    // cannot race with it on publishing the snapshot.
    cycle_lock: tokio::sync::Mutex<()>,
}

pub struct ToggleService {
    state: Arc<ServiceState>,
    options: Arc<Options>,
    cancellation_token: CancellationToken,
    close: Once,
}

impl ToggleService {
    pub fn new(opts: Arc<Options>) -> Result<Self, ClientError> {
        let fetcher = Fetcher::new(opts.source_url(), opts.headers(), *opts.http_timeout())?;
        Ok(Self {
            state: Arc::new(ServiceState {
                backup_key: sha1(
                    format!(
                        "{source_url}_{BACKUP_FORMAT_VERSION}",
                        source_url = opts.source_url()
                    )
                    .as_str(),
                ),
                fetcher,
                snapshot: ArcSwap::from_pointee(Snapshot::default()),
                cycle_lock: tokio::sync::Mutex::new(()),
            }),
            options: opts,
            cancellation_token: CancellationToken::new(),
            close: Once::new(),
        })
    }

    /// Runs the first fetch/fallback cycle, then starts the poll task when
    /// auto polling is configured. The cycle's outcome does not fail the
    /// startup, the client stays queryable on whatever snapshot got published.
    pub async fn start(&self) {
        _ = run_cycle(&self.state, &self.options).await;
        if let PollingMode::AutoPoll(interval) = self.options.polling_mode() {
            self.start_poll(*interval);
        }
    }

    pub async fn refresh(&self) -> Result<(), ClientError> {
        run_cycle(&self.state, &self.options).await
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.snapshot.load_full()
    }

    pub fn close(&self) {
        self.close.call_once(|| self.cancellation_token.cancel());
    }

    fn start_poll(&self, interval: Duration) {
        let state = Arc::clone(&self.state);
        let opts = Arc::clone(&self.options);
        let token = self.cancellation_token.clone();

        tokio::spawn(async move {
            // The first cycle already ran during initialization, delay the
            // first tick by a full interval. Ticks elapsing while a cycle is
            // still running are skipped, not queued.
            let mut int =
                tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            int.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = int.tick() => {
                        _ = run_cycle(&state, &opts).await;
                    },
                    _ = token.cancelled() => break
                }
            }
        });
    }
}

impl Drop for ToggleService {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_cycle(state: &Arc<ServiceState>, options: &Arc<Options>) -> Result<(), ClientError> {
    let _cycle = state.cycle_lock.lock().await;

    match state.fetcher.fetch().await {
        FetchResponse::Fetched(snapshot) => {
            if let Some(backup) = options.backup() {
                backup.write(&state.backup_key, snapshot.payload());
            }
            state.snapshot.store(Arc::new(snapshot));
            if let Some(callback) = options.on_update() {
                callback();
            }
            Ok(())
        }
        FetchResponse::Failed(err) => {
            match options.backup() {
                Some(backup) => {
                    let restored = load_backup(backup, &state.backup_key);
                    let notify = options.notify_on_fallback() && restored.is_some();
                    state.snapshot.store(Arc::new(restored.unwrap_or_default()));
                    if notify {
                        if let Some(callback) = options.on_update() {
                            callback();
                        }
                    }
                }
                None => {
                    warn!(event_id = ErrorKind::BackupUnavailable.as_u8(); "No backup store is configured, the current toggle snapshot is left unchanged.");
                }
            }
            Err(err)
        }
    }
}

fn load_backup(backup: &dyn BackupStore, key: &str) -> Option<Snapshot> {
    let Some(payload) = backup.read(key) else {
        warn!(event_id = ErrorKind::BackupUnavailable.as_u8(); "The backup store returned no data, publishing the empty snapshot.");
        return None;
    };
    match snapshot_from_json(payload.as_str()) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            error!(event_id = ErrorKind::InvalidBackupContent.as_u8(); "The backup content could not be decoded, publishing the empty snapshot. {err}");
            None
        }
    }
}
