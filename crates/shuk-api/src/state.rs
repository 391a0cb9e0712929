use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::task::JoinError;
use tracing::{debug, warn};

use shuk_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// HS256 secret shared with the identity provider that signs tokens.
    pub jwt_secret: String,
    /// Upper bound on any single database call made by a handler.
    pub request_timeout: Duration,
}

impl AppStateInner {
    pub fn new(db: Database, jwt_secret: String, request_timeout: Duration) -> AppState {
        Arc::new(Self {
            db,
            jwt_secret,
            request_timeout,
        })
    }
}

/// Run blocking database work off the async runtime, bounded by the
/// configured request timeout. Failures are mapped to the API taxonomy;
/// `action` is the message a caller sees on a persistence failure.
pub async fn run_db<F, T>(state: &AppState, action: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db_state = state.clone();
    let task = tokio::task::spawn_blocking(move || f(&db_state.db));

    match tokio::time::timeout(state.request_timeout, task).await {
        Err(_) => {
            warn!("{} timed out after {:?}", action, state.request_timeout);
            Err(ApiError::Timeout)
        }
        Ok(joined) => finish(action, joined),
    }
}

const PENDING: u8 = 0;
const STARTED: u8 = 1;
const ABANDONED: u8 = 2;

/// Decides, exactly once, whether a write runs or is abandoned.
#[derive(Debug, Clone, Default)]
pub struct WriteClaim(Arc<AtomicU8>);

impl WriteClaim {
    /// Called by the write once it holds the connection. `false` means the
    /// caller already gave up and nothing may be written.
    pub fn start(&self) -> bool {
        self.transition(STARTED)
    }

    fn abandon(&self) -> bool {
        self.transition(ABANDONED)
    }

    fn transition(&self, to: u8) -> bool {
        self.0
            .compare_exchange(PENDING, to, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Like `run_db`, for writes. The timeout only covers the wait for the
/// connection: a write that has not started by the deadline never runs,
/// and one that has started is awaited to completion, so a `Timeout`
/// always means nothing was stored.
///
/// `f` must call `WriteClaim::start` under the connection lock and return
/// `Ok(None)` when it is refused.
pub async fn run_db_write<F, T>(state: &AppState, action: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database, &WriteClaim) -> anyhow::Result<Option<T>> + Send + 'static,
    T: Send + 'static,
{
    let claim = WriteClaim::default();
    let task_claim = claim.clone();
    let db_state = state.clone();
    let mut task = tokio::task::spawn_blocking(move || f(&db_state.db, &task_claim));

    let joined = match tokio::time::timeout(state.request_timeout, &mut task).await {
        Ok(joined) => joined,
        Err(_) if claim.abandon() => {
            warn!("{} timed out after {:?} before starting", action, state.request_timeout);
            return Err(ApiError::Timeout);
        }
        Err(_) => {
            debug!("{} passed its deadline mid-write; waiting for it", action);
            task.await
        }
    };

    finish(action, joined)?.ok_or(ApiError::Timeout)
}

fn finish<T>(action: &'static str, joined: Result<anyhow::Result<T>, JoinError>) -> Result<T, ApiError> {
    match joined {
        Err(join) => Err(ApiError::persistence(action, anyhow::Error::new(join))),
        Ok(result) => result.map_err(|e| ApiError::persistence(action, e)),
    }
}
