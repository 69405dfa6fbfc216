use tracing::{info, warn};

use super::source::FetchError;
use crate::level::Level;
use crate::model::LocationSelection;

/// Receives the externally visible outcomes of the selector.
///
/// Hooks are fire-and-forget: they run after the state transition has been
/// applied and cannot influence it.
pub trait SelectorObserver: Send + Sync {
    /// Called once per accepted submission with the selection as it was
    /// before the reset.
    fn on_submit(&self, selection: &LocationSelection);

    fn on_fetch_error(&self, level: Level, error: &FetchError);
}

/// Logs every outcome through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SelectorObserver for TracingObserver {
    fn on_submit(&self, selection: &LocationSelection) {
        info!(
            country = %selection.country,
            state = %selection.state,
            district = %selection.district,
            city = %selection.city,
            "location submitted"
        );
    }

    fn on_fetch_error(&self, level: Level, error: &FetchError) {
        warn!(%level, %error, retryable = error.is_retryable(), "failed to fetch options");
    }
}
