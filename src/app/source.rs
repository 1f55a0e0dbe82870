// CurveLens - app/source.rs
//
// Transport seam for curve metadata, plus the cooperative cancellation token
// handed to every fetch.

use crate::core::model::CurveMetadata;
use crate::util::error::FetchError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between the requester and the
/// transport. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the transport to abort. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// `Err(FetchError::Cancelled)` once cancelled, for use with `?`.
    pub fn check(&self) -> Result<(), FetchError> {
        if self.is_cancelled() {
            Err(FetchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A transport that can list the curve metadata of one log.
///
/// Implementations are called from a background thread. They should observe
/// `cancel` and return `FetchError::Cancelled` promptly once it is set; any
/// result returned after cancellation is discarded by the caller anyway.
pub trait CurveMetadataSource: Send + Sync {
    fn fetch_curve_metadata(
        &self,
        well_uid: &str,
        wellbore_uid: &str,
        log_uid: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<CurveMetadata>, FetchError>;
}
