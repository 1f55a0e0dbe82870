// CurveLens - app/fetch.rs
//
// Cancel-on-supersede fetch lifecycle for curve metadata.
//
// Architecture:
//   - `FetchManager` lives on the UI thread; each fetch runs on its own
//     background thread and reports back over a single mpsc channel.
//   - Every fetch is tagged with a generation number. Starting a new fetch
//     bumps the generation and cancels the previous token.
//   - `poll` only delivers messages whose generation is the latest. Anything
//     older is dropped and counted, whatever its outcome.
//   - `FetchError::Cancelled` from the current generation is also dropped:
//     cancellation is never surfaced as a failure.

use crate::app::source::{CancelToken, CurveMetadataSource};
use crate::core::model::{CurveMetadata, LogSelection};
use crate::util::error::FetchError;
use std::sync::{mpsc, Arc};

/// Completed fetch for the current generation.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The transport returned the curve list for `selection`.
    Loaded {
        selection: LogSelection,
        curves: Vec<CurveMetadata>,
    },

    /// The transport failed for `selection`. Never `FetchError::Cancelled`.
    Failed {
        selection: LogSelection,
        error: FetchError,
    },
}

/// Message sent from a fetch thread back to the manager.
struct FetchMessage {
    generation: u64,
    selection: LogSelection,
    result: Result<Vec<CurveMetadata>, FetchError>,
}

/// The single live fetch, if any.
struct ActiveFetch {
    generation: u64,
    cancel: CancelToken,
}

/// Manages curve-metadata fetches so that exactly one is live at a time.
pub struct FetchManager {
    source: Arc<dyn CurveMetadataSource>,
    tx: mpsc::Sender<FetchMessage>,
    rx: mpsc::Receiver<FetchMessage>,
    generation: u64,
    active: Option<ActiveFetch>,
    discarded: usize,
}

impl FetchManager {
    pub fn new(source: Arc<dyn CurveMetadataSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            generation: 0,
            active: None,
            discarded: 0,
        }
    }

    /// Start fetching the curves of `selection`, cancelling any fetch still in
    /// flight. Returns the generation assigned to the new fetch.
    pub fn start(&mut self, selection: LogSelection) -> u64 {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        let cancel = CancelToken::new();
        self.active = Some(ActiveFetch {
            generation,
            cancel: cancel.clone(),
        });

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let log = selection.key();

        std::thread::spawn(move || {
            let result = source.fetch_curve_metadata(
                &selection.well.uid,
                &selection.wellbore.uid,
                &selection.log.uid,
                &cancel,
            );
            // Receiver gone means the view was dropped; nothing to report to.
            let _ = tx.send(FetchMessage {
                generation,
                selection,
                result,
            });
        });

        tracing::debug!(generation, log = %log, "Curve metadata fetch started");
        generation
    }

    /// Cancel the live fetch, if any. Its eventual result will be dropped.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            tracing::debug!(generation = active.generation, "Curve metadata fetch cancelled");
        }
    }

    /// True while a fetch for the current generation has not reported back.
    pub fn is_in_flight(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the most recently started fetch (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of results dropped because a newer fetch had superseded them.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Drain completed fetches without blocking.
    ///
    /// Returns at most one outcome per call in practice, since only the live
    /// generation is ever delivered.
    pub fn poll(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();

        while let Ok(msg) = self.rx.try_recv() {
            let live = self
                .active
                .as_ref()
                .is_some_and(|a| a.generation == msg.generation);

            if !live {
                self.discarded += 1;
                tracing::debug!(
                    generation = msg.generation,
                    current = self.generation,
                    log = %msg.selection.key(),
                    "Dropping result of superseded fetch"
                );
                continue;
            }

            self.active = None;

            match msg.result {
                Ok(curves) => {
                    tracing::info!(
                        generation = msg.generation,
                        log = %msg.selection.key(),
                        curves = curves.len(),
                        "Curve metadata loaded"
                    );
                    outcomes.push(FetchOutcome::Loaded {
                        selection: msg.selection,
                        curves,
                    });
                }
                Err(error) if error.is_cancelled() => {
                    tracing::debug!(generation = msg.generation, "Fetch reported cancellation");
                }
                Err(error) => {
                    tracing::warn!(
                        generation = msg.generation,
                        log = %msg.selection.key(),
                        error = %error,
                        "Curve metadata fetch failed"
                    );
                    outcomes.push(FetchOutcome::Failed {
                        selection: msg.selection,
                        error,
                    });
                }
            }
        }

        outcomes
    }
}

impl Drop for FetchManager {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LogObject, WellRef, WellboreRef};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Source that returns one curve named after the requested log, or the
    /// error configured for that log.
    struct EchoSource {
        fail_log: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl CurveMetadataSource for EchoSource {
        fn fetch_curve_metadata(
            &self,
            _well_uid: &str,
            _wellbore_uid: &str,
            log_uid: &str,
            cancel: &CancelToken,
        ) -> Result<Vec<CurveMetadata>, FetchError> {
            self.calls.lock().unwrap().push(log_uid.to_string());
            cancel.check()?;
            if self.fail_log.as_deref() == Some(log_uid) {
                return Err(FetchError::Transport {
                    log_uid: log_uid.to_string(),
                    reason: "boom".to_string(),
                });
            }
            Ok(vec![CurveMetadata {
                uid: log_uid.to_string(),
                mnemonic: log_uid.to_string(),
                unit: String::new(),
                mnem_alias: String::new(),
                class_witsml: String::new(),
                min_depth_index: Some(0.0),
                max_depth_index: Some(1.0),
                min_date_time_index: None,
                max_date_time_index: None,
            }])
        }
    }

    fn selection(log: &str) -> LogSelection {
        LogSelection {
            well: WellRef {
                uid: "W".to_string(),
                name: "W".to_string(),
            },
            wellbore: WellboreRef {
                uid: "B".to_string(),
                name: "B".to_string(),
            },
            log: LogObject {
                uid: log.to_string(),
                name: log.to_string(),
                index_type: None,
            },
        }
    }

    fn poll_until(manager: &mut FetchManager) -> Vec<FetchOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let outcomes = manager.poll();
            if !outcomes.is_empty() || !manager.is_in_flight() || Instant::now() > deadline {
                return outcomes;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_successful_fetch_is_delivered() {
        let source = Arc::new(EchoSource {
            fail_log: None,
            calls: Mutex::new(Vec::new()),
        });
        let mut manager = FetchManager::new(source.clone());
        assert_eq!(manager.start(selection("L1")), 1);
        assert!(manager.is_in_flight());

        let outcomes = poll_until(&mut manager);
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            FetchOutcome::Loaded { selection, curves } => {
                assert_eq!(selection.log.uid, "L1");
                assert_eq!(curves[0].mnemonic, "L1");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!manager.is_in_flight());
        assert_eq!(source.calls.lock().unwrap().as_slice(), ["L1"]);
    }

    #[test]
    fn test_transport_error_is_surfaced() {
        let source = Arc::new(EchoSource {
            fail_log: Some("BAD".to_string()),
            calls: Mutex::new(Vec::new()),
        });
        let mut manager = FetchManager::new(source);
        manager.start(selection("BAD"));

        let outcomes = poll_until(&mut manager);
        assert!(matches!(
            outcomes.as_slice(),
            [FetchOutcome::Failed {
                error: FetchError::Transport { .. },
                ..
            }]
        ));
    }

    #[test]
    fn test_cancelled_fetch_is_silent() {
        let source = Arc::new(EchoSource {
            fail_log: None,
            calls: Mutex::new(Vec::new()),
        });
        let mut manager = FetchManager::new(source);
        manager.start(selection("L1"));
        manager.cancel();
        assert!(!manager.is_in_flight());

        // Whatever the worker reports is either Cancelled or superseded:
        // neither reaches the caller.
        let deadline = Instant::now() + Duration::from_secs(5);
        while manager.discarded() == 0 && Instant::now() < deadline {
            assert!(manager.poll().is_empty());
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(manager.discarded(), 1);
    }

    /// Source whose transport aborts on its own, without the token being set.
    struct AbortingSource;

    impl CurveMetadataSource for AbortingSource {
        fn fetch_curve_metadata(
            &self,
            _well_uid: &str,
            _wellbore_uid: &str,
            _log_uid: &str,
            _cancel: &CancelToken,
        ) -> Result<Vec<CurveMetadata>, FetchError> {
            Err(FetchError::Cancelled)
        }
    }

    #[test]
    fn test_cancellation_from_live_fetch_is_not_surfaced() {
        let mut manager = FetchManager::new(Arc::new(AbortingSource));
        manager.start(selection("L1"));

        assert!(poll_until(&mut manager).is_empty());
        assert!(!manager.is_in_flight());
        assert_eq!(manager.discarded(), 0);
    }

    #[test]
    fn test_generation_increments_per_start() {
        let source = Arc::new(EchoSource {
            fail_log: None,
            calls: Mutex::new(Vec::new()),
        });
        let mut manager = FetchManager::new(source);
        assert_eq!(manager.generation(), 0);
        manager.start(selection("A"));
        manager.start(selection("B"));
        assert_eq!(manager.generation(), 2);

        let outcomes = poll_until(&mut manager);
        for outcome in outcomes {
            if let FetchOutcome::Loaded { selection, .. } = outcome {
                assert_eq!(selection.log.uid, "B");
            }
        }
    }
}
