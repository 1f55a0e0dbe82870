// CurveLens - platform/store.rs
//
// File-backed curve metadata transport.
//
// Layout: <root>/<well_uid>/<wellbore_uid>/<log_uid>.json, each file a
// `LogDocument` carrying the display names of its well, wellbore and log and
// the `logCurveInfo` array.
//
//   - Fetch honours the cancel token before reading, between delay slices,
//     and before returning.
//   - Transient I/O errors are retried with capped backoff. Permanent errors
//     are returned immediately.
//   - Catalog discovery uses walkdir at a fixed depth; unreadable documents
//     become warnings, not failures.

use crate::app::source::{CancelToken, CurveMetadataSource};
use crate::core::model::{
    Catalog, CurveMetadata, LogObject, WellEntry, WellRef, WellboreEntry, WellboreRef,
};
use crate::util::constants::{
    CANCEL_CHECK_INTERVAL_MS, LOG_DOCUMENT_EXTENSION, MAX_LOG_DOCUMENT_BYTES, MAX_READ_RETRIES,
    READ_RETRY_DELAYS_MS, STORE_LOG_DEPTH,
};
use crate::util::error::{CatalogError, FetchError};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// On-disk shape of one log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDocument {
    pub well: WellRef,
    pub wellbore: WellboreRef,
    pub log: LogObject,
    #[serde(default)]
    pub log_curve_info: Vec<CurveMetadata>,
}

/// Header-only view of a `LogDocument`, used while building the catalog.
#[derive(Debug, Deserialize)]
struct LogHeader {
    well: WellRef,
    wellbore: WellboreRef,
    log: LogObject,
}

/// Curve metadata store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileCurveStore {
    root: PathBuf,
    fetch_delay: Duration,
}

impl FileCurveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fetch_delay: Duration::ZERO,
        }
    }

    /// Add a simulated latency to every fetch, to exercise loading states and
    /// cancellation against a local store.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for one log, or `None` if any uid is not a plain
    /// path component.
    pub fn log_path(&self, well_uid: &str, wellbore_uid: &str, log_uid: &str) -> Option<PathBuf> {
        if ![well_uid, wellbore_uid, log_uid].iter().all(|c| is_plain_component(c)) {
            return None;
        }
        Some(
            self.root
                .join(well_uid)
                .join(wellbore_uid)
                .join(format!("{log_uid}.{LOG_DOCUMENT_EXTENSION}")),
        )
    }

    /// Write `document` to its place in the store, creating directories.
    pub fn write_document(&self, document: &LogDocument) -> Result<PathBuf, FetchError> {
        let path = self
            .log_path(&document.well.uid, &document.wellbore.uid, &document.log.uid)
            .ok_or_else(|| FetchError::LogNotFound {
                well_uid: document.well.uid.clone(),
                wellbore_uid: document.wellbore.uid.clone(),
                log_uid: document.log.uid.clone(),
            })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FetchError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_vec_pretty(document).map_err(|e| FetchError::Json {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| FetchError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Walk the store and list every well, wellbore and log in it.
    ///
    /// Returns the catalog (sorted by directory name at each level) and
    /// non-fatal warnings for documents that could not be read.
    pub fn catalog(&self) -> Result<(Catalog, Vec<String>), CatalogError> {
        if !self.root.exists() {
            return Err(CatalogError::RootNotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(CatalogError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let mut catalog = Catalog::default();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(STORE_LOG_DEPTH)
            .max_depth(STORE_LOG_DEPTH)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    if path == self.root {
                        return Err(CatalogError::Traversal { path, source: e });
                    }
                    warnings.push(format!("Cannot read '{}': {e}", path.display()));
                    continue;
                }
            };

            let path = entry.path();
            let is_document = entry.file_type().is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(LOG_DOCUMENT_EXTENSION);
            if !is_document {
                continue;
            }

            let Some((well_uid, wellbore_uid, log_uid)) = self.uids_for(path) else {
                continue;
            };

            let header = match read_header(path) {
                Ok(h) => h,
                Err(e) => {
                    tracing::debug!(file = %path.display(), error = %e, "Skipping log document");
                    warnings.push(e.to_string());
                    continue;
                }
            };

            insert_log(
                &mut catalog,
                WellRef {
                    uid: well_uid,
                    name: non_empty_or(header.well.name, &header.well.uid),
                },
                WellboreRef {
                    uid: wellbore_uid,
                    name: non_empty_or(header.wellbore.name, &header.wellbore.uid),
                },
                LogObject {
                    uid: log_uid,
                    name: non_empty_or(header.log.name, &header.log.uid),
                    index_type: header.log.index_type,
                },
            );
        }

        tracing::info!(
            root = %self.root.display(),
            wells = catalog.wells.len(),
            logs = catalog.log_count(),
            warnings = warnings.len(),
            "Catalog built"
        );

        Ok((catalog, warnings))
    }

    /// Directory-derived uids of a document path: (well, wellbore, log).
    fn uids_for(&self, path: &Path) -> Option<(String, String, String)> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut parts = relative.iter().map(|p| p.to_string_lossy().into_owned());
        let well = parts.next()?;
        let wellbore = parts.next()?;
        let log = Path::new(&parts.next()?)
            .file_stem()?
            .to_string_lossy()
            .into_owned();
        Some((well, wellbore, log))
    }

    /// Sleep through the configured delay in slices, bailing out on cancel.
    fn simulate_latency(&self, cancel: &CancelToken) -> Result<(), FetchError> {
        if self.fetch_delay.is_zero() {
            return Ok(());
        }
        let deadline = Instant::now() + self.fetch_delay;
        let slice = Duration::from_millis(CANCEL_CHECK_INTERVAL_MS);
        while Instant::now() < deadline {
            cancel.check()?;
            std::thread::sleep(slice.min(deadline.saturating_duration_since(Instant::now())));
        }
        Ok(())
    }
}

impl CurveMetadataSource for FileCurveStore {
    fn fetch_curve_metadata(
        &self,
        well_uid: &str,
        wellbore_uid: &str,
        log_uid: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<CurveMetadata>, FetchError> {
        let not_found = || FetchError::LogNotFound {
            well_uid: well_uid.to_string(),
            wellbore_uid: wellbore_uid.to_string(),
            log_uid: log_uid.to_string(),
        };

        cancel.check()?;
        let path = self
            .log_path(well_uid, wellbore_uid, log_uid)
            .ok_or_else(not_found)?;

        self.simulate_latency(cancel)?;

        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(FetchError::Io { path, source: e }),
        };
        if metadata.len() > MAX_LOG_DOCUMENT_BYTES {
            return Err(FetchError::DocumentTooLarge {
                path,
                size: metadata.len(),
                max_size: MAX_LOG_DOCUMENT_BYTES,
            });
        }

        let bytes = read_with_retry(&path).map_err(|e| FetchError::Io {
            path: path.clone(),
            source: e,
        })?;
        cancel.check()?;

        let document: LogDocument =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Json {
                path: path.clone(),
                source: e,
            })?;

        tracing::debug!(
            file = %path.display(),
            curves = document.log_curve_info.len(),
            "Log document read"
        );

        cancel.check()?;
        Ok(document.log_curve_info)
    }
}

// =============================================================================
// Demo data
// =============================================================================

/// Depth-indexed curves of the demo log: (mnemonic, unit, class, alias).
const DEMO_DEPTH_CURVES: [(&str, &str, &str, &str); 5] = [
    ("DEPT", "m", "measured depth", "MD"),
    ("GR", "gAPI", "gamma ray", "GAMMA"),
    ("RHOB", "g/cm3", "bulk density", "DEN"),
    ("NPHI", "v/v", "neutron porosity", "NEU"),
    ("RT", "ohm.m", "true resistivity", "RES"),
];

/// Number of channels in the demo time-indexed log. Large enough to be shown
/// with the virtualised table.
const DEMO_TIME_CHANNELS: usize = 150;

/// Write a small demo store: one depth log and one time log in one wellbore.
/// Returns the number of log documents written.
pub fn seed_demo(store: &FileCurveStore) -> Result<usize, FetchError> {
    let well = WellRef {
        uid: "demo-well".to_string(),
        name: "Demo Well 15/9-F-1".to_string(),
    };
    let wellbore = WellboreRef {
        uid: "demo-wellbore".to_string(),
        name: "15/9-F-1 A".to_string(),
    };

    let depth_curves = DEMO_DEPTH_CURVES
        .iter()
        .enumerate()
        .map(|(i, (mnemonic, unit, class, alias))| CurveMetadata {
            uid: format!("{}-{i}", mnemonic.to_lowercase()),
            mnemonic: (*mnemonic).to_string(),
            unit: (*unit).to_string(),
            mnem_alias: (*alias).to_string(),
            class_witsml: (*class).to_string(),
            min_depth_index: Some(150.0),
            max_depth_index: Some(3120.5),
            min_date_time_index: None,
            max_date_time_index: None,
        })
        .collect();

    let start = chrono::DateTime::parse_from_rfc3339("2024-01-15T06:00:00Z")
        .map(|t| t.with_timezone(&chrono::Utc))
        .unwrap_or_else(|_| chrono::Utc::now());
    let time_curves = (0..DEMO_TIME_CHANNELS)
        .map(|i| CurveMetadata {
            uid: format!("ch-{i:03}"),
            mnemonic: format!("CH{i:03}"),
            unit: "unitless".to_string(),
            mnem_alias: String::new(),
            class_witsml: "drilling parameter".to_string(),
            min_depth_index: None,
            max_depth_index: None,
            min_date_time_index: Some(start),
            max_date_time_index: Some(start + chrono::Duration::minutes(10 * i as i64 + 10)),
        })
        .collect();

    let documents = [
        LogDocument {
            well: well.clone(),
            wellbore: wellbore.clone(),
            log: LogObject {
                uid: "depth-run-1".to_string(),
                name: "Wireline run 1".to_string(),
                index_type: Some("measured depth".to_string()),
            },
            log_curve_info: depth_curves,
        },
        LogDocument {
            well,
            wellbore,
            log: LogObject {
                uid: "time-realtime".to_string(),
                name: "Realtime drilling".to_string(),
                index_type: Some("date time".to_string()),
            },
            log_curve_info: time_curves,
        },
    ];

    for document in &documents {
        store.write_document(document)?;
    }
    tracing::info!(root = %store.root().display(), logs = documents.len(), "Demo store written");
    Ok(documents.len())
}

// =============================================================================
// Helpers
// =============================================================================

fn is_plain_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}

fn non_empty_or(name: String, fallback: &str) -> String {
    if name.trim().is_empty() {
        fallback.to_string()
    } else {
        name
    }
}

fn insert_log(catalog: &mut Catalog, well: WellRef, wellbore: WellboreRef, log: LogObject) {
    let well_idx = match catalog.wells.iter().position(|w| w.well.uid == well.uid) {
        Some(i) => i,
        None => {
            catalog.wells.push(WellEntry {
                well,
                wellbores: Vec::new(),
            });
            catalog.wells.len() - 1
        }
    };
    let wellbores = &mut catalog.wells[well_idx].wellbores;
    let bore_idx = match wellbores.iter().position(|b| b.wellbore.uid == wellbore.uid) {
        Some(i) => i,
        None => {
            wellbores.push(WellboreEntry {
                wellbore,
                logs: Vec::new(),
            });
            wellbores.len() - 1
        }
    };
    wellbores[bore_idx].logs.push(log);
}

fn read_header(path: &Path) -> Result<LogHeader, FetchError> {
    let bytes = read_with_retry(path).map_err(|e| FetchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a file with transient-error retries.
fn read_with_retry(path: &Path) -> io::Result<Vec<u8>> {
    let mut last_err: Option<io::Error> = None;

    for attempt in 0..MAX_READ_RETRIES {
        match std::fs::read(path) {
            Ok(content) => return Ok(content),
            Err(e) if is_transient_error(&e) => {
                tracing::debug!(
                    file = %path.display(),
                    attempt = attempt + 1,
                    error = %e,
                    "Transient I/O error, retrying"
                );
                std::thread::sleep(Duration::from_millis(READ_RETRY_DELAYS_MS[attempt as usize]));
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or_else(|| io::Error::other("Unknown read error")))
}

/// Returns true for transient I/O errors that are worth retrying.
fn is_transient_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    )
}
