// CurveLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Selection path: server, well, wellbore, log
// =============================================================================

/// The server (or store) the current data was fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    pub name: String,
    pub url: String,
}

/// A well, identified by uid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WellRef {
    pub uid: String,
    pub name: String,
}

/// A wellbore within a well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WellboreRef {
    pub uid: String,
    pub name: String,
}

/// A log object within a wellbore. Owns an ordered set of curves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogObject {
    pub uid: String,
    pub name: String,
    /// Declared index type as reported by the source ("measured depth",
    /// "date time", ...). Display only; the index mode is inferred from data.
    #[serde(default)]
    pub index_type: Option<String>,
}

/// Fully resolved path to one log: everything a fetch is scoped by, plus the
/// names inherited by every projected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSelection {
    pub well: WellRef,
    pub wellbore: WellboreRef,
    pub log: LogObject,
}

impl LogSelection {
    /// Identity of the selection as watched by the curve list.
    pub fn key(&self) -> LogKey {
        LogKey {
            well_uid: self.well.uid.clone(),
            wellbore_uid: self.wellbore.uid.clone(),
            log_uid: self.log.uid.clone(),
        }
    }
}

/// uid triple identifying a log. Two selections with equal keys are the same
/// log, even if display names differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogKey {
    pub well_uid: String,
    pub wellbore_uid: String,
    pub log_uid: String,
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.well_uid, self.wellbore_uid, self.log_uid)
    }
}

// =============================================================================
// Curve metadata (fetched)
// =============================================================================

/// Metadata for one curve (measurement channel) of a log, as delivered by the
/// transport. Exactly one of the two index bound pairs is populated in a
/// well-formed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveMetadata {
    pub uid: String,
    pub mnemonic: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub mnem_alias: String,
    #[serde(default)]
    pub class_witsml: String,
    #[serde(default)]
    pub min_depth_index: Option<f64>,
    #[serde(default)]
    pub max_depth_index: Option<f64>,
    #[serde(default)]
    pub min_date_time_index: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_date_time_index: Option<DateTime<Utc>>,
}

impl CurveMetadata {
    /// True if either depth bound is present (zero counts as present).
    pub fn has_depth_bound(&self) -> bool {
        self.min_depth_index.is_some() || self.max_depth_index.is_some()
    }
}

// =============================================================================
// Index mode
// =============================================================================

/// Whether a log's curves are bounded by depth or by time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    Depth,
    Time,
}

impl IndexMode {
    /// Content type of the MinIndex/MaxIndex columns under this mode.
    pub fn content_type(self) -> ContentType {
        match self {
            IndexMode::Depth => ContentType::Number,
            IndexMode::Time => ContentType::DateTime,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexMode::Depth => "Depth",
            IndexMode::Time => "Time",
        }
    }
}

/// One projected index bound. The variant always matches the dataset's
/// `IndexMode`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndexValue {
    Depth(f64),
    Time(DateTime<Utc>),
}

impl IndexValue {
    pub fn mode(&self) -> IndexMode {
        match self {
            IndexValue::Depth(_) => IndexMode::Depth,
            IndexValue::Time(_) => IndexMode::Time,
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexValue::Depth(d) => write!(f, "{d}"),
            IndexValue::Time(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

// =============================================================================
// Rows and columns (derived, render-only)
// =============================================================================

/// Flattened, render-only projection of a `CurveMetadata` plus the
/// identifiers of the selection it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveRow {
    /// Display key `"{log_uid}-{mnemonic}"`, unique within one dataset.
    pub id: String,
    pub uid: String,
    pub mnemonic: String,
    pub min_index: Option<IndexValue>,
    pub max_index: Option<IndexValue>,
    pub class_witsml: String,
    pub unit: String,
    pub mnem_alias: String,
    pub log_uid: String,
    pub well_uid: String,
    pub wellbore_uid: String,
    pub well_name: String,
    pub wellbore_name: String,
}

impl CurveRow {
    /// Display text for the cell backing `property`. Unknown properties and
    /// absent index bounds render as an empty string.
    pub fn cell_text(&self, property: &str) -> String {
        match property {
            "mnemonic" => self.mnemonic.clone(),
            "minIndex" => self.min_index.map(|v| v.to_string()).unwrap_or_default(),
            "maxIndex" => self.max_index.map(|v| v.to_string()).unwrap_or_default(),
            "classWitsml" => self.class_witsml.clone(),
            "unit" => self.unit.clone(),
            "mnemAlias" => self.mnem_alias.clone(),
            "uid" => self.uid.clone(),
            _ => String::new(),
        }
    }
}

/// Semantic type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    String,
    Number,
    DateTime,
}

/// One table column: header label, row property it reads, semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub label: &'static str,
    pub property: &'static str,
    pub content_type: ContentType,
}

// =============================================================================
// Catalog (navigator contents)
// =============================================================================

/// All wells reachable through a transport, for the navigator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub wells: Vec<WellEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WellEntry {
    pub well: WellRef,
    pub wellbores: Vec<WellboreEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WellboreEntry {
    pub wellbore: WellboreRef,
    pub logs: Vec<LogObject>,
}

impl Catalog {
    /// Total number of logs across all wells and wellbores.
    pub fn log_count(&self) -> usize {
        self.wells
            .iter()
            .flat_map(|w| &w.wellbores)
            .map(|wb| wb.logs.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_metadata_deserialises_camel_case() {
        let json = r#"{
            "uid": "GR",
            "mnemonic": "GR",
            "unit": "gAPI",
            "mnemAlias": "GAMMA",
            "classWitsml": "gamma ray",
            "minDepthIndex": 0,
            "maxDepthIndex": 1520.5
        }"#;
        let curve: CurveMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(curve.mnem_alias, "GAMMA");
        assert_eq!(curve.class_witsml, "gamma ray");
        assert_eq!(curve.min_depth_index, Some(0.0));
        assert_eq!(curve.max_depth_index, Some(1520.5));
        assert!(curve.min_date_time_index.is_none());
        assert!(curve.has_depth_bound());
    }

    #[test]
    fn test_curve_metadata_missing_strings_default_empty() {
        let json = r#"{
            "uid": "TIME",
            "mnemonic": "TIME",
            "minDateTimeIndex": "2024-03-01T00:00:00Z"
        }"#;
        let curve: CurveMetadata = serde_json::from_str(json).unwrap();
        assert!(curve.unit.is_empty());
        assert!(!curve.has_depth_bound());
        assert!(curve.min_date_time_index.is_some());
    }

    #[test]
    fn test_index_value_display() {
        assert_eq!(IndexValue::Depth(100.0).to_string(), "100");
        let t = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(IndexValue::Time(t).to_string(), "2024-03-01T12:00:00+00:00");
        assert_eq!(IndexValue::Time(t).mode(), IndexMode::Time);
    }

    #[test]
    fn test_log_key_display() {
        let key = LogKey {
            well_uid: "W".to_string(),
            wellbore_uid: "B".to_string(),
            log_uid: "L".to_string(),
        };
        assert_eq!(key.to_string(), "W/B/L");
    }
}
