// CurveLens - core/projection.rs
//
// Row projection: fetched curve metadata -> flat render-ready rows, plus the
// column set matching the inferred index mode.
// Core layer: pure functions, no I/O or UI dependencies.

use crate::core::model::{
    ColumnDefinition, ContentType, CurveMetadata, CurveRow, IndexMode, IndexValue, LogSelection,
};

/// Rows and columns projected together from one dataset, so they can never
/// disagree on the index mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTable {
    pub index_mode: IndexMode,
    pub columns: Vec<ColumnDefinition>,
    pub rows: Vec<CurveRow>,
}

/// Infer the index mode of a dataset from its first record.
///
/// Depth when the first record carries either depth bound (a zero bound
/// counts). An empty list, or a first record with no depth bound, is Time.
pub fn infer_index_mode(curves: &[CurveMetadata]) -> IndexMode {
    match curves.first() {
        Some(first) if first.has_depth_bound() => IndexMode::Depth,
        _ => IndexMode::Time,
    }
}

/// Column definitions, in display order, for the given index mode.
pub fn curve_columns(mode: IndexMode) -> Vec<ColumnDefinition> {
    let index_type = mode.content_type();
    vec![
        ColumnDefinition {
            label: "Mnemonic",
            property: "mnemonic",
            content_type: ContentType::String,
        },
        ColumnDefinition {
            label: "MinIndex",
            property: "minIndex",
            content_type: index_type,
        },
        ColumnDefinition {
            label: "MaxIndex",
            property: "maxIndex",
            content_type: index_type,
        },
        ColumnDefinition {
            label: "ClassWitsml",
            property: "classWitsml",
            content_type: ContentType::String,
        },
        ColumnDefinition {
            label: "Unit",
            property: "unit",
            content_type: ContentType::String,
        },
        ColumnDefinition {
            label: "MnemAlias",
            property: "mnemAlias",
            content_type: ContentType::String,
        },
        ColumnDefinition {
            label: "uid",
            property: "uid",
            content_type: ContentType::String,
        },
    ]
}

/// Project every curve into a `CurveRow`, preserving order.
///
/// The index mode is resolved once for the whole list; a record that lacks
/// the bound pair of that mode gets `None` for the bound rather than a value
/// of the other mode.
pub fn project_rows(curves: &[CurveMetadata], selection: &LogSelection) -> Vec<CurveRow> {
    let mode = infer_index_mode(curves);
    curves
        .iter()
        .map(|curve| project_row(curve, mode, selection))
        .collect()
}

/// Project a dataset into rows and the matching columns in one step.
pub fn project_table(curves: &[CurveMetadata], selection: &LogSelection) -> CurveTable {
    let index_mode = infer_index_mode(curves);
    CurveTable {
        index_mode,
        columns: curve_columns(index_mode),
        rows: project_rows(curves, selection),
    }
}

fn project_row(curve: &CurveMetadata, mode: IndexMode, selection: &LogSelection) -> CurveRow {
    let (min_index, max_index) = match mode {
        IndexMode::Depth => (
            curve.min_depth_index.map(IndexValue::Depth),
            curve.max_depth_index.map(IndexValue::Depth),
        ),
        IndexMode::Time => (
            curve.min_date_time_index.map(IndexValue::Time),
            curve.max_date_time_index.map(IndexValue::Time),
        ),
    };

    CurveRow {
        id: format!("{}-{}", selection.log.uid, curve.mnemonic),
        uid: curve.uid.clone(),
        mnemonic: curve.mnemonic.clone(),
        min_index,
        max_index,
        class_witsml: curve.class_witsml.clone(),
        unit: curve.unit.clone(),
        mnem_alias: curve.mnem_alias.clone(),
        log_uid: selection.log.uid.clone(),
        well_uid: selection.well.uid.clone(),
        wellbore_uid: selection.wellbore.uid.clone(),
        well_name: selection.well.name.clone(),
        wellbore_name: selection.wellbore.name.clone(),
    }
}
