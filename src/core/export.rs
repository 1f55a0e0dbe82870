// CurveLens - core/export.rs
//
// CSV and JSON export of checked curve rows.
// Core layer: writes to any Write trait object.

use crate::core::model::CurveRow;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export rows to CSV.
///
/// Writes: mnemonic, min_index, max_index, class_witsml, unit, mnem_alias,
/// uid, log_uid, wellbore, well. Index bounds are written in their display
/// form (plain number or RFC 3339).
pub fn export_csv<W: Write>(
    rows: &[CurveRow],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "mnemonic",
            "min_index",
            "max_index",
            "class_witsml",
            "unit",
            "mnem_alias",
            "uid",
            "log_uid",
            "wellbore",
            "well",
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for row in rows {
        let min = row.min_index.map(|v| v.to_string()).unwrap_or_default();
        let max = row.max_index.map(|v| v.to_string()).unwrap_or_default();
        csv_writer
            .write_record([
                row.mnemonic.as_str(),
                &min,
                &max,
                &row.class_witsml,
                &row.unit,
                &row.mnem_alias,
                &row.uid,
                &row.log_uid,
                &row.wellbore_name,
                &row.well_name,
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export rows to JSON (array of objects, camelCase keys).
pub fn export_json<W: Write>(
    rows: &[CurveRow],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}
