// CurveLens - ui/panels/table.rs
//
// State and helpers shared by the standard and virtualised curve tables.
// Both renderers go through these so that checking rows and opening the
// context menu behave identically whichever one is on screen.

use crate::app::operations::PointerEvent;
use crate::core::model::{ColumnDefinition, ContentType, CurveRow, IndexValue};
use crate::ui::theme;
use std::collections::HashSet;

/// Inputs common to both table renderers.
pub struct TableProps<'a> {
    pub columns: &'a [ColumnDefinition],
    pub rows: &'a [CurveRow],
    pub checkable_rows: bool,
    pub dark_mode: bool,
}

/// Context menu requested on a table this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuRequest {
    pub event: PointerEvent,
    pub checked_rows: Vec<CurveRow>,
}

/// Checked rows, keyed by row id, for the dataset currently shown.
#[derive(Debug, Default)]
pub struct TableState {
    dataset_id: Option<u64>,
    checked: HashSet<String>,
}

impl TableState {
    /// Reset checked rows when a different dataset is shown.
    pub fn sync_dataset(&mut self, dataset_id: u64) {
        if self.dataset_id != Some(dataset_id) {
            self.dataset_id = Some(dataset_id);
            self.checked.clear();
        }
    }

    pub fn is_checked(&self, row: &CurveRow) -> bool {
        self.checked.contains(&row.id)
    }

    pub fn set_checked(&mut self, row: &CurveRow, checked: bool) {
        if checked {
            self.checked.insert(row.id.clone());
        } else {
            self.checked.remove(&row.id);
        }
    }

    /// Tri-state summary for the header checkbox: true if every row is
    /// checked (and there is at least one row).
    pub fn all_checked(&self, rows: &[CurveRow]) -> bool {
        !rows.is_empty() && rows.iter().all(|r| self.checked.contains(&r.id))
    }

    pub fn set_all(&mut self, rows: &[CurveRow], checked: bool) {
        if checked {
            self.checked.extend(rows.iter().map(|r| r.id.clone()));
        } else {
            self.checked.clear();
        }
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    /// Checked rows in dataset order.
    pub fn checked_rows(&self, rows: &[CurveRow]) -> Vec<CurveRow> {
        rows.iter()
            .filter(|r| self.checked.contains(&r.id))
            .cloned()
            .collect()
    }

    /// Build the context-menu request for a right-click on `clicked`.
    ///
    /// Right-clicking an unchecked row makes it the only checked row, so the
    /// menu always acts on what the user pointed at.
    pub fn context_menu_request(
        &mut self,
        rows: &[CurveRow],
        clicked: &CurveRow,
        event: PointerEvent,
    ) -> ContextMenuRequest {
        if !self.is_checked(clicked) {
            self.checked.clear();
            self.checked.insert(clicked.id.clone());
        }
        ContextMenuRequest {
            event,
            checked_rows: self.checked_rows(rows),
        }
    }
}

/// Display text for one cell.
pub fn format_cell(row: &CurveRow, column: &ColumnDefinition) -> String {
    let bound = match column.property {
        "minIndex" => Some(row.min_index),
        "maxIndex" => Some(row.max_index),
        _ => None,
    };
    match bound {
        Some(value) => value
            .map(|v| format_index(v, column.content_type))
            .unwrap_or_default(),
        None => row.cell_text(column.property),
    }
}

fn format_index(value: IndexValue, content_type: ContentType) -> String {
    match (value, content_type) {
        (IndexValue::Time(t), ContentType::DateTime) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        (IndexValue::Depth(d), ContentType::Number) => format!("{d}"),
        // Mode and column type always agree; fall back to the raw form.
        (other, _) => other.to_string(),
    }
}

/// Header row: check-all box followed by the column labels.
pub fn header(ui: &mut egui::Ui, props: &TableProps<'_>, state: &mut TableState) {
    ui.horizontal(|ui| {
        if props.checkable_rows {
            let mut all = state.all_checked(props.rows);
            ui.add_sized(
                [theme::CHECKBOX_WIDTH, theme::ROW_HEIGHT],
                egui::Checkbox::without_text(&mut all),
            )
            .on_hover_text("Check all rows");
            if all != state.all_checked(props.rows) {
                state.set_all(props.rows, all);
            }
        }
        for column in props.columns {
            ui.add_sized(
                [theme::column_width(column.content_type), theme::ROW_HEIGHT],
                egui::Label::new(egui::RichText::new(column.label).strong()).truncate(),
            );
        }
    });
}

/// One data row. Returns a context-menu request if the row was right-clicked.
pub fn data_row(
    ui: &mut egui::Ui,
    props: &TableProps<'_>,
    state: &mut TableState,
    row: &CurveRow,
) -> Option<ContextMenuRequest> {
    let text_colour = theme::row_text_colour(props.dark_mode);
    let mut clicked_at = None;

    ui.horizontal(|ui| {
        if props.checkable_rows {
            let mut checked = state.is_checked(row);
            let response = ui.add_sized(
                [theme::CHECKBOX_WIDTH, theme::ROW_HEIGHT],
                egui::Checkbox::without_text(&mut checked),
            );
            if response.changed() {
                state.set_checked(row, checked);
            }
        }
        for column in props.columns {
            let response = ui.add_sized(
                [theme::column_width(column.content_type), theme::ROW_HEIGHT],
                egui::Label::new(egui::RichText::new(format_cell(row, column)).color(text_colour))
                    .truncate()
                    .sense(egui::Sense::click()),
            );
            if response.secondary_clicked() {
                clicked_at = response
                    .interact_pointer_pos()
                    .or_else(|| ui.ctx().pointer_latest_pos());
            }
        }
    });

    clicked_at.map(|pos| {
        state.context_menu_request(props.rows, row, PointerEvent { x: pos.x, y: pos.y })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(id: &str) -> CurveRow {
        CurveRow {
            id: id.to_string(),
            uid: id.to_string(),
            mnemonic: id.to_string(),
            min_index: Some(IndexValue::Depth(0.5)),
            max_index: None,
            class_witsml: String::new(),
            unit: "m".to_string(),
            mnem_alias: String::new(),
            log_uid: "L".to_string(),
            well_uid: "W".to_string(),
            wellbore_uid: "B".to_string(),
            well_name: "W".to_string(),
            wellbore_name: "B".to_string(),
        }
    }

    #[test]
    fn test_new_dataset_clears_checked_rows() {
        let rows = vec![make_row("a"), make_row("b")];
        let mut state = TableState::default();
        state.sync_dataset(1);
        state.set_checked(&rows[0], true);
        state.sync_dataset(1);
        assert_eq!(state.checked_count(), 1);
        state.sync_dataset(2);
        assert_eq!(state.checked_count(), 0);
    }

    #[test]
    fn test_checked_rows_follow_dataset_order() {
        let rows = vec![make_row("a"), make_row("b"), make_row("c")];
        let mut state = TableState::default();
        state.set_checked(&rows[2], true);
        state.set_checked(&rows[0], true);
        let ids: Vec<_> = state.checked_rows(&rows).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_check_all_and_clear() {
        let rows = vec![make_row("a"), make_row("b")];
        let mut state = TableState::default();
        assert!(!state.all_checked(&rows));
        state.set_all(&rows, true);
        assert!(state.all_checked(&rows));
        state.set_all(&rows, false);
        assert_eq!(state.checked_count(), 0);
        assert!(!state.all_checked(&[]));
    }

    #[test]
    fn test_right_click_on_checked_row_keeps_selection() {
        let rows = vec![make_row("a"), make_row("b"), make_row("c")];
        let mut state = TableState::default();
        state.set_checked(&rows[0], true);
        state.set_checked(&rows[1], true);

        let request =
            state.context_menu_request(&rows, &rows[1], PointerEvent { x: 10.0, y: 20.0 });
        assert_eq!(request.checked_rows.len(), 2);
        assert_eq!(request.event, PointerEvent { x: 10.0, y: 20.0 });
    }

    #[test]
    fn test_right_click_on_unchecked_row_selects_only_it() {
        let rows = vec![make_row("a"), make_row("b"), make_row("c")];
        let mut state = TableState::default();
        state.set_checked(&rows[0], true);

        let request = state.context_menu_request(&rows, &rows[2], PointerEvent { x: 0.0, y: 0.0 });
        let ids: Vec<_> = request.checked_rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_format_cell_by_column_type() {
        let row = make_row("a");
        let min = ColumnDefinition {
            label: "MinIndex",
            property: "minIndex",
            content_type: ContentType::Number,
        };
        let max = ColumnDefinition {
            label: "MaxIndex",
            property: "maxIndex",
            content_type: ContentType::Number,
        };
        let unit = ColumnDefinition {
            label: "Unit",
            property: "unit",
            content_type: ContentType::String,
        };
        assert_eq!(format_cell(&row, &min), "0.5");
        assert_eq!(format_cell(&row, &max), "");
        assert_eq!(format_cell(&row, &unit), "m");
    }

    #[test]
    fn test_format_time_cell() {
        let mut row = make_row("t");
        row.min_index = Some(IndexValue::Time("2024-05-06T07:08:09Z".parse().unwrap()));
        let min = ColumnDefinition {
            label: "MinIndex",
            property: "minIndex",
            content_type: ContentType::DateTime,
        };
        assert_eq!(format_cell(&row, &min), "2024-05-06 07:08:09");
    }
}
