// CurveLens - ui/panels/virtual_table.rs
//
// Virtual-scrolling curve table.
//
// Uses egui's `ScrollArea::show_rows`, which lays out only the rows currently
// visible in the viewport, so cost per frame does not grow with the number of
// curves. Header, row widgets and checked state are shared with the standard
// table.

use crate::ui::panels::table::{self, ContextMenuRequest, TableProps, TableState};
use crate::ui::theme;

/// Render the visible window of rows. Returns a context-menu request if one
/// was made.
pub fn render(
    ui: &mut egui::Ui,
    props: &TableProps<'_>,
    state: &mut TableState,
) -> Option<ContextMenuRequest> {
    let mut request = None;
    let total = props.rows.len();

    egui::ScrollArea::horizontal()
        .id_salt("virtual_table_h")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            table::header(ui, props, state);
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("virtual_table_v")
                .auto_shrink([false; 2])
                .show_rows(ui, theme::ROW_HEIGHT, total, |ui, row_range| {
                    for idx in row_range {
                        let Some(row) = props.rows.get(idx) else {
                            continue;
                        };
                        if let Some(r) = table::data_row(ui, props, state, row) {
                            request = Some(r);
                        }
                    }
                });
        });

    request
}
