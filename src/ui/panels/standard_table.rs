// CurveLens - ui/panels/standard_table.rs
//
// Standard curve table: lays out every row every frame. Used for datasets
// below the virtualisation threshold.

use crate::ui::panels::table::{self, ContextMenuRequest, TableProps, TableState};

/// Render all rows. Returns a context-menu request if one was made.
pub fn render(
    ui: &mut egui::Ui,
    props: &TableProps<'_>,
    state: &mut TableState,
) -> Option<ContextMenuRequest> {
    let mut request = None;

    egui::ScrollArea::horizontal()
        .id_salt("standard_table_h")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            table::header(ui, props, state);
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("standard_table_v")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for row in props.rows {
                        if let Some(r) = table::data_row(ui, props, state, row) {
                            request = Some(r);
                        }
                    }
                });
        });

    request
}
