// CurveLens - ui/panels/context_menu.rs
//
// Curve context menu, displayed at the position dispatched by the curve list.
// Commands that only need the menu's own handles (copy, navigation, close)
// run here; exports need file dialogs and I/O, so they are handed back to the
// shell as an `ExportRequest`.

use crate::app::navigation::NavigationAction;
use crate::app::operations::{CurveContextMenu, MenuPosition, Operation, OperationDispatcher};
use crate::core::model::{CurveRow, WellRef, WellboreRef};
use crate::ui::theme;

/// Export format chosen from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export the shell should perform.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub rows: Vec<CurveRow>,
}

/// Render the menu. Returns an export request if one was chosen.
pub fn render(
    ctx: &egui::Context,
    menu: &CurveContextMenu,
    position: MenuPosition,
) -> Option<ExportRequest> {
    let rows = &menu.checked_rows;
    let mut export = None;
    let mut close = false;

    let area = egui::Area::new(egui::Id::new("curve_context_menu"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(position.x, position.y))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(theme::CONTEXT_MENU_WIDTH);
                ui.label(
                    egui::RichText::new(format!("{} curve(s)", rows.len()))
                        .small()
                        .weak(),
                );
                ui.separator();

                if ui.button("Copy mnemonics").clicked() {
                    ctx.copy_text(mnemonic_list(rows));
                    close = true;
                }
                if ui.button("Export CSV\u{2026}").clicked() {
                    export = Some(ExportFormat::Csv);
                    close = true;
                }
                if ui.button("Export JSON\u{2026}").clicked() {
                    export = Some(ExportFormat::Json);
                    close = true;
                }

                ui.separator();
                let wellbore = owning_wellbore(rows);
                if ui
                    .add_enabled(wellbore.is_some(), egui::Button::new("Back to wellbore"))
                    .clicked()
                {
                    if let Some((well, wellbore)) = wellbore {
                        if menu
                            .navigation
                            .send(NavigationAction::SelectWellbore { well, wellbore })
                            .is_err()
                        {
                            tracing::warn!("Navigation receiver dropped");
                        }
                    }
                    close = true;
                }
            });
        });

    let dismissed = ctx.input(|i| {
        i.key_pressed(egui::Key::Escape)
            || (i.pointer.any_pressed()
                && i.pointer
                    .interact_pos()
                    .is_some_and(|p| !area.response.rect.contains(p)))
    });

    if close || dismissed {
        menu.operations.dispatch(Operation::HideContextMenu);
    }

    export.map(|format| ExportRequest {
        format,
        rows: rows.clone(),
    })
}

/// Newline-separated mnemonics, in row order.
pub fn mnemonic_list(rows: &[CurveRow]) -> String {
    rows.iter()
        .map(|r| r.mnemonic.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Well and wellbore the rows belong to (taken from the first row).
fn owning_wellbore(rows: &[CurveRow]) -> Option<(WellRef, WellboreRef)> {
    rows.first().map(|r| {
        (
            WellRef {
                uid: r.well_uid.clone(),
                name: r.well_name.clone(),
            },
            WellboreRef {
                uid: r.wellbore_uid.clone(),
                name: r.wellbore_name.clone(),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(mnemonic: &str) -> CurveRow {
        CurveRow {
            id: format!("L-{mnemonic}"),
            uid: mnemonic.to_string(),
            mnemonic: mnemonic.to_string(),
            min_index: None,
            max_index: None,
            class_witsml: String::new(),
            unit: String::new(),
            mnem_alias: String::new(),
            log_uid: "L".to_string(),
            well_uid: "W".to_string(),
            wellbore_uid: "B".to_string(),
            well_name: "Well".to_string(),
            wellbore_name: "Bore".to_string(),
        }
    }

    #[test]
    fn test_mnemonic_list_preserves_order() {
        let rows = vec![make_row("GR"), make_row("DEPT")];
        assert_eq!(mnemonic_list(&rows), "GR\nDEPT");
        assert_eq!(mnemonic_list(&[]), "");
    }

    #[test]
    fn test_owning_wellbore_from_first_row() {
        let (well, wellbore) = owning_wellbore(&[make_row("GR")]).unwrap();
        assert_eq!(well.name, "Well");
        assert_eq!(wellbore.uid, "B");
        assert!(owning_wellbore(&[]).is_none());
    }
}
