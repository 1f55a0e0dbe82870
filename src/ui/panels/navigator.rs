// CurveLens - ui/panels/navigator.rs
//
// Sidebar tree of wells, wellbores and logs. Clicks are sent as navigation
// actions; the panel never mutates navigation state itself.

use crate::app::navigation::{NavigationAction, NavigationSender, NavigationState};
use crate::core::model::{Catalog, LogSelection};

/// Render the navigator (left panel).
pub fn render(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    navigation: &NavigationState,
    sender: &NavigationSender,
) {
    if let Some(server) = &navigation.selected_server {
        ui.heading(&server.name);
        ui.label(egui::RichText::new(&server.url).small().weak());
    }
    ui.separator();

    if catalog.wells.is_empty() {
        ui.label("No logs found in the store.");
        return;
    }

    let mut action = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for well_entry in &catalog.wells {
                let well = &well_entry.well;
                let well_selected = navigation.selected_well.as_ref() == Some(well);
                egui::CollapsingHeader::new(&well.name)
                    .id_salt(("well", &well.uid))
                    .default_open(well_selected)
                    .show(ui, |ui| {
                        for bore_entry in &well_entry.wellbores {
                            let wellbore = &bore_entry.wellbore;
                            egui::CollapsingHeader::new(&wellbore.name)
                                .id_salt(("wellbore", &well.uid, &wellbore.uid))
                                .default_open(
                                    well_selected
                                        && navigation.selected_wellbore.as_ref() == Some(wellbore),
                                )
                                .show(ui, |ui| {
                                    for log in &bore_entry.logs {
                                        let selected = well_selected
                                            && navigation.selected_wellbore.as_ref()
                                                == Some(wellbore)
                                            && navigation.selected_log.as_ref() == Some(log);
                                        let response = ui.selectable_label(selected, &log.name);
                                        let response = match &log.index_type {
                                            Some(index_type) => response.on_hover_text(index_type),
                                            None => response,
                                        };
                                        if response.clicked() && !selected {
                                            action =
                                                Some(NavigationAction::SelectLog(LogSelection {
                                                    well: well.clone(),
                                                    wellbore: wellbore.clone(),
                                                    log: log.clone(),
                                                }));
                                        }
                                    }
                                });
                        }
                    });
            }
        });

    if let Some(action) = action {
        if sender.send(action).is_err() {
            tracing::warn!("Navigation receiver dropped; selection ignored");
        }
    }
}
