// CurveLens - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels, the navigation and operation channels, and
// the curve list fetch lifecycle.

use crate::app::curve_list::CurveListView;
use crate::app::navigation::{NavigationAction, NavigationSender};
use crate::app::operations::{Operation, OperationSender};
use crate::app::state::{AppState, NotificationLevel};
use crate::platform::store::FileCurveStore;
use crate::ui;
use crate::ui::panels::context_menu::{ExportFormat, ExportRequest};
use crate::ui::panels::curve_list::Dispatch;
use crate::ui::panels::table::TableState;
use std::sync::mpsc;
use std::sync::Arc;

/// The CurveLens application.
pub struct CurveLensApp {
    pub state: AppState,
    pub curve_list: CurveListView,
    pub table_state: TableState,
    store: Arc<FileCurveStore>,
    op_tx: OperationSender,
    op_rx: mpsc::Receiver<Operation>,
    nav_tx: NavigationSender,
    nav_rx: mpsc::Receiver<NavigationAction>,
}

impl CurveLensApp {
    /// Create a new application instance over the given store.
    pub fn new(state: AppState, store: Arc<FileCurveStore>) -> Self {
        let (op_tx, op_rx) = mpsc::channel();
        let (nav_tx, nav_rx) = mpsc::channel();
        Self {
            state,
            curve_list: CurveListView::new(store.clone()),
            table_state: TableState::default(),
            store,
            op_tx,
            op_rx,
            nav_tx,
            nav_rx,
        }
    }

    /// Rebuild the navigator catalog from the store.
    fn reload_catalog(&mut self) {
        match self.store.catalog() {
            Ok((catalog, warnings)) => {
                for warning in &warnings {
                    tracing::warn!(warning = %warning, "Catalog warning");
                }
                let message = format!("Catalog reloaded: {} log(s).", catalog.log_count());
                self.state.catalog = catalog;
                self.state.status_message = message.clone();
                self.state.notify(NotificationLevel::Info, message);
            }
            Err(e) => {
                tracing::error!(error = %e, "Catalog reload failed");
                self.state
                    .notify(NotificationLevel::Error, format!("Catalog reload failed: {e}"));
            }
        }
    }

    /// Write the requested rows to a file picked by the user.
    fn export(&mut self, request: ExportRequest) {
        let (label, extension, default_name) = match request.format {
            ExportFormat::Csv => ("CSV", "csv", "curves.csv"),
            ExportFormat::Json => ("JSON", "json", "curves.json"),
        };
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(label, &[extension])
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        let file = match std::fs::File::create(&dest) {
            Ok(f) => f,
            Err(e) => {
                self.state
                    .notify(NotificationLevel::Error, format!("Cannot create file: {e}"));
                return;
            }
        };
        let result = match request.format {
            ExportFormat::Csv => crate::core::export::export_csv(&request.rows, file, &dest),
            ExportFormat::Json => crate::core::export::export_json(&request.rows, file, &dest),
        };
        match result {
            Ok(n) => {
                let message = format!("Exported {n} curve(s) to {label}.");
                tracing::info!(path = %dest.display(), curves = n, "Export complete");
                self.state.status_message = message.clone();
                self.state.notify(NotificationLevel::Info, message);
            }
            Err(e) => {
                self.state
                    .notify(NotificationLevel::Error, format!("{label} export failed: {e}"));
            }
        }
    }

    fn selected_path(&self) -> String {
        let nav = &self.state.navigation;
        [
            nav.selected_well.as_ref().map(|w| w.name.as_str()),
            nav.selected_wellbore.as_ref().map(|wb| wb.name.as_str()),
            nav.selected_log.as_ref().map(|l| l.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" / ")
    }
}

impl eframe::App for CurveLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain channels first so a menu opened last frame is in place before
        // the panels below see this frame's input.
        while let Ok(action) = self.nav_rx.try_recv() {
            tracing::debug!(action = ?action, "Navigation");
            self.state.navigate(action);
        }
        while let Ok(operation) = self.op_rx.try_recv() {
            self.state.apply_operation(operation);
        }

        let context = self.state.navigation.context();
        if self.curve_list.sync_selection(&context) {
            self.state.status_message = match &context.log {
                Some(log) => format!("Loading curves for {}...", log.name),
                None => "No log selected.".to_string(),
            };
        }

        for error in self.curve_list.poll() {
            self.state
                .notify(NotificationLevel::Error, format!("Failed to load curves: {error}"));
        }

        if self.curve_list.is_fetching() {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                crate::util::constants::FETCH_POLL_INTERVAL_MS,
            ));
        }

        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload Catalog").clicked() {
                        self.reload_catalog();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let theme_label = if self.state.dark_mode {
                        "Light Theme"
                    } else {
                        "Dark Theme"
                    };
                    if ui.button(theme_label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        let path = self.selected_path();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(server) = &self.state.navigation.selected_server {
                    ui.label(egui::RichText::new(&server.name).strong());
                    ui.separator();
                }
                if !path.is_empty() {
                    ui.label(&path);
                    ui.separator();
                }
                let last_error = self
                    .state
                    .notifications
                    .last()
                    .filter(|n| n.level == NotificationLevel::Error);
                let colour = if last_error.is_some_and(|n| n.message == self.state.status_message) {
                    ui::theme::ERROR_TEXT
                } else {
                    ui::theme::STATUS_TEXT
                };
                ui.label(egui::RichText::new(&self.state.status_message).color(colour));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.curve_list.is_fetching() {
                        ui.spinner();
                    }
                    if self.state.debug_mode {
                        ui.label(
                            egui::RichText::new(format!(
                                "discarded fetches: {}",
                                self.curve_list.discarded_fetches()
                            ))
                            .small()
                            .weak(),
                        );
                    }
                });
            });
        });

        // Left sidebar
        egui::SidePanel::left("navigator")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("navigator_scroll")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::navigator::render(
                            ui,
                            &self.state.catalog,
                            &self.state.navigation,
                            &self.nav_tx,
                        );
                    });
            });

        // Central panel (curve list)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::curve_list::render(
                ui,
                &self.curve_list,
                &mut self.table_state,
                &context,
                Dispatch {
                    operations: &self.op_tx,
                    navigation: &self.nav_tx,
                },
                self.state.dark_mode,
            );
        });

        // Context menu overlay
        if let Some((menu, position)) = self.state.context_menu.clone() {
            if let Some(request) = ui::panels::context_menu::render(ctx, &menu, position) {
                if request.rows.is_empty() {
                    self.state.status_message = "No curves to export.".to_string();
                } else {
                    self.export(request);
                }
            }
        }

        ui::panels::about::render(ctx, &mut self.state);
    }
}
