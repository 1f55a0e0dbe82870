// CurveLens - ui/panels/curve_list.rs
//
// Central panel: hands the curve list model to the renderer it names and
// routes right-clicks back to the view's context-menu callback.

use crate::app::curve_list::{CurveListModel, CurveListView};
use crate::app::navigation::{NavigationSender, SelectionContext};
use crate::app::operations::OperationSender;
use crate::core::renderer::RendererKind;
use crate::ui::panels::table::{TableProps, TableState};
use crate::ui::panels::{standard_table, virtual_table};
use crate::ui::theme;

/// Channels the table forwards to the context-menu callback.
pub struct Dispatch<'a> {
    pub operations: &'a OperationSender,
    pub navigation: &'a NavigationSender,
}

/// Render the curve list (central area).
pub fn render(
    ui: &mut egui::Ui,
    view: &CurveListView,
    table_state: &mut TableState,
    context: &SelectionContext,
    dispatch: Dispatch<'_>,
    dark_mode: bool,
) {
    let (renderer, index_mode, columns, rows, checkable_rows, dataset_id) = match view.model() {
        CurveListModel::Table {
            renderer,
            index_mode,
            columns,
            rows,
            checkable_rows,
            dataset_id,
        } => (renderer, index_mode, columns, rows, checkable_rows, dataset_id),
        CurveListModel::Empty => {
            ui.centered_and_justified(|ui| {
                if view.is_fetching() {
                    ui.spinner();
                } else if let Some(error) = view.load_error() {
                    ui.label(
                        egui::RichText::new(format!("Could not load curves: {error}"))
                            .color(theme::ERROR_TEXT),
                    );
                } else if view.selected_key().is_none() {
                    ui.label("Select a log to view its curves.");
                }
            });
            return;
        }
    };

    table_state.sync_dataset(dataset_id);

    ui.horizontal(|ui| {
        if let Some(log) = &context.log {
            ui.heading(&log.name);
        }
        ui.label(
            egui::RichText::new(index_mode.label())
                .color(theme::index_mode_colour(index_mode))
                .strong(),
        );
        ui.label(format!(
            "{} curve(s), {} checked",
            rows.len(),
            table_state.checked_count()
        ));
    });
    ui.separator();

    let props = TableProps {
        columns,
        rows,
        checkable_rows,
        dark_mode,
    };

    let request = match renderer {
        RendererKind::Standard => standard_table::render(ui, &props, table_state),
        RendererKind::Virtualized => virtual_table::render(ui, &props, table_state),
    };

    if let Some(request) = request {
        view.open_context_menu(
            &request.event,
            request.checked_rows,
            context,
            dispatch.operations,
            dispatch.navigation,
        );
    }
}
