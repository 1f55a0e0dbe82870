// CurveLens - app/curve_list.rs
//
// Curve list view: the component behind the curve metadata table.
//
//   - Selection watcher: `sync_selection` compares the selected log key with
//     the one last seen and, on change, starts (or cancels) a fetch.
//   - Projection: a loaded dataset is projected into rows and columns in one
//     step, tagged with the selection it was fetched for.
//   - View selection: `model` picks the renderer from the row count, or the
//     empty placeholder while loading / with no log selected.
//   - Context menu: `open_context_menu` packages the checked rows and the
//     current context and dispatches it; the shell renders the menu.

use crate::app::fetch::{FetchManager, FetchOutcome};
use crate::app::navigation::{NavigationSender, SelectionContext};
use crate::app::operations::{
    context_menu_position, CurveContextMenu, Operation, OperationDispatcher, OperationSender,
    PointerEvent,
};
use crate::app::source::CurveMetadataSource;
use crate::core::model::{ColumnDefinition, CurveRow, IndexMode, LogKey};
use crate::core::projection::{self, CurveTable};
use crate::core::renderer::{self, RendererKind};
use crate::util::error::FetchError;
use std::sync::Arc;

/// What the table area should show this frame.
#[derive(Debug, PartialEq)]
pub enum CurveListModel<'a> {
    /// Placeholder: no log selected, or the selected log is still loading.
    Empty,

    /// A projected dataset and the renderer chosen for it.
    Table {
        renderer: RendererKind,
        index_mode: IndexMode,
        columns: &'a [ColumnDefinition],
        rows: &'a [CurveRow],
        checkable_rows: bool,
        /// Changes whenever a new dataset is committed. Table primitives use
        /// it to reset per-dataset UI state such as checked rows.
        dataset_id: u64,
    },
}

/// Committed dataset.
struct Dataset {
    id: u64,
    key: LogKey,
    table: CurveTable,
}

pub struct CurveListView {
    fetcher: FetchManager,
    /// Outer `None` until the first sync; inner `None` means no log selected.
    watched: Option<Option<LogKey>>,
    /// True from a selection change until its dataset is committed. Stays set
    /// after a failed fetch so the table area remains empty.
    awaiting_dataset: bool,
    load_error: Option<String>,
    dataset: Option<Dataset>,
}

impl CurveListView {
    pub fn new(source: Arc<dyn CurveMetadataSource>) -> Self {
        Self {
            fetcher: FetchManager::new(source),
            watched: None,
            awaiting_dataset: true,
            load_error: None,
            dataset: None,
        }
    }

    /// Observe the current selection. Returns true if the selected log changed
    /// since the last call (the first call always counts as a change).
    pub fn sync_selection(&mut self, context: &SelectionContext) -> bool {
        let key = context.log_key();
        if self.watched.as_ref() == Some(&key) {
            return false;
        }

        tracing::debug!(
            from = ?self.watched.as_ref().and_then(|k| k.as_ref()).map(|k| k.to_string()),
            to = ?key.as_ref().map(|k| k.to_string()),
            "Selected log changed"
        );

        self.watched = Some(key);
        self.awaiting_dataset = true;
        self.load_error = None;
        self.dataset = None;

        match context.log_selection() {
            Some(selection) => {
                self.fetcher.start(selection);
            }
            None => self.fetcher.cancel(),
        }
        true
    }

    /// Apply completed fetches. Returns transport errors for the caller to
    /// surface; cancellations and superseded results never appear here.
    ///
    /// A failed fetch leaves the table area empty and records the error for
    /// the placeholder: there is no retry, the next selection change starts
    /// over.
    pub fn poll(&mut self) -> Vec<FetchError> {
        let mut errors = Vec::new();
        for outcome in self.fetcher.poll() {
            match outcome {
                FetchOutcome::Loaded { selection, curves } => {
                    let key = selection.key();
                    if self.watched.as_ref().and_then(|k| k.as_ref()) != Some(&key) {
                        continue;
                    }
                    let table = projection::project_table(&curves, &selection);
                    tracing::debug!(
                        log = %key,
                        rows = table.rows.len(),
                        mode = table.index_mode.label(),
                        "Curve table projected"
                    );
                    self.dataset = Some(Dataset {
                        id: self.fetcher.generation(),
                        key,
                        table,
                    });
                    self.awaiting_dataset = false;
                }
                FetchOutcome::Failed { error, .. } => {
                    self.load_error = Some(error.to_string());
                    errors.push(error);
                }
            }
        }
        errors
    }

    /// True while a fetch for the selected log has not reported back.
    pub fn is_fetching(&self) -> bool {
        self.fetcher.is_in_flight()
    }

    /// Message of the failed fetch for the selected log, if it failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Key of the log currently being watched.
    pub fn selected_key(&self) -> Option<&LogKey> {
        self.watched.as_ref().and_then(|k| k.as_ref())
    }

    /// Results dropped because a newer selection superseded them.
    pub fn discarded_fetches(&self) -> usize {
        self.fetcher.discarded()
    }

    /// Decide what to render.
    pub fn model(&self) -> CurveListModel<'_> {
        if self.awaiting_dataset || self.selected_key().is_none() {
            return CurveListModel::Empty;
        }
        match &self.dataset {
            Some(dataset) if Some(&dataset.key) == self.selected_key() => CurveListModel::Table {
                renderer: renderer::select_renderer(dataset.table.rows.len()),
                index_mode: dataset.table.index_mode,
                columns: &dataset.table.columns,
                rows: &dataset.table.rows,
                checkable_rows: true,
                dataset_id: dataset.id,
            },
            _ => CurveListModel::Empty,
        }
    }

    /// Context-menu callback for both table renderers.
    ///
    /// Packages `checked_rows` with the current log, server and dispatch
    /// handles, and asks `operations` to display the menu at the position
    /// derived from `event`.
    pub fn open_context_menu(
        &self,
        event: &PointerEvent,
        checked_rows: Vec<CurveRow>,
        context: &SelectionContext,
        operations: &OperationSender,
        navigation: &NavigationSender,
    ) {
        let position = context_menu_position(event);
        tracing::debug!(
            rows = checked_rows.len(),
            x = position.x,
            y = position.y,
            "Opening curve context menu"
        );
        let menu = CurveContextMenu {
            checked_rows,
            selected_log: context.log.clone(),
            selected_server: context.server.clone(),
            operations: operations.clone(),
            navigation: navigation.clone(),
        };
        operations.dispatch(Operation::DisplayContextMenu { menu, position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::navigation::{NavigationAction, NavigationState};
    use crate::app::operations::MenuPosition;
    use crate::app::source::CancelToken;
    use crate::core::model::{
        ContentType, CurveMetadata, LogObject, LogSelection, ServerRef, WellRef, WellboreRef,
    };
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Mutex};
    use std::time::{Duration, Instant};

    /// In-memory source keyed by log uid. Logs listed in `held` block until
    /// released (or cancelled, if `honour_cancel` is set).
    #[derive(Default)]
    struct MemorySource {
        logs: HashMap<String, Vec<CurveMetadata>>,
        held: Mutex<HashMap<String, mpsc::Receiver<()>>>,
        honour_cancel: bool,
        calls: AtomicUsize,
    }

    impl MemorySource {
        fn hold(&self, log_uid: &str) -> mpsc::Sender<()> {
            let (tx, rx) = mpsc::channel();
            self.held.lock().unwrap().insert(log_uid.to_string(), rx);
            tx
        }
    }

    impl CurveMetadataSource for MemorySource {
        fn fetch_curve_metadata(
            &self,
            _well_uid: &str,
            _wellbore_uid: &str,
            log_uid: &str,
            cancel: &CancelToken,
        ) -> Result<Vec<CurveMetadata>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.held.lock().unwrap().remove(log_uid);
            if let Some(gate) = gate {
                loop {
                    match gate.recv_timeout(Duration::from_millis(5)) {
                        Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                        Err(mpsc::RecvTimeoutError::Timeout) => {}
                    }
                    if self.honour_cancel && cancel.is_cancelled() {
                        return Err(FetchError::Cancelled);
                    }
                }
            }
            self.logs
                .get(log_uid)
                .cloned()
                .ok_or_else(|| FetchError::Transport {
                    log_uid: log_uid.to_string(),
                    reason: "no such log".to_string(),
                })
        }
    }

    fn depth_curve(uid: &str, mnemonic: &str) -> CurveMetadata {
        CurveMetadata {
            uid: uid.to_string(),
            mnemonic: mnemonic.to_string(),
            unit: "m".to_string(),
            mnem_alias: String::new(),
            class_witsml: String::new(),
            min_depth_index: Some(0.0),
            max_depth_index: Some(100.0),
            min_date_time_index: None,
            max_date_time_index: None,
        }
    }

    fn time_curves(n: usize) -> Vec<CurveMetadata> {
        let start: chrono::DateTime<chrono::Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        (0..n)
            .map(|i| CurveMetadata {
                uid: format!("c{i}"),
                mnemonic: format!("CH{i:03}"),
                unit: String::new(),
                mnem_alias: String::new(),
                class_witsml: String::new(),
                min_depth_index: None,
                max_depth_index: None,
                min_date_time_index: Some(start),
                max_date_time_index: Some(start + chrono::Duration::minutes(i as i64)),
            })
            .collect()
    }

    fn selection(log_uid: &str) -> LogSelection {
        LogSelection {
            well: WellRef {
                uid: "W1".to_string(),
                name: "Well One".to_string(),
            },
            wellbore: WellboreRef {
                uid: "WB1".to_string(),
                name: "Bore One".to_string(),
            },
            log: LogObject {
                uid: log_uid.to_string(),
                name: log_uid.to_string(),
                index_type: None,
            },
        }
    }

    fn context_for(log_uid: &str) -> SelectionContext {
        let mut nav = NavigationState::new(Some(ServerRef {
            name: "Test".to_string(),
            url: "mem://".to_string(),
        }));
        nav.apply(NavigationAction::SelectLog(selection(log_uid)));
        nav.context()
    }

    fn wait_for_table(view: &mut CurveListView) -> Vec<FetchError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut errors = Vec::new();
        while Instant::now() < deadline {
            errors.extend(view.poll());
            if !view.is_fetching() || !errors.is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        errors
    }

    fn row_mnemonics(view: &CurveListView) -> Vec<String> {
        match view.model() {
            CurveListModel::Table { rows, .. } => rows.iter().map(|r| r.mnemonic.clone()).collect(),
            CurveListModel::Empty => Vec::new(),
        }
    }

    #[test]
    fn test_depth_scenario_uses_standard_renderer() {
        let mut source = MemorySource::default();
        source.logs.insert(
            "L1".to_string(),
            vec![depth_curve("1", "DEPT"), depth_curve("2", "GR")],
        );
        let mut view = CurveListView::new(Arc::new(source));

        assert!(view.sync_selection(&context_for("L1")));
        assert_eq!(view.model(), CurveListModel::Empty);
        assert!(wait_for_table(&mut view).is_empty());

        match view.model() {
            CurveListModel::Table {
                renderer,
                index_mode,
                columns,
                rows,
                checkable_rows,
                ..
            } => {
                assert_eq!(renderer, RendererKind::Standard);
                assert_eq!(index_mode, IndexMode::Depth);
                assert_eq!(rows.len(), 2);
                assert_eq!(columns[1].content_type, ContentType::Number);
                assert_eq!(columns[2].content_type, ContentType::Number);
                assert!(checkable_rows);
            }
            CurveListModel::Empty => panic!("expected a table"),
        }
    }

    #[test]
    fn test_time_scenario_uses_virtualized_renderer() {
        let mut source = MemorySource::default();
        source.logs.insert("T1".to_string(), time_curves(150));
        let mut view = CurveListView::new(Arc::new(source));

        view.sync_selection(&context_for("T1"));
        assert!(wait_for_table(&mut view).is_empty());

        match view.model() {
            CurveListModel::Table {
                renderer,
                columns,
                rows,
                ..
            } => {
                assert_eq!(renderer, RendererKind::Virtualized);
                assert_eq!(rows.len(), 150);
                assert_eq!(columns[1].content_type, ContentType::DateTime);
                assert_eq!(columns[2].content_type, ContentType::DateTime);
            }
            CurveListModel::Empty => panic!("expected a table"),
        }
    }

    #[test]
    fn test_superseded_fetch_never_reaches_view() {
        let mut source = MemorySource::default();
        source.logs.insert("S1".to_string(), vec![depth_curve("1", "OLD")]);
        source.logs.insert("S2".to_string(), vec![depth_curve("2", "NEW")]);
        // S1 ignores cancellation and completes with data after S2 resolved.
        let release_s1 = source.hold("S1");
        let source = Arc::new(source);
        let mut view = CurveListView::new(source.clone());

        view.sync_selection(&context_for("S1"));
        view.sync_selection(&context_for("S2"));
        assert!(wait_for_table(&mut view).is_empty());
        assert_eq!(row_mnemonics(&view), vec!["NEW"]);

        release_s1.send(()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while view.discarded_fetches() == 0 && Instant::now() < deadline {
            assert!(view.poll().is_empty());
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(view.discarded_fetches(), 1);
        assert_eq!(row_mnemonics(&view), vec!["NEW"]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cancelled_fetch_is_not_an_error() {
        let mut source = MemorySource {
            honour_cancel: true,
            ..Default::default()
        };
        source.logs.insert("S1".to_string(), vec![depth_curve("1", "OLD")]);
        let _gate = source.hold("S1");
        let mut view = CurveListView::new(Arc::new(source));

        view.sync_selection(&context_for("S1"));
        view.sync_selection(&SelectionContext::default());

        let deadline = Instant::now() + Duration::from_secs(5);
        while view.discarded_fetches() == 0 && Instant::now() < deadline {
            assert!(view.poll().is_empty());
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(view.discarded_fetches(), 1);
        assert_eq!(view.model(), CurveListModel::Empty);
    }

    #[test]
    fn test_no_selection_issues_no_fetch() {
        let source = Arc::new(MemorySource::default());
        let mut view = CurveListView::new(source.clone());

        assert!(view.sync_selection(&SelectionContext::default()));
        assert!(!view.sync_selection(&SelectionContext::default()));
        assert!(view.poll().is_empty());
        assert_eq!(view.model(), CurveListModel::Empty);
        assert!(!view.is_fetching());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_same_log_does_not_refetch() {
        let mut source = MemorySource::default();
        source.logs.insert("L1".to_string(), vec![depth_curve("1", "GR")]);
        let source = Arc::new(source);
        let mut view = CurveListView::new(source.clone());

        assert!(view.sync_selection(&context_for("L1")));
        assert!(!view.sync_selection(&context_for("L1")));
        wait_for_table(&mut view);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transport_error_is_returned_and_view_stays_empty() {
        let source = Arc::new(MemorySource::default());
        let mut view = CurveListView::new(source);

        view.sync_selection(&context_for("MISSING"));
        let errors = wait_for_table(&mut view);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], FetchError::Transport { .. }));
        assert_eq!(view.model(), CurveListModel::Empty);
        assert!(!view.is_fetching());
        assert!(view.load_error().is_some_and(|e| e.contains("MISSING")));
    }

    #[test]
    fn test_new_selection_clears_load_error() {
        let mut source = MemorySource::default();
        source.logs.insert("L1".to_string(), vec![depth_curve("1", "GR")]);
        let mut view = CurveListView::new(Arc::new(source));

        view.sync_selection(&context_for("MISSING"));
        assert_eq!(wait_for_table(&mut view).len(), 1);
        assert!(view.load_error().is_some());

        view.sync_selection(&context_for("L1"));
        assert!(view.load_error().is_none());
        assert!(wait_for_table(&mut view).is_empty());
        assert_eq!(row_mnemonics(&view), vec!["GR"]);
    }

    #[test]
    fn test_reselecting_held_log_shows_latest_fetch_only() {
        let mut source = MemorySource::default();
        source.logs.insert("A".to_string(), vec![depth_curve("1", "GR")]);
        source.logs.insert("B".to_string(), vec![depth_curve("2", "RHOB")]);
        // Only the first fetch of A is held; the gate is consumed by that call.
        let release_first_a = source.hold("A");
        let source = Arc::new(source);
        let mut view = CurveListView::new(source.clone());

        view.sync_selection(&context_for("A"));
        // Let the first A fetch take the gate before A is requested again.
        let deadline = Instant::now() + Duration::from_secs(5);
        while !source.held.lock().unwrap().is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        view.sync_selection(&context_for("B"));
        view.sync_selection(&context_for("A"));
        assert!(wait_for_table(&mut view).is_empty());

        match view.model() {
            CurveListModel::Table { dataset_id, .. } => assert_eq!(dataset_id, 3),
            CurveListModel::Empty => panic!("expected a table"),
        }
        assert_eq!(row_mnemonics(&view), vec!["GR"]);

        release_first_a.send(()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while view.discarded_fetches() < 2 && Instant::now() < deadline {
            assert!(view.poll().is_empty());
            std::thread::sleep(Duration::from_millis(5));
        }
        // B (generation 2) and the first A (generation 1) were both superseded.
        assert_eq!(view.discarded_fetches(), 2);
        match view.model() {
            CurveListModel::Table { dataset_id, .. } => assert_eq!(dataset_id, 3),
            CurveListModel::Empty => panic!("expected a table"),
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_empty_dataset_renders_zero_rows() {
        let mut source = MemorySource::default();
        source.logs.insert("E".to_string(), Vec::new());
        let mut view = CurveListView::new(Arc::new(source));

        view.sync_selection(&context_for("E"));
        assert!(wait_for_table(&mut view).is_empty());
        match view.model() {
            CurveListModel::Table { rows, renderer, .. } => {
                assert!(rows.is_empty());
                assert_eq!(renderer, RendererKind::Standard);
            }
            CurveListModel::Empty => panic!("empty dataset is still a table"),
        }
    }

    #[test]
    fn test_context_menu_receives_checked_rows_and_context() {
        let mut source = MemorySource::default();
        source.logs.insert(
            "L1".to_string(),
            vec![
                depth_curve("1", "DEPT"),
                depth_curve("2", "GR"),
                depth_curve("3", "RHOB"),
            ],
        );
        let mut view = CurveListView::new(Arc::new(source));
        let context = context_for("L1");
        view.sync_selection(&context);
        wait_for_table(&mut view);

        let checked: Vec<CurveRow> = match view.model() {
            CurveListModel::Table { rows, .. } => rows[..2].to_vec(),
            CurveListModel::Empty => panic!("expected a table"),
        };

        let (op_tx, op_rx) = mpsc::channel();
        let (nav_tx, _nav_rx) = mpsc::channel();
        view.open_context_menu(
            &PointerEvent { x: 40.0, y: 60.0 },
            checked.clone(),
            &context,
            &op_tx,
            &nav_tx,
        );

        match op_rx.try_recv() {
            Ok(Operation::DisplayContextMenu { menu, position }) => {
                assert_eq!(menu.checked_rows, checked);
                assert_eq!(menu.selected_log.unwrap().uid, "L1");
                assert_eq!(menu.selected_server.unwrap().name, "Test");
                assert_eq!(position, MenuPosition { x: 38.0, y: 56.0 });
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }
}
