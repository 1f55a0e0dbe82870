// CurveLens - app/state.rs
//
// Application state for the desktop shell: navigation, catalog, the open
// context menu, and the notification list. Owned by the eframe::App.

use crate::app::navigation::{NavigationAction, NavigationState};
use crate::app::operations::{CurveContextMenu, MenuPosition, Operation};
use crate::core::model::{Catalog, ServerRef};
use crate::util::constants::MAX_NOTIFICATIONS;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// One entry in the notification list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Current selection path.
    pub navigation: NavigationState,

    /// Wells, wellbores and logs available from the store.
    pub catalog: Catalog,

    /// Context menu currently displayed, with its anchor.
    pub context_menu: Option<(CurveContextMenu, MenuPosition)>,

    /// Most recent notifications, newest last.
    pub notifications: Vec<Notification>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether to show the About window.
    pub show_about: bool,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    pub fn new(server: ServerRef, catalog: Catalog, debug_mode: bool) -> Self {
        let logs = catalog.log_count();
        Self {
            navigation: NavigationState::new(Some(server)),
            catalog,
            context_menu: None,
            notifications: Vec::new(),
            status_message: format!("Ready. {logs} log(s) available."),
            show_about: false,
            dark_mode: true,
            debug_mode,
        }
    }

    /// Record a notification, dropping the oldest beyond the cap.
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        if level == NotificationLevel::Error {
            self.status_message = message.clone();
        }
        self.notifications.push(Notification { level, message });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    /// Apply a navigation action. Any open context menu belongs to the old
    /// selection and is closed.
    pub fn navigate(&mut self, action: NavigationAction) {
        self.navigation.apply(action);
        self.context_menu = None;
    }

    /// Apply a dispatched operation.
    pub fn apply_operation(&mut self, operation: Operation) {
        match operation {
            Operation::DisplayContextMenu { menu, position } => {
                self.context_menu = Some((menu, position));
            }
            Operation::HideContextMenu => self.context_menu = None,
        }
    }
}
