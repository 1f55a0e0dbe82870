// CurveLens - app/navigation.rs
//
// Navigation state container: which server, well, wellbore and log are
// selected. Mutated only by reducing `NavigationAction`s; views read an
// immutable `SelectionContext` snapshot each frame.

use crate::core::model::{LogKey, LogObject, LogSelection, ServerRef, WellRef, WellboreRef};
use std::sync::mpsc;

/// Channel handle views use to request navigation changes.
pub type NavigationSender = mpsc::Sender<NavigationAction>;

/// Requested navigation change.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationAction {
    /// Switch server. Clears everything below it.
    SelectServer(ServerRef),
    /// Select a well. Clears wellbore and log.
    SelectWell(WellRef),
    /// Select a wellbore (and its well). Clears the log.
    SelectWellbore { well: WellRef, wellbore: WellboreRef },
    /// Select a log (and its well and wellbore).
    SelectLog(LogSelection),
    /// Clear the selected log, keeping well and wellbore.
    DeselectLog,
}

/// Current selection path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    pub selected_server: Option<ServerRef>,
    pub selected_well: Option<WellRef>,
    pub selected_wellbore: Option<WellboreRef>,
    pub selected_log: Option<LogObject>,
}

impl NavigationState {
    pub fn new(server: Option<ServerRef>) -> Self {
        Self {
            selected_server: server,
            ..Default::default()
        }
    }

    /// Apply one navigation action.
    pub fn apply(&mut self, action: NavigationAction) {
        tracing::debug!(action = ?action, "Navigation action");
        match action {
            NavigationAction::SelectServer(server) => {
                *self = Self::new(Some(server));
            }
            NavigationAction::SelectWell(well) => {
                self.selected_well = Some(well);
                self.selected_wellbore = None;
                self.selected_log = None;
            }
            NavigationAction::SelectWellbore { well, wellbore } => {
                self.selected_well = Some(well);
                self.selected_wellbore = Some(wellbore);
                self.selected_log = None;
            }
            NavigationAction::SelectLog(selection) => {
                self.selected_well = Some(selection.well);
                self.selected_wellbore = Some(selection.wellbore);
                self.selected_log = Some(selection.log);
            }
            NavigationAction::DeselectLog => {
                self.selected_log = None;
            }
        }
    }

    /// Immutable snapshot handed to views.
    pub fn context(&self) -> SelectionContext {
        SelectionContext {
            server: self.selected_server.clone(),
            well: self.selected_well.clone(),
            wellbore: self.selected_wellbore.clone(),
            log: self.selected_log.clone(),
        }
    }
}

/// Snapshot of the selection path at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionContext {
    pub server: Option<ServerRef>,
    pub well: Option<WellRef>,
    pub wellbore: Option<WellboreRef>,
    pub log: Option<LogObject>,
}

impl SelectionContext {
    /// The selected log with its owning well and wellbore. `None` unless all
    /// three are selected.
    pub fn log_selection(&self) -> Option<LogSelection> {
        Some(LogSelection {
            well: self.well.clone()?,
            wellbore: self.wellbore.clone()?,
            log: self.log.clone()?,
        })
    }

    /// Key of the selected log, if a full log path is selected.
    pub fn log_key(&self) -> Option<LogKey> {
        match (&self.well, &self.wellbore, &self.log) {
            (Some(well), Some(wellbore), Some(log)) => Some(LogKey {
                well_uid: well.uid.clone(),
                wellbore_uid: wellbore.uid.clone(),
                log_uid: log.uid.clone(),
            }),
            _ => None,
        }
    }
}
