// CurveLens - app/operations.rs
//
// Operation dispatch: the channel through which views ask the shell to show
// things they do not own, such as context menus.

use crate::app::navigation::NavigationSender;
use crate::core::model::{CurveRow, LogObject, ServerRef};
use crate::util::constants::{CONTEXT_MENU_OFFSET_X, CONTEXT_MENU_OFFSET_Y};
use std::sync::mpsc;

/// Channel handle views use to dispatch operations.
pub type OperationSender = mpsc::Sender<Operation>;

/// Pointer or keyboard event that requested a context menu, in screen points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

/// Screen position a menu is anchored at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPosition {
    pub x: f32,
    pub y: f32,
}

/// Resolve where a context menu opened by `event` is anchored.
pub fn context_menu_position(event: &PointerEvent) -> MenuPosition {
    MenuPosition {
        x: event.x - CONTEXT_MENU_OFFSET_X,
        y: event.y - CONTEXT_MENU_OFFSET_Y,
    }
}

/// Everything the curve context menu needs to build and run its commands.
#[derive(Debug, Clone)]
pub struct CurveContextMenu {
    pub checked_rows: Vec<CurveRow>,
    pub selected_log: Option<LogObject>,
    pub selected_server: Option<ServerRef>,
    pub operations: OperationSender,
    pub navigation: NavigationSender,
}

/// Operation requested by a view.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Display `menu` at `position`.
    DisplayContextMenu {
        menu: CurveContextMenu,
        position: MenuPosition,
    },
    /// Close any open context menu.
    HideContextMenu,
}

/// Receiver of operations. Owned outside the views that dispatch to it.
pub trait OperationDispatcher {
    fn dispatch(&self, operation: Operation);
}

impl OperationDispatcher for OperationSender {
    fn dispatch(&self, operation: Operation) {
        if self.send(operation).is_err() {
            tracing::warn!("Operation receiver dropped; operation ignored");
        }
    }
}
