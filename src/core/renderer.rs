// CurveLens - core/renderer.rs
//
// Rendering strategy selection for the curve table. Purely a function of the
// row count: the choice must never change what data is shown or how rows are
// checked, only how they are laid out.

use crate::util::constants::VIRTUALIZATION_THRESHOLD;

/// Table rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// Every row laid out each frame.
    Standard,
    /// Only the visible window of rows laid out each frame.
    Virtualized,
}

/// Choose the renderer for `row_count` rows.
pub fn select_renderer(row_count: usize) -> RendererKind {
    if row_count < VIRTUALIZATION_THRESHOLD {
        RendererKind::Standard
    } else {
        RendererKind::Virtualized
    }
}
