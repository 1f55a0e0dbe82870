// CurveLens - app/mod.rs
//
// Application layer: navigation state, fetch orchestration, the curve list
// view, and operation dispatch.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod curve_list;
pub mod fetch;
pub mod navigation;
pub mod operations;
pub mod source;
pub mod state;
