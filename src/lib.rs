// CurveLens - lib.rs
//
// Library entry point, exposing all non-GUI modules for integration testing
// and programmatic use.
//
// The eframe application lives in `gui.rs`, part of the binary only.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
