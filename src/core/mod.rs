// CurveLens - core/mod.rs
//
// Core logic layer: data model, row projection, renderer selection, export.
// Dependencies: serde, chrono, csv for export.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod model;
pub mod projection;
pub mod renderer;
