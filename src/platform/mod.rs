// CurveLens - platform/mod.rs
//
// Platform layer: config and data directories, config.toml, and the
// file-backed curve store.
// Dependencies: app (transport trait), core (model), directories, walkdir.
// Must NOT depend on: ui.

pub mod config;
pub mod store;
