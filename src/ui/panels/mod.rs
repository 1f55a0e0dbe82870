// CurveLens - ui/panels/mod.rs

pub mod about;
pub mod context_menu;
pub mod curve_list;
pub mod navigator;
pub mod standard_table;
pub mod table;
pub mod virtual_table;
