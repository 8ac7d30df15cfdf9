//! Shared constant tables for the museum walkthrough.
//!
//! Corridor dimensions, proximity ranges and navigation tuning live here so
//! the layout engine, the proximity loader and the navigation controller
//! agree on a single set of numbers.

pub mod layout;
pub mod navigation;
pub mod proximity;
pub mod render_settings;
pub mod tier;
