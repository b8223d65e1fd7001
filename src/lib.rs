//! starlight - character name suggestions and event countdowns
//!
//! Library crate exposing the components used by the binary: the names
//! cache and its sources, the fuzzy matcher, suggestion rendering, the
//! countdown ticker and the interactive view.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod config;
pub mod countdown;
pub mod fuzzy;
pub mod loader;
pub mod logging;
pub mod names;
pub mod schedule;
pub mod suggest;

pub mod ui;
