//! tsunamizones - Classify tsunami hazard areas and toggle evacuate/safe overlays

pub mod api;
pub mod classify;
pub mod config;
pub mod display;
pub mod domain;
pub mod export;
pub mod popup;
