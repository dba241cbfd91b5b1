//! Tracker module - the periodic refresh driver.

mod tracker_service;

pub use tracker_service::{TrackerHandle, TrackerService, TrackerState, DEFAULT_REFRESH_PERIOD};

#[cfg(test)]
mod tracker_service_tests;
