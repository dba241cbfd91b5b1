//! Goals module - savings target and progress measurement.

mod goals_model;

pub use goals_model::{Goal, GoalProgress};
