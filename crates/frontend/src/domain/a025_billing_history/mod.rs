//! Billing History widget
//!
//! - state.rs: `{periods, error}` store and its transitions
//! - view_model.rs: pure derivations feeding the tables
//! - actions.rs: statement download and adjustment reversal commands
//! - lifecycle.rs: registry hooks installed while mounted
//! - ui/: Leptos components

pub mod actions;
pub mod lifecycle;
pub mod state;
pub mod ui;
pub mod view_model;

pub use ui::BillingHistory;
