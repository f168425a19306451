//! Billing History widget UI
//!
//! Structure:
//! - page.rs: root component, state wiring and tab navigation
//! - period_tab.rs: tab label of one billing period
//! - main_table.rs: transaction table of the selected period
//! - nested_tables.rs: BAN and CTN detail tables of an expanded row
//! - reverse_button.rs: adjustment reversal action

mod main_table;
mod nested_tables;
mod page;
mod period_tab;
mod reverse_button;

pub use page::{BillingHistory, HostHandle};
