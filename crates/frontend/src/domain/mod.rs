pub mod a025_billing_history;
