//! Контракты истории биллинга: данные, которые хост передаёт виджету,
//! и сообщения, которые виджет отправляет обратно.

pub mod aggregate;
pub mod props;
pub mod workflow;

pub use aggregate::{
    AdjustmentReversalInfo, BanLine, BillingEvent, BillingPeriod, CtnLine, ReversalAttributes,
    NOW_MONTH_NAME, START_AT_ZERO_MONTH_NAME,
};
pub use props::{
    decode_update_payload, pdf_error_message, BillingHistoryProps, ComponentProperties, ParentProps,
    Workflows,
};
pub use workflow::{WorkflowConfig, WorkflowHeader, WorkflowOutcome};
