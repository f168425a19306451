//! Сообщения движку workflow через шину сообщений хоста

use super::aggregate::AdjustmentReversalInfo;
use crate::shared::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const INIT_EVENT: &str = "INIT";
pub const DEFAULT_SUBMIT_EVENT: &str = "SUBMIT";
pub const STATE_CHANGE_EVENT: &str = "STATE.CHANGE";

/// Настройки workflow компонента (`properties.workflows.*`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowConfig {
    #[serde(default, deserialize_with = "lenient::string")]
    pub workflow: String,
    /// Ключ в `parentProps.datasources`
    #[serde(default, deserialize_with = "lenient::string")]
    pub datasource: String,
    #[serde(default, deserialize_with = "lenient::seq_or_empty")]
    pub success_states: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::seq_or_empty")]
    pub error_states: Vec<Value>,
    #[serde(default = "default_submit_event")]
    pub submit_event: String,
    #[serde(default)]
    pub response_mapping: Value,
}

fn default_submit_event() -> String {
    DEFAULT_SUBMIT_EVENT.to_string()
}

/// Финальное состояние, о котором сообщил движок workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowHeader {
    pub registration_id: String,
    pub workflow: String,
    pub event_type: String,
}

impl WorkflowConfig {
    /// `WF.<workflow>.<event>`
    pub fn topic(&self, event: &str) -> String {
        format!("WF.{}.{}", self.workflow, event)
    }

    pub fn init_topic(&self) -> String {
        self.topic(INIT_EVENT)
    }

    pub fn submit_topic(&self) -> String {
        self.topic(&self.submit_event)
    }

    pub fn state_change_topic(&self) -> String {
        self.topic(STATE_CHANGE_EVENT)
    }

    /// `<workflow>.<sequenceNumber>`; без номера подставляется "undefined",
    /// как и на стороне хоста.
    pub fn registration_id(&self, sequence_number: Option<&str>) -> String {
        format!("{}.{}", self.workflow, sequence_number.unwrap_or("undefined"))
    }

    fn header(&self, registration_id: &str, event_type: &str) -> WorkflowHeader {
        WorkflowHeader {
            registration_id: registration_id.to_string(),
            workflow: self.workflow.clone(),
            event_type: event_type.to_string(),
        }
    }

    pub fn init_message(&self, registration_id: &str) -> Value {
        json!({ "header": self.header(registration_id, INIT_EVENT) })
    }

    /// Сообщение SUBMIT на сторно одной корректировки
    pub fn reversal_submit_message(
        &self,
        registration_id: &str,
        datasource: &Value,
        billing_account_number: Option<&Value>,
        info: &AdjustmentReversalInfo,
    ) -> Value {
        let amount = info
            .reversal_attributes
            .amount
            .as_deref()
            .unwrap_or("undefined");
        json!({
            "header": self.header(registration_id, &self.submit_event),
            "body": {
                "datasource": datasource,
                "request": {
                    "body": {
                        "billingAccountNumber": billing_account_number,
                        "freeUserText": format!("${} adjustment reversed.", amount),
                        "adjustmentReversalInfo": info,
                    }
                },
                "responseMapping": self.response_mapping,
            }
        })
    }

    /// Классифицирует событие `STATE.CHANGE` по `value`; `None`, пока
    /// workflow ещё выполняется.
    pub fn outcome_of(&self, event_data: &Value) -> Option<WorkflowOutcome> {
        let status = event_data.get("value").unwrap_or(&Value::Null);
        if self.success_states.contains(status) {
            Some(WorkflowOutcome::Succeeded)
        } else if self.error_states.contains(status) {
            Some(WorkflowOutcome::Failed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WorkflowConfig {
        serde_json::from_value(json!({
            "workflow": "REVERSEADJUSTMENT",
            "datasource": "ds_reverse",
            "successStates": ["success"],
            "errorStates": ["error", "failed"],
            "responseMapping": {"success": {"messageExpr": "message"}}
        }))
        .unwrap()
    }

    #[test]
    fn test_topics_and_registration_id() {
        let config = config();
        assert_eq!(config.submit_event, "SUBMIT");
        assert_eq!(config.init_topic(), "WF.REVERSEADJUSTMENT.INIT");
        assert_eq!(config.submit_topic(), "WF.REVERSEADJUSTMENT.SUBMIT");
        assert_eq!(config.state_change_topic(), "WF.REVERSEADJUSTMENT.STATE.CHANGE");
        assert_eq!(config.registration_id(Some("77")), "REVERSEADJUSTMENT.77");
        assert_eq!(config.registration_id(None), "REVERSEADJUSTMENT.undefined");
    }

    #[test]
    fn test_custom_submit_event() {
        let config: WorkflowConfig =
            serde_json::from_value(json!({"workflow": "WF1", "submitEvent": "REVERSE"})).unwrap();
        assert_eq!(config.submit_topic(), "WF.WF1.REVERSE");
    }

    #[test]
    fn test_submit_message_shape() {
        let config = config();
        let info = AdjustmentReversalInfo::from(json!({
            "eligibleForReversal": true,
            "reversalAttributes": {"sequenceNumber": "77", "amount": "15.00"}
        }));
        let message = config.reversal_submit_message(
            "REVERSEADJUSTMENT.77",
            &json!({"baseUri": "/billing"}),
            Some(&json!("123456789")),
            &info,
        );

        assert_eq!(message["header"]["eventType"], "SUBMIT");
        assert_eq!(message["header"]["registrationId"], "REVERSEADJUSTMENT.77");
        let body = &message["body"]["request"]["body"];
        assert_eq!(body["billingAccountNumber"], "123456789");
        assert_eq!(body["freeUserText"], "$15.00 adjustment reversed.");
        assert_eq!(body["adjustmentReversalInfo"]["reversalAttributes"]["amount"], "15.00");
        assert_eq!(message["body"]["datasource"]["baseUri"], "/billing");
        assert_eq!(
            message["body"]["responseMapping"],
            json!({"success": {"messageExpr": "message"}})
        );
    }

    #[test]
    fn test_outcome_of_state_change() {
        let config = config();
        assert_eq!(
            config.outcome_of(&json!({"value": "success"})),
            Some(WorkflowOutcome::Succeeded)
        );
        assert_eq!(
            config.outcome_of(&json!({"value": "failed"})),
            Some(WorkflowOutcome::Failed)
        );
        assert_eq!(config.outcome_of(&json!({"value": "processing"})), None);
        assert_eq!(config.outcome_of(&json!({})), None);
    }
}
