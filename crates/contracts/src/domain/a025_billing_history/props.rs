use super::aggregate::BillingPeriod;
use super::workflow::WorkflowConfig;
use crate::shared::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Фича-флаг по умолчанию для сторно корректировки
pub const DEFAULT_REVERSE_ADJ_FEATURE_FLAG: &str = "reverseAdjustment";

/// Props, которые хост дашборда передаёт виджету
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingHistoryProps {
    /// Исходный объект данных, `{ data: { billingHistory: [...] } }`
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub async_data: Value,
    #[serde(default)]
    pub loading: Value,
    #[serde(default)]
    pub error: Value,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub component_id: Option<String>,
    #[serde(default)]
    pub properties: ComponentProperties,
    #[serde(default)]
    pub parent_props: ParentProps,
}

impl BillingHistoryProps {
    /// Расчётные периоды из `data.data.billingHistory`.
    ///
    /// `None`, если хост не прислал список вовсе, `Some(vec![])` для пустого
    /// (тогда у хоста запрашивается повторная загрузка).
    pub fn billing_history(&self) -> Option<Vec<BillingPeriod>> {
        match self.data.get("data")?.get("billingHistory")? {
            Value::Array(items) => Some(decode_periods(items.iter())),
            _ => None,
        }
    }

    /// Контекст для рендеринга шаблона хоста
    pub fn template_context(&self) -> Value {
        let mut context = Map::new();
        context.insert("data".into(), or_empty_list(&self.data));
        context.insert("asyncData".into(), or_empty_list(&self.async_data));
        context.insert(
            "configTextObject".into(),
            match &self.properties.config_text_object {
                Value::Null => Value::Object(Map::new()),
                other => other.clone(),
            },
        );
        context.insert("loading".into(), self.loading.clone());
        context.insert("error".into(), self.error.clone());
        Value::Object(context)
    }

    /// Datasource, настроенный для workflow сторно
    pub fn reversal_datasource(&self) -> Value {
        self.properties
            .workflows
            .reverse_adjustment
            .as_ref()
            .and_then(|config| self.parent_props.datasources.get(&config.datasource))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

fn or_empty_list(value: &Value) -> Value {
    match value {
        Value::Null => Value::Array(Vec::new()),
        other => other.clone(),
    }
}

/// Настройки компонента из дизайнера дашборда
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProperties {
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub config_text_object: Value,
    #[serde(default = "default_feature_flag")]
    pub reverse_adj_feature_flag: String,
    #[serde(default)]
    pub workflows: Workflows,
}

impl Default for ComponentProperties {
    fn default() -> Self {
        Self {
            template: String::new(),
            config_text_object: Value::Null,
            reverse_adj_feature_flag: default_feature_flag(),
            workflows: Workflows::default(),
        }
    }
}

fn default_feature_flag() -> String {
    DEFAULT_REVERSE_ADJ_FEATURE_FLAG.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflows {
    #[serde(default)]
    pub reverse_adjustment: Option<WorkflowConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParentProps {
    #[serde(default)]
    pub datasources: Map<String, Value>,
}

/// Декодирует `payload`, переданный в хук `updateData`.
///
/// Хост шлёт массив или объект с ключами-индексами; элементы читаются
/// по порядку индексов до первого отсутствующего или пустого.
pub fn decode_update_payload(args: &Value) -> Vec<BillingPeriod> {
    let payload = args.get("payload").unwrap_or(&Value::Null);
    let items: Vec<&Value> = match payload {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => (0..)
            .map(|i: usize| map.get(&i.to_string()))
            .take_while(|item| item.is_some())
            .flatten()
            .collect(),
        _ => Vec::new(),
    };
    decode_periods(
        items
            .into_iter()
            .take_while(|item| lenient::is_truthy(item)),
    )
}

fn decode_periods<'a>(items: impl Iterator<Item = &'a Value>) -> Vec<BillingPeriod> {
    items
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item.clone()) {
            Ok(period) => Some(period),
            Err(e) => {
                log::warn!("billing period #{} skipped: {}", index, e);
                None
            }
        })
        .collect()
}

/// Текст ошибки из неудачного ответа PDF, `payload.causedBy[0].message`
pub fn pdf_error_message(response: &Value) -> Option<String> {
    response
        .get("payload")?
        .get("causedBy")?
        .get(0)?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_props() {
        let props: BillingHistoryProps = serde_json::from_value(json!({})).unwrap();
        assert_eq!(props.properties.reverse_adj_feature_flag, "reverseAdjustment");
        assert!(props.properties.workflows.reverse_adjustment.is_none());
        assert!(props.component_id.is_none());
        assert_eq!(props.billing_history(), None);
    }

    #[test]
    fn test_billing_history_empty_vs_missing() {
        let props: BillingHistoryProps =
            serde_json::from_value(json!({"data": {"data": {"billingHistory": []}}})).unwrap();
        assert_eq!(props.billing_history(), Some(vec![]));

        let props: BillingHistoryProps =
            serde_json::from_value(json!({"data": {"data": {}}})).unwrap();
        assert_eq!(props.billing_history(), None);
    }

    #[test]
    fn test_template_context_defaults() {
        let props: BillingHistoryProps = serde_json::from_value(json!({
            "properties": {"template": "<b>hi</b>"}
        }))
        .unwrap();
        let context = props.template_context();
        assert_eq!(context["data"], json!([]));
        assert_eq!(context["asyncData"], json!([]));
        assert_eq!(context["configTextObject"], json!({}));
        assert_eq!(context["loading"], Value::Null);
    }

    #[test]
    fn test_reversal_datasource_lookup() {
        let props: BillingHistoryProps = serde_json::from_value(json!({
            "properties": {"workflows": {"reverseAdjustment": {
                "workflow": "REVERSEADJ",
                "datasource": "ds_reverse"
            }}},
            "parentProps": {"datasources": {"ds_reverse": {"url": "/adjustments/reverse"}}}
        }))
        .unwrap();
        assert_eq!(props.reversal_datasource(), json!({"url": "/adjustments/reverse"}));
    }

    #[test]
    fn test_decode_update_payload_index_keyed() {
        let args = json!({"payload": {
            "0": {"monthName": "JAN 2024"},
            "1": {"monthName": "FEB 2024"},
            "3": {"monthName": "APR 2024"}
        }});
        let periods = decode_update_payload(&args);
        let names: Vec<_> = periods.iter().map(|p| p.month_name.as_str()).collect();
        assert_eq!(names, vec!["JAN 2024", "FEB 2024"]);
    }

    #[test]
    fn test_decode_update_payload_array() {
        let args = json!({"payload": [{"monthName": "NOW"}, null, {"monthName": "JAN 2024"}]});
        let periods = decode_update_payload(&args);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].month_name, "NOW");
        assert!(decode_update_payload(&json!({})).is_empty());
    }

    #[test]
    fn test_odd_nested_lists_keep_the_period() {
        let args = json!({"payload": [
            {"monthName": "JAN", "dateTimeBuckets": {}},
            {"monthName": "FEB", "dateTimeBuckets": [
                {"transactionType": "Payment", "ctnTransactions": "none", "banTransactions": 0}
            ]}
        ]});
        let periods = decode_update_payload(&args);
        let names: Vec<_> = periods.iter().map(|p| p.month_name.as_str()).collect();
        assert_eq!(names, vec!["JAN", "FEB"]);
        assert!(periods[0].date_time_buckets.is_empty());
        assert_eq!(periods[1].date_time_buckets.len(), 1);
        assert!(periods[1].date_time_buckets[0].ctn_transactions.is_empty());
        assert!(periods[1].date_time_buckets[0].ban_transactions.is_empty());
    }

    #[test]
    fn test_pdf_error_message() {
        let response = json!({"payload": {"causedBy": [{"message": "Statement not found"}]}});
        assert_eq!(
            pdf_error_message(&response).as_deref(),
            Some("Statement not found")
        );
        assert_eq!(pdf_error_message(&json!({"payload": {}})), None);
    }
}
