use crate::shared::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Название синтетического периода с событиями нулевого баланса
pub const START_AT_ZERO_MONTH_NAME: &str = "START AT ZERO";

/// Название открытого (ещё не выставленного) периода
pub const NOW_MONTH_NAME: &str = "NOW";

/// Один расчётный период (календарный месяц, "NOW" или "START AT ZERO")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPeriod {
    #[serde(default, deserialize_with = "lenient::string")]
    pub month_name: String,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub bridge_pay: bool,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub suspended: bool,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient::seq_or_empty")]
    pub date_time_buckets: Vec<BillingEvent>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_truthy_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bill_seq_no: Option<String>,
}

impl BillingPeriod {
    /// Есть ли у периода выставленная выписка
    pub fn has_statement(&self) -> bool {
        self.month_name != NOW_MONTH_NAME && self.month_name != START_AT_ZERO_MONTH_NAME
    }

    pub fn is_start_at_zero(&self) -> bool {
        self.month_name == START_AT_ZERO_MONTH_NAME
    }

    /// Периоды bridge pay и suspended выделяются в заголовке
    pub fn is_flagged(&self) -> bool {
        self.bridge_pay || self.suspended
    }
}

/// Одна датированная транзакция внутри периода
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingEvent {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub transaction_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub amount: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub account_balance: String,
    #[serde(default, deserialize_with = "lenient::strictly_true")]
    pub zero_balance: bool,
    #[serde(default, deserialize_with = "lenient::seq_or_empty")]
    pub ctn_transactions: Vec<CtnLine>,
    #[serde(default, deserialize_with = "lenient::seq_or_empty")]
    pub ban_transactions: Vec<BanLine>,
}

/// Строка начисления по номеру телефона абонента (CTN)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CtnLine {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ctn: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub amount: String,
}

/// Строка начисления уровня счёта (BAN)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanLine {
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_reversal_info: Option<AdjustmentReversalInfo>,
}

impl BanLine {
    pub fn is_eligible_for_reversal(&self) -> bool {
        self.adjustment_reversal_info
            .as_ref()
            .map(|info| info.eligible_for_reversal)
            .unwrap_or(false)
    }
}

/// Метаданные сторно, которые прикладывает биллинг.
///
/// Исходный объект хранится как есть: движок workflow ждёт его обратно
/// без изменений в запросе на сторно.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct AdjustmentReversalInfo {
    pub eligible_for_reversal: bool,
    pub reversal_attributes: ReversalAttributes,
    pub raw: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReversalAttributes {
    pub sequence_number: Option<String>,
    pub amount: Option<String>,
}

impl From<Value> for AdjustmentReversalInfo {
    fn from(value: Value) -> Self {
        let raw = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let attributes = raw.get("reversalAttributes");
        let attribute = |name: &str| {
            attributes
                .and_then(|a| a.get(name))
                .and_then(lenient::scalar_to_string)
        };
        Self {
            eligible_for_reversal: matches!(raw.get("eligibleForReversal"), Some(Value::Bool(true))),
            reversal_attributes: ReversalAttributes {
                sequence_number: attribute("sequenceNumber"),
                amount: attribute("amount"),
            },
            raw,
        }
    }
}

impl From<AdjustmentReversalInfo> for Value {
    fn from(info: AdjustmentReversalInfo) -> Self {
        Value::Object(info.raw)
    }
}
