//! Чистые преобразования данных биллинга в то, что показывают таблицы

use contracts::domain::a025_billing_history::{
    BanLine, BillingEvent, BillingHistoryProps, BillingPeriod, CtnLine, WorkflowConfig,
    START_AT_ZERO_MONTH_NAME,
};
use serde_json::Value;

/// Тип транзакции корректировки счёта, единственный, который можно сторнировать
pub const ADJUSTMENT_TRANSACTION_TYPE: &str = "Adjustment";

/// Периоды в том виде, в каком они показываются во вкладках
///
/// В конец добавляется синтетический период "START AT ZERO" со всеми событиями
/// нулевого баланса, если список не пуст и ещё не заканчивается таким периодом.
pub fn derive_display(raw: &[BillingPeriod]) -> Vec<BillingPeriod> {
    let mut periods = raw.to_vec();
    match raw.last() {
        Some(last) if !last.is_start_at_zero() => periods.push(start_at_zero_period(raw)),
        _ => {}
    }
    periods
}

fn start_at_zero_period(raw: &[BillingPeriod]) -> BillingPeriod {
    BillingPeriod {
        month_name: START_AT_ZERO_MONTH_NAME.to_string(),
        active: true,
        bridge_pay: false,
        suspended: false,
        date_time_buckets: raw
            .iter()
            .flat_map(|period| period.date_time_buckets.iter())
            .filter(|event| event.zero_balance)
            .cloned()
            .collect(),
        bill_seq_no: None,
    }
}

/// Строка основной таблицы; `key` это позиция в периоде
#[derive(Clone, Debug, PartialEq)]
pub struct EventRow {
    pub key: usize,
    pub event: BillingEvent,
}

pub fn table_rows(events: &[BillingEvent]) -> Vec<EventRow> {
    events
        .iter()
        .cloned()
        .enumerate()
        .map(|(key, event)| EventRow { key, event })
        .collect()
}

/// Индексы первой строки каждого CTN в порядке входа
///
/// Строки без CTN образуют отдельную группу.
pub fn first_occurrence_indices(lines: &[CtnLine]) -> Vec<usize> {
    let mut seen: Vec<Option<&str>> = Vec::new();
    let mut indices = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let ctn = line.ctn.as_deref();
        if !seen.contains(&ctn) {
            seen.push(ctn);
            indices.push(index);
        }
    }
    indices
}

/// Показывать ли кнопку "Reverse" для строки BAN
pub fn can_reverse(line: &BanLine, transaction_type: &str, feature_enabled: bool) -> bool {
    feature_enabled
        && transaction_type == ADJUSTMENT_TRANSACTION_TYPE
        && line.is_eligible_for_reversal()
}

/// Показывать ли метку "Reverse Adj Eligible" у строки основной таблицы
pub fn is_reverse_eligible(event: &BillingEvent, feature_enabled: bool) -> bool {
    event
        .ban_transactions
        .iter()
        .any(|line| can_reverse(line, &event.transaction_type, feature_enabled))
}

/// Всё, что нужно таблицам для решения о кнопке сторно
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReversalSettings {
    pub feature_enabled: bool,
    pub workflow: Option<WorkflowConfig>,
    pub datasource: Value,
}

impl ReversalSettings {
    pub fn from_props(props: &BillingHistoryProps, feature_enabled: bool) -> Self {
        let workflow = props.properties.workflows.reverse_adjustment.clone();
        if workflow.is_none() {
            log::warn!("workflows.reverseAdjustment is not configured, reversal is unavailable");
        }
        Self {
            feature_enabled,
            workflow,
            datasource: props.reversal_datasource(),
        }
    }

    pub fn shows_tag(&self, event: &BillingEvent) -> bool {
        is_reverse_eligible(event, self.feature_enabled)
    }

    /// Workflow для кнопки "Reverse" строки; `None` скрывает кнопку
    pub fn button_workflow(&self, line: &BanLine, transaction_type: &str) -> Option<&WorkflowConfig> {
        if can_reverse(line, transaction_type, self.feature_enabled) {
            self.workflow.as_ref()
        } else {
            None
        }
    }
}

/// Номер выписки для URL выписки, пустой если неизвестен
pub fn statement_seq_no(period: &BillingPeriod) -> String {
    period.bill_seq_no.clone().unwrap_or_default()
}
