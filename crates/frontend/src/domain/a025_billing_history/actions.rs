//! Команды виджета хосту: загрузка выписки и сторно

use crate::shared::host::{BusEvent, BusHandler, HostError, HostRegistry, MessageBus};
use contracts::domain::a025_billing_history::{
    AdjustmentReversalInfo, WorkflowConfig, WorkflowOutcome,
};
use serde_json::{json, Value};
use std::rc::{Rc, Weak};

/// Значение реестра с номером счёта, открытого на экране
pub const NEW_BAN_KEY: &str = "NEW_BAN";
/// Хук, который машина выписок вызывает при ошибке загрузки PDF
pub const PDF_ERROR_HOOK: &str = "handlePdfError";
pub const VIEW_STATEMENTS_MACHINE: &str = "sendviewStatementsAsyncMachine";
pub const BILLING_HISTORY_MACHINE: &str = "sendbillingHistoryAsyncMachine";

pub const APPEND_URL_COMMAND: &str = "APPEND.URL";
pub const FETCH_PDF_COMMAND: &str = "FETCH.PDF";
pub const REFETCH_COMMAND: &str = "REFETCH";

/// Хук, через который хост передаёт новые данные экземпляру виджета
pub fn update_data_key(component_id: &str) -> String {
    format!("{}updateData", component_id)
}

/// Номер счёта, опубликованный заголовком аккаунта
pub fn billing_account_number(registry: &dyn HostRegistry) -> Option<Value> {
    registry.value(NEW_BAN_KEY)
}

/// Списки аргументов для машины выписок в порядке отправки
///
/// Машина собирает URL по частям: счёт, `/`, номер выписки,
/// затем загрузка.
pub fn statement_commands(account: Option<Value>, seq_no: &str) -> Vec<Vec<Value>> {
    let append = |value: Value| vec![json!(APPEND_URL_COMMAND), json!({ "value": value })];
    vec![
        append(account.unwrap_or(Value::Null)),
        append(json!("/")),
        append(json!(seq_no)),
        vec![json!(FETCH_PDF_COMMAND)],
    ]
}

/// Просит машину выписок загрузить PDF для `seq_no`
pub fn request_statement(registry: &dyn HostRegistry, seq_no: &str) -> Result<(), HostError> {
    let account = billing_account_number(registry);
    for args in statement_commands(account, seq_no) {
        registry.invoke(VIEW_STATEMENTS_MACHINE, args)?;
    }
    log::debug!("statement requested for seq '{}'", seq_no);
    Ok(())
}

/// Запускает workflow сторно одной корректировки
///
/// Подписка на смену состояний идёт до отправки `INIT` и submit-события,
/// чтобы не потерять синхронный ответ движка.
/// `on_outcome` вызывается один раз на первом финальном состоянии, после
/// чего подписка снимается. Возвращает registration id.
pub fn start_reversal(
    bus: Rc<dyn MessageBus>,
    registry: &dyn HostRegistry,
    config: &WorkflowConfig,
    datasource: &Value,
    info: &AdjustmentReversalInfo,
    on_outcome: Rc<dyn Fn(WorkflowOutcome)>,
) -> Result<String, HostError> {
    let registration_id =
        config.registration_id(info.reversal_attributes.sequence_number.as_deref());

    let weak_bus: Weak<dyn MessageBus> = Rc::downgrade(&bus);
    let watched = config.clone();
    let handler: BusHandler = Rc::new(move |event: &BusEvent| {
        let Some(outcome) = watched.outcome_of(&event.data) else {
            return;
        };
        log::debug!("reversal {} finished: {:?}", event.subscription_id, outcome);
        on_outcome(outcome);
        if let Some(bus) = weak_bus.upgrade() {
            bus.unsubscribe(&event.subscription_id);
        }
    });
    bus.subscribe(&registration_id, &config.state_change_topic(), handler)?;

    let account = billing_account_number(registry);
    let submit =
        config.reversal_submit_message(&registration_id, datasource, account.as_ref(), info);

    let sent = bus
        .send(&config.init_topic(), config.init_message(&registration_id))
        .and_then(|_| bus.send(&config.submit_topic(), submit));
    if let Err(e) = sent {
        bus.unsubscribe(&registration_id);
        return Err(e);
    }
    Ok(registration_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::host::{BusRecord, InMemoryBus, MemoryRegistry};
    use std::cell::RefCell;

    fn config() -> WorkflowConfig {
        serde_json::from_value(json!({
            "workflow": "REVERSEADJ",
            "datasource": "ds_reverse",
            "successStates": ["success"],
            "errorStates": ["error"],
            "responseMapping": {"error": {"messageExpr": "message"}}
        }))
        .unwrap()
    }

    fn info() -> AdjustmentReversalInfo {
        AdjustmentReversalInfo::from(json!({
            "eligibleForReversal": true,
            "reversalAttributes": {"sequenceNumber": "4455", "amount": "20.00"}
        }))
    }

    fn outcomes() -> (Rc<RefCell<Vec<WorkflowOutcome>>>, Rc<dyn Fn(WorkflowOutcome)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Rc::new(move |o: WorkflowOutcome| sink.borrow_mut().push(o)))
    }

    /// Заглушка движка, отвечающая на каждый submit статусом `status`
    fn answer_submits_with(bus: &Rc<InMemoryBus>, status: &'static str) {
        let engine = bus.clone();
        bus.subscribe(
            "engine",
            "WF.REVERSEADJ.SUBMIT",
            Rc::new(move |_: &BusEvent| {
                engine.publish("WF.REVERSEADJ.STATE.CHANGE", json!({ "value": status }));
            }),
        )
        .unwrap();
    }

    #[test]
    fn test_statement_commands_order() {
        let commands = statement_commands(Some(json!("900100200")), "31");
        assert_eq!(
            commands,
            vec![
                vec![json!("APPEND.URL"), json!({"value": "900100200"})],
                vec![json!("APPEND.URL"), json!({"value": "/"})],
                vec![json!("APPEND.URL"), json!({"value": "31"})],
                vec![json!("FETCH.PDF")],
            ]
        );
    }

    #[test]
    fn test_request_statement_invokes_machine() {
        let registry = MemoryRegistry::new();
        registry.set_value(NEW_BAN_KEY, json!("900100200"));
        registry.expose_function(VIEW_STATEMENTS_MACHINE);

        request_statement(&registry, "").unwrap();

        let calls = registry.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|(key, _)| key == VIEW_STATEMENTS_MACHINE));
        assert_eq!(calls[2].1, vec![json!("APPEND.URL"), json!({"value": ""})]);
    }

    #[test]
    fn test_request_statement_without_machine_fails() {
        let registry = MemoryRegistry::new();
        assert!(matches!(
            request_statement(&registry, "31"),
            Err(HostError::MissingFunction(_))
        ));
    }

    #[test]
    fn test_reversal_message_order_and_payloads() {
        let bus = Rc::new(InMemoryBus::new());
        let registry = MemoryRegistry::new();
        registry.set_value(NEW_BAN_KEY, json!("900100200"));
        let (_, on_outcome) = outcomes();

        let id = start_reversal(
            bus.clone(),
            &registry,
            &config(),
            &json!({"baseUri": "/adjustments"}),
            &info(),
            on_outcome,
        )
        .unwrap();
        assert_eq!(id, "REVERSEADJ.4455");

        let records = bus.records();
        assert_eq!(
            records[0],
            BusRecord::Subscribed {
                id: "REVERSEADJ.4455".into(),
                topic: "WF.REVERSEADJ.STATE.CHANGE".into()
            }
        );
        let sent = bus.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "WF.REVERSEADJ.INIT");
        assert_eq!(sent[0].1["header"]["eventType"], "INIT");
        assert_eq!(sent[1].0, "WF.REVERSEADJ.SUBMIT");
        let body = &sent[1].1["body"];
        assert_eq!(body["datasource"]["baseUri"], "/adjustments");
        assert_eq!(body["request"]["body"]["billingAccountNumber"], "900100200");
        assert_eq!(body["request"]["body"]["freeUserText"], "$20.00 adjustment reversed.");
        assert!(bus.is_subscribed("REVERSEADJ.4455"));
    }

    #[test]
    fn test_success_reported_once_and_unsubscribed() {
        let bus = Rc::new(InMemoryBus::new());
        answer_submits_with(&bus, "success");
        let (seen, on_outcome) = outcomes();

        start_reversal(bus.clone(), &MemoryRegistry::new(), &config(), &Value::Null, &info(), on_outcome)
            .unwrap();

        assert_eq!(*seen.borrow(), vec![WorkflowOutcome::Succeeded]);
        assert!(!bus.is_subscribed("REVERSEADJ.4455"));
        // поздние смены состояния никуда не доходят
        bus.publish("WF.REVERSEADJ.STATE.CHANGE", json!({"value": "error"}));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_error_state_allows_retry() {
        let bus = Rc::new(InMemoryBus::new());
        answer_submits_with(&bus, "error");
        let (seen, on_outcome) = outcomes();

        start_reversal(bus.clone(), &MemoryRegistry::new(), &config(), &Value::Null, &info(), on_outcome.clone())
            .unwrap();
        start_reversal(bus.clone(), &MemoryRegistry::new(), &config(), &Value::Null, &info(), on_outcome)
            .unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![WorkflowOutcome::Failed, WorkflowOutcome::Failed]
        );
        assert_eq!(bus.sent().len(), 4);
    }

    #[test]
    fn test_intermediate_states_keep_waiting() {
        let bus = Rc::new(InMemoryBus::new());
        answer_submits_with(&bus, "processing");
        let (seen, on_outcome) = outcomes();

        start_reversal(bus.clone(), &MemoryRegistry::new(), &config(), &Value::Null, &info(), on_outcome)
            .unwrap();

        assert!(seen.borrow().is_empty());
        assert!(bus.is_subscribed("REVERSEADJ.4455"));
    }

    #[test]
    fn test_missing_account_number_is_null() {
        let bus = Rc::new(InMemoryBus::new());
        let (_, on_outcome) = outcomes();
        start_reversal(bus.clone(), &MemoryRegistry::new(), &config(), &Value::Null, &info(), on_outcome)
            .unwrap();
        assert_eq!(
            bus.sent()[1].1["body"]["request"]["body"]["billingAccountNumber"],
            Value::Null
        );
    }

    #[test]
    fn test_numeric_account_number_is_forwarded() {
        let bus = Rc::new(InMemoryBus::new());
        let registry = MemoryRegistry::new();
        registry.set_value(NEW_BAN_KEY, json!(900100200));
        let (_, on_outcome) = outcomes();

        start_reversal(bus.clone(), &registry, &config(), &Value::Null, &info(), on_outcome).unwrap();

        assert_eq!(
            bus.sent()[1].1["body"]["request"]["body"]["billingAccountNumber"],
            json!(900100200)
        );
        assert_eq!(
            statement_commands(billing_account_number(&registry), "31")[0][1],
            json!({"value": 900100200})
        );
    }
}
