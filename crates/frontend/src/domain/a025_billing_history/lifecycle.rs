//! Хуки, которые виджет держит в реестре хоста, пока смонтирован

use super::actions::{update_data_key, BILLING_HISTORY_MACHINE, PDF_ERROR_HOOK, REFETCH_COMMAND};
use crate::shared::host::{HostHook, HostRegistry};
use contracts::domain::a025_billing_history::{
    decode_update_payload, pdf_error_message, BillingHistoryProps, BillingPeriod,
};
use serde_json::{json, Value};
use std::rc::Rc;

/// Хуки реестра одного смонтированного виджета
pub struct InstalledHooks {
    registry: Rc<dyn HostRegistry>,
    keys: Vec<String>,
}

impl InstalledHooks {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Удаляет все хуки, установленные этим виджетом
    pub fn release(&self) {
        for key in &self.keys {
            self.registry.remove(key);
        }
        log::debug!("billing history hooks released: {:?}", self.keys);
    }
}

/// Устанавливает `handlePdfError` и, при наличии id компонента, `<id>updateData`
///
/// Хук, который реестр не принял, пишется в лог и пропускается.
pub fn install_hooks(
    registry: Rc<dyn HostRegistry>,
    component_id: Option<&str>,
    on_data: Rc<dyn Fn(Vec<BillingPeriod>)>,
    on_pdf_error: Rc<dyn Fn(String)>,
) -> InstalledHooks {
    let mut hooks: Vec<(String, HostHook)> = vec![(
        PDF_ERROR_HOOK.to_string(),
        Rc::new(move |response: Value| {
            let message = pdf_error_message(&response).unwrap_or_else(|| {
                log::warn!("statement error without a message: {}", response);
                String::new()
            });
            on_pdf_error(message);
        }),
    )];
    if let Some(id) = component_id {
        hooks.push((
            update_data_key(id),
            Rc::new(move |args: Value| on_data(decode_update_payload(&args))),
        ));
    }

    let mut keys = Vec::new();
    for (key, hook) in hooks {
        match registry.install(&key, hook) {
            Ok(()) => keys.push(key),
            Err(e) => log::error!("cannot install '{}': {}", key, e),
        }
    }
    InstalledHooks { registry, keys }
}

/// Что делать с данными, с которыми виджет смонтирован
#[derive(Debug, Clone, PartialEq)]
pub enum InitialLoad {
    /// Хост прислал пустой список; запросить загрузку заново
    Refetch,
    Load(Vec<BillingPeriod>),
}

pub fn initial_load(props: &BillingHistoryProps) -> InitialLoad {
    match props.billing_history() {
        Some(periods) if periods.is_empty() => InitialLoad::Refetch,
        Some(periods) => InitialLoad::Load(periods),
        None => InitialLoad::Load(Vec::new()),
    }
}

/// Отправляет `REFETCH` машине истории биллинга, если она есть у хоста
pub fn request_refetch(registry: &dyn HostRegistry) {
    if !registry.contains(BILLING_HISTORY_MACHINE) {
        log::debug!("{} not available, skipping refetch", BILLING_HISTORY_MACHINE);
        return;
    }
    if let Err(e) = registry.invoke(BILLING_HISTORY_MACHINE, vec![json!(REFETCH_COMMAND)]) {
        log::error!("billing history refetch failed: {}", e);
    }
}
