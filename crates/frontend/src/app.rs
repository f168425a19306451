//! Точки входа, через которые хост дашборда размещает виджет на странице

use crate::domain::a025_billing_history::BillingHistory;
use crate::shared::host::HostBindings;
use contracts::domain::a025_billing_history::BillingHistoryProps as HostProps;
use leptos::prelude::*;
use std::any::Any;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Смонтированный виджет; размонтирование снимает его хуки из реестра
#[wasm_bindgen]
pub struct MountedBillingHistory {
    handle: Option<Box<dyn Any>>,
}

#[wasm_bindgen]
impl MountedBillingHistory {
    pub fn unmount(&mut self) {
        if self.handle.take().is_some() {
            log::debug!("billing history unmounted");
        }
    }
}

/// Монтирует виджет в элемент с id `element_id`
///
/// `props` соответствует контракту компонента дашборда:
/// `{ data, componentId, properties, parentProps, asyncData, loading, error }`.
#[wasm_bindgen]
pub fn mount_billing_history(
    element_id: &str,
    props: JsValue,
) -> Result<MountedBillingHistory, JsValue> {
    let props: HostProps = serde_wasm_bindgen::from_value(props)
        .map_err(|e| JsValue::from_str(&format!("invalid billing history props: {}", e)))?;
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(element_id))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("element '{}' not found", element_id)))?;

    log::debug!(
        "mounting billing history {:?} into #{}",
        props.component_id,
        element_id
    );
    let host = HostBindings::browser();
    let handle = leptos::mount::mount_to(element, move || {
        view! { <BillingHistory props=props host=host /> }
    });
    Ok(MountedBillingHistory {
        handle: Some(Box::new(handle)),
    })
}
