//! Шина publish/subscribe, общая с движком workflow

use super::error::HostError;
use super::js::{from_js, js_error, to_js, window_global};
use js_sys::{Array, Function, Reflect};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Сообщение, доставленное подписчику
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    pub subscription_id: String,
    pub topic: String,
    pub data: Value,
}

pub type BusHandler = Rc<dyn Fn(&BusEvent)>;

pub trait MessageBus {
    /// Регистрирует `handler` на `topic` под `id`; повторная подписка
    /// с тем же id заменяет предыдущую.
    fn subscribe(&self, id: &str, topic: &str, handler: BusHandler) -> Result<(), HostError>;

    fn send(&self, topic: &str, payload: Value) -> Result<(), HostError>;

    fn unsubscribe(&self, id: &str);
}

/// Одно обращение к шине, в порядке вызова
#[derive(Debug, Clone, PartialEq)]
pub enum BusRecord {
    Subscribed { id: String, topic: String },
    Sent { topic: String, payload: Value },
    Unsubscribed { id: String },
}

struct Subscription {
    id: String,
    topic: String,
    handler: BusHandler,
}

/// Синхронная шина в памяти
///
/// Используется без хоста дашборда и в тестах, где через
/// [`InMemoryBus::publish`] она же изображает движок workflow.
#[derive(Default)]
pub struct InMemoryBus {
    subscriptions: RefCell<Vec<Subscription>>,
    records: RefCell<Vec<BusRecord>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Доставляет `data` всем подписчикам `topic`, возвращает их число
    pub fn publish(&self, topic: &str, data: Value) -> usize {
        // Обработчик может отписаться во время вызова, поэтому borrow снимается заранее
        let targets: Vec<(String, BusHandler)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.topic == topic)
            .map(|s| (s.id.clone(), s.handler.clone()))
            .collect();

        for (id, handler) in &targets {
            handler(&BusEvent {
                subscription_id: id.clone(),
                topic: topic.to_string(),
                data: data.clone(),
            });
        }
        targets.len()
    }

    pub fn records(&self) -> Vec<BusRecord> {
        self.records.borrow().clone()
    }

    /// Отправленные топики и payload
    pub fn sent(&self) -> Vec<(String, Value)> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match record {
                BusRecord::Sent { topic, payload } => Some((topic.clone(), payload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn is_subscribed(&self, id: &str) -> bool {
        self.subscriptions.borrow().iter().any(|s| s.id == id)
    }
}

impl MessageBus for InMemoryBus {
    fn subscribe(&self, id: &str, topic: &str, handler: BusHandler) -> Result<(), HostError> {
        let mut subscriptions = self.subscriptions.borrow_mut();
        subscriptions.retain(|s| s.id != id);
        subscriptions.push(Subscription {
            id: id.to_string(),
            topic: topic.to_string(),
            handler,
        });
        self.records.borrow_mut().push(BusRecord::Subscribed {
            id: id.to_string(),
            topic: topic.to_string(),
        });
        Ok(())
    }

    fn send(&self, topic: &str, payload: Value) -> Result<(), HostError> {
        self.records.borrow_mut().push(BusRecord::Sent {
            topic: topic.to_string(),
            payload: payload.clone(),
        });
        self.publish(topic, payload);
        Ok(())
    }

    fn unsubscribe(&self, id: &str) {
        self.subscriptions.borrow_mut().retain(|s| s.id != id);
        self.records
            .borrow_mut()
            .push(BusRecord::Unsubscribed { id: id.to_string() });
    }
}

type ListenerClosure = Closure<dyn Fn(JsValue, JsValue, JsValue)>;

/// Объект шины, который хост публикует в `window`
pub struct WindowMessageBus {
    global_name: String,
    listeners: RefCell<HashMap<String, ListenerClosure>>,
    // Отписка обычно происходит внутри самого listener; его closure
    // должен пережить этот вызов и лежит здесь до следующей подписки.
    retired: RefCell<Vec<ListenerClosure>>,
}

impl WindowMessageBus {
    pub fn new(global_name: impl Into<String>) -> Self {
        Self {
            global_name: global_name.into(),
            listeners: RefCell::new(HashMap::new()),
            retired: RefCell::new(Vec::new()),
        }
    }

    fn call(&self, method: &str, args: &Array) -> Result<JsValue, HostError> {
        let bus = window_global(&self.global_name)?;
        let function: Function = Reflect::get(&bus, &JsValue::from_str(method))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| HostError::MissingFunction(format!("{}.{}", self.global_name, method)))?;
        function.apply(&bus, args).map_err(js_error)
    }
}

impl Default for WindowMessageBus {
    fn default() -> Self {
        Self::new("MessageBus")
    }
}

impl MessageBus for WindowMessageBus {
    fn subscribe(&self, id: &str, topic: &str, handler: BusHandler) -> Result<(), HostError> {
        self.retired.borrow_mut().clear();

        let listener: ListenerClosure = Closure::new(
            move |subscription_id: JsValue, topic: JsValue, data: JsValue| {
                handler(&BusEvent {
                    subscription_id: subscription_id.as_string().unwrap_or_default(),
                    topic: topic.as_string().unwrap_or_default(),
                    data: from_js(data),
                });
            },
        );

        self.call(
            "subscribe",
            &Array::of3(
                &JsValue::from_str(id),
                &JsValue::from_str(topic),
                listener.as_ref(),
            ),
        )?;

        let replaced = self.listeners.borrow_mut().insert(id.to_string(), listener);
        if let Some(old) = replaced {
            self.retired.borrow_mut().push(old);
        }
        log::debug!("bus: subscribed '{}' to {}", id, topic);
        Ok(())
    }

    fn send(&self, topic: &str, payload: Value) -> Result<(), HostError> {
        let payload = to_js(&payload)?;
        self.call("send", &Array::of2(&JsValue::from_str(topic), &payload))?;
        log::debug!("bus: sent {}", topic);
        Ok(())
    }

    fn unsubscribe(&self, id: &str) {
        if let Err(e) = self.call("unsubscribe", &Array::of1(&JsValue::from_str(id))) {
            log::warn!("bus: unsubscribe '{}' failed: {}", id, e);
        }
        let removed = self.listeners.borrow_mut().remove(id);
        if let Some(listener) = removed {
            self.retired.borrow_mut().push(listener);
        }
    }
}
