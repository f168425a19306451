//! Реестр хоста на вкладку: объект, через который общаются соседние виджеты
//!
//! Дашборд держит один объект реестра на вкладку браузера. Виджеты кладут
//! в него хуки (`<id>updateData`, `handlePdfError`), читают общие значения
//! (`NEW_BAN`) и вызывают отправители именованных state machine
//! (`sendviewStatementsAsyncMachine`).

use super::error::HostError;
use super::js::{from_js, js_error, to_js};
use js_sys::{Array, Function, Object, Reflect};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Callback, который хост вызывает с одним JSON-аргументом
pub type HostHook = Rc<dyn Fn(Value)>;

pub trait HostRegistry {
    fn install(&self, key: &str, hook: HostHook) -> Result<(), HostError>;

    fn remove(&self, key: &str);

    fn contains(&self, key: &str) -> bool;

    /// Обычное значение под `key`
    fn value(&self, key: &str) -> Option<Value>;

    /// Вызывает функцию под `key`
    fn invoke(&self, key: &str, args: Vec<Value>) -> Result<(), HostError>;
}

enum Entry {
    Hook(HostHook),
    Value(Value),
    Function,
}

/// Реестр в памяти, записывает каждый вызов функции
#[derive(Default)]
pub struct MemoryRegistry {
    entries: RefCell<HashMap<String, Entry>>,
    calls: RefCell<Vec<(String, Vec<Value>)>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&self, key: &str, value: Value) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), Entry::Value(value));
    }

    /// Делает `key` вызываемым; вызовы пишутся в [`MemoryRegistry::calls`]
    pub fn expose_function(&self, key: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), Entry::Function);
    }

    /// Вызывает установленный хук так, как это сделал бы хост; false если хука нет
    pub fn call_hook(&self, key: &str, arg: Value) -> bool {
        let hook = match self.entries.borrow().get(key) {
            Some(Entry::Hook(hook)) => hook.clone(),
            _ => return false,
        };
        hook(arg);
        true
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.borrow().clone()
    }
}

impl HostRegistry for MemoryRegistry {
    fn install(&self, key: &str, hook: HostHook) -> Result<(), HostError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), Entry::Hook(hook));
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn value(&self, key: &str) -> Option<Value> {
        match self.entries.borrow().get(key) {
            Some(Entry::Value(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn invoke(&self, key: &str, args: Vec<Value>) -> Result<(), HostError> {
        let hook = match self.entries.borrow().get(key) {
            Some(Entry::Function) => None,
            Some(Entry::Hook(hook)) => Some(hook.clone()),
            _ => return Err(HostError::MissingFunction(key.to_string())),
        };
        self.calls.borrow_mut().push((key.to_string(), args.clone()));
        if let Some(hook) = hook {
            hook(args.into_iter().next().unwrap_or(Value::Null));
        }
        Ok(())
    }
}

/// Объект реестра в `window[sessionStorage[tab_id_key]]`
pub struct WindowRegistry {
    tab_id_key: String,
    hooks: RefCell<HashMap<String, Closure<dyn Fn(JsValue)>>>,
}

impl WindowRegistry {
    pub fn new(tab_id_key: impl Into<String>) -> Self {
        Self {
            tab_id_key: tab_id_key.into(),
            hooks: RefCell::new(HashMap::new()),
        }
    }

    fn tab_object(&self) -> Result<JsValue, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let tab_id = window
            .session_storage()
            .ok()
            .flatten()
            .and_then(|storage| storage.get_item(&self.tab_id_key).ok().flatten())
            .ok_or_else(|| HostError::NoTabRegistry(self.tab_id_key.clone()))?;
        let tab = Reflect::get(&window, &JsValue::from_str(&tab_id)).map_err(js_error)?;
        if !tab.is_object() {
            return Err(HostError::NoTabRegistry(tab_id));
        }
        Ok(tab)
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new("tabId")
    }
}

impl HostRegistry for WindowRegistry {
    fn install(&self, key: &str, hook: HostHook) -> Result<(), HostError> {
        let tab = self.tab_object()?;
        let closure = Closure::<dyn Fn(JsValue)>::new(move |arg: JsValue| hook(from_js(arg)));
        Reflect::set(&tab, &JsValue::from_str(key), closure.as_ref()).map_err(js_error)?;
        self.hooks.borrow_mut().insert(key.to_string(), closure);
        Ok(())
    }

    fn remove(&self, key: &str) {
        match self.tab_object() {
            Ok(tab) => {
                let key_value = JsValue::from_str(key);
                if let Err(e) = Reflect::delete_property(tab.unchecked_ref::<Object>(), &key_value) {
                    log::warn!("registry: could not delete '{}': {:?}", key, e);
                }
            }
            Err(e) => log::warn!("registry: could not delete '{}': {}", key, e),
        }
        self.hooks.borrow_mut().remove(key);
    }

    fn contains(&self, key: &str) -> bool {
        self.tab_object()
            .and_then(|tab| Reflect::has(&tab, &JsValue::from_str(key)).map_err(js_error))
            .unwrap_or(false)
    }

    fn value(&self, key: &str) -> Option<Value> {
        let tab = self.tab_object().ok()?;
        let value = Reflect::get(&tab, &JsValue::from_str(key)).ok()?;
        if value.is_undefined() {
            return None;
        }
        Some(from_js(value))
    }

    fn invoke(&self, key: &str, args: Vec<Value>) -> Result<(), HostError> {
        let tab = self.tab_object()?;
        let function: Function = Reflect::get(&tab, &JsValue::from_str(key))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| HostError::MissingFunction(key.to_string()))?;
        let js_args = Array::new();
        for arg in &args {
            js_args.push(&to_js(arg)?);
        }
        function.apply(&tab, &js_args).map_err(js_error)?;
        Ok(())
    }
}
