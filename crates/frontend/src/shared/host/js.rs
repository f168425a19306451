//! Преобразования между JSON и значениями JavaScript

use super::error::HostError;
use js_sys::Reflect;
use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsValue;

pub(crate) fn to_js(value: &Value) -> Result<JsValue, HostError> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| HostError::Payload(e.to_string()))
}

/// Значения вне JSON (функции, символы) читаются как null
pub(crate) fn from_js(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap_or(Value::Null)
}

/// `error.message`, если есть, иначе debug-представление
pub(crate) fn error_message(error: &JsValue) -> String {
    Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{:?}", error))
}

pub(crate) fn js_error(error: JsValue) -> HostError {
    HostError::Js(error_message(&error))
}

/// Ищет `window[name]`, ошибка на `undefined`/`null`
pub(crate) fn window_global(name: &str) -> Result<JsValue, HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let value = Reflect::get(&window, &JsValue::from_str(name)).map_err(js_error)?;
    if value.is_undefined() || value.is_null() {
        return Err(HostError::MissingObject(name.to_string()));
    }
    Ok(value)
}
