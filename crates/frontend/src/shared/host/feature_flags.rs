//! Вычисление фича-флагов средствами хоста

use super::js::{error_message, from_js, window_global};
use contracts::shared::lenient;
use js_sys::{Array, Function};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureState {
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub disabled: bool,
}

pub trait FeatureFlags {
    /// `None`, если у вычислителя нет ответа для `flag`
    fn evaluate(&self, flag: &str) -> Option<FeatureState>;
}

/// Флаг включён, если вычислитель явно не сообщил, что он выключен
pub fn is_enabled(flags: &dyn FeatureFlags, flag: &str) -> bool {
    !flags.evaluate(flag).map(|state| state.disabled).unwrap_or(false)
}

/// Фиксированный набор выключенных флагов; остальные считаются включёнными
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureFlags {
    disabled: HashSet<String>,
}

impl StaticFeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disabled(mut self, flag: &str) -> Self {
        self.disabled.insert(flag.to_string());
        self
    }
}

impl FeatureFlags for StaticFeatureFlags {
    fn evaluate(&self, flag: &str) -> Option<FeatureState> {
        Some(FeatureState {
            disabled: self.disabled.contains(flag),
        })
    }
}

/// Функция-вычислитель в `window`
///
/// Функция может вернуть объект состояния или список ответов плагинов,
/// тогда берётся первый ответ.
pub struct JsFeatureFlags {
    function_name: String,
}

impl JsFeatureFlags {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }
}

impl Default for JsFeatureFlags {
    fn default() -> Self {
        Self::new("evaluateFeature")
    }
}

impl FeatureFlags for JsFeatureFlags {
    fn evaluate(&self, flag: &str) -> Option<FeatureState> {
        let function: Function = window_global(&self.function_name).ok()?.dyn_into().ok()?;
        let answer = match function.call1(&JsValue::NULL, &JsValue::from_str(flag)) {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("feature flag '{}' evaluation failed: {}", flag, error_message(&e));
                return None;
            }
        };
        let answer = if Array::is_array(&answer) {
            Array::from(&answer).get(0)
        } else {
            answer
        };
        match from_js(answer) {
            Value::Null => None,
            state => serde_json::from_value(state).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_flags() {
        let flags = StaticFeatureFlags::new().with_disabled("reverseAdjustment");
        assert!(!is_enabled(&flags, "reverseAdjustment"));
        assert!(is_enabled(&flags, "viewStatements"));
    }

    #[test]
    fn test_missing_answer_counts_as_enabled() {
        struct Silent;
        impl FeatureFlags for Silent {
            fn evaluate(&self, _flag: &str) -> Option<FeatureState> {
                None
            }
        }
        assert!(is_enabled(&Silent, "reverseAdjustment"));
    }

    #[test]
    fn test_feature_state_from_loose_json() {
        let state: FeatureState = serde_json::from_value(serde_json::json!({"disabled": 1})).unwrap();
        assert!(state.disabled);
        let state: FeatureState = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(!state.disabled);
    }
}
