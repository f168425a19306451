//! Рендеринг HTML-шаблона хоста, который показывается под вкладками

use super::error::TemplateError;
use super::js::{error_message, to_js, window_global};
use js_sys::{Function, Reflect};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};

pub trait TemplateRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, TemplateError>;
}

/// Рендерит `template`; при ошибке вместо HTML показывается её текст
pub fn render_or_message(renderer: &dyn TemplateRenderer, template: &str, context: &Value) -> String {
    match renderer.render(template, context) {
        Ok(html) => html,
        Err(e) => {
            log::error!("template render failed: {}", e);
            e.to_string()
        }
    }
}

/// Встроенный рендерер плейсхолдеров `{{ it.path }}`
///
/// - `{{ it.a.b.0 }}` ищет значение по пути через точку (числа индексируют массивы)
///   и экранирует HTML; префикс `it.` необязателен
/// - `{{~ it.a }}` или `{{ it.a | safe }}` выводит значение без экранирования
/// - фильтры `upper`, `lower` и `trim` можно объединять через `|`
///
/// Отсутствующие значения дают пустую строку, объекты и массивы выводятся как JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        let mut offset = 0;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let tag_start = offset + open;
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or(TemplateError::UnclosedTag(tag_start))?;

            out.push_str(&render_tag(&after_open[..close], context, tag_start)?);

            let consumed = open + 2 + close + 2;
            rest = &rest[consumed..];
            offset += consumed;
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn render_tag(tag: &str, context: &Value, position: usize) -> Result<String, TemplateError> {
    let mut tag = tag.trim();
    let mut raw = false;
    if let Some(stripped) = tag.strip_prefix('~') {
        raw = true;
        tag = stripped.trim_start();
    }

    let mut parts = tag.split('|').map(str::trim);
    let path = parts.next().unwrap_or_default();
    if path.is_empty() {
        return Err(TemplateError::EmptyTag(position));
    }

    let mut text = lookup(context, path).map(value_text).unwrap_or_default();
    for filter in parts {
        match filter {
            "safe" => raw = true,
            "upper" => text = text.to_uppercase(),
            "lower" => text = text.to_lowercase(),
            "trim" => text = text.trim().to_string(),
            other => return Err(TemplateError::UnknownFilter(other.to_string())),
        }
    }

    Ok(if raw { text } else { escape_html(&text) })
}

fn lookup<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    let path = match path {
        "it" => return Some(context),
        other => other.strip_prefix("it.").unwrap_or(other),
    };
    path.split('.').try_fold(context, |value, segment| match value {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Object(map) => map.get(segment),
        _ => None,
    })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Шаблонизатор, загруженный страницей хоста (`window.Sqrl.Render`)
pub struct JsTemplateRenderer {
    global_name: String,
    function_name: String,
}

impl JsTemplateRenderer {
    pub fn new(global_name: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            global_name: global_name.into(),
            function_name: function_name.into(),
        }
    }

    /// Загружен ли шаблонизатор на странице хоста
    pub fn available(&self) -> bool {
        self.render_function().is_ok()
    }

    fn render_function(&self) -> Result<(JsValue, Function), TemplateError> {
        let engine =
            window_global(&self.global_name).map_err(|e| TemplateError::Renderer(e.to_string()))?;
        let function = Reflect::get(&engine, &JsValue::from_str(&self.function_name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                TemplateError::Renderer(format!(
                    "{}.{} is not a function",
                    self.global_name, self.function_name
                ))
            })?;
        Ok((engine, function))
    }
}

impl Default for JsTemplateRenderer {
    fn default() -> Self {
        Self::new("Sqrl", "Render")
    }
}

impl TemplateRenderer for JsTemplateRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, TemplateError> {
        let (engine, function) = self.render_function()?;
        let context = to_js(context).map_err(|e| TemplateError::Renderer(e.to_string()))?;
        let html = function
            .call2(&engine, &JsValue::from_str(template), &context)
            .map_err(|e| TemplateError::Renderer(error_message(&e)))?;
        Ok(html.as_string().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Value {
        json!({
            "data": {"data": {"billingHistory": [{"monthName": "MAR 2024"}]}},
            "configTextObject": {"title": "Billing <History>", "note": "<b>Paid</b>"},
            "loading": false,
            "error": null
        })
    }

    #[test]
    fn test_placeholders_are_resolved_and_escaped() {
        let html = PlaceholderRenderer
            .render(
                "<h3>{{ it.configTextObject.title }}</h3><p>{{it.data.data.billingHistory.0.monthName}}</p>",
                &context(),
            )
            .unwrap();
        assert_eq!(html, "<h3>Billing &lt;History&gt;</h3><p>MAR 2024</p>");
    }

    #[test]
    fn test_raw_output_and_filters() {
        let renderer = PlaceholderRenderer;
        assert_eq!(
            renderer.render("{{~ it.configTextObject.note }}", &context()).unwrap(),
            "<b>Paid</b>"
        );
        assert_eq!(
            renderer.render("{{ configTextObject.note | safe }}", &context()).unwrap(),
            "<b>Paid</b>"
        );
        assert_eq!(
            renderer
                .render("{{ it.data.data.billingHistory.0.monthName | lower }}", &context())
                .unwrap(),
            "mar 2024"
        );
        assert_eq!(renderer.render("{{ it.loading }}", &context()).unwrap(), "false");
    }

    #[test]
    fn test_missing_values_render_empty() {
        let renderer = PlaceholderRenderer;
        assert_eq!(renderer.render("[{{ it.error }}]", &context()).unwrap(), "[]");
        assert_eq!(renderer.render("[{{ it.nope.deeper }}]", &context()).unwrap(), "[]");
        assert_eq!(renderer.render("no tags", &context()).unwrap(), "no tags");
    }

    #[test]
    fn test_render_errors() {
        let renderer = PlaceholderRenderer;
        assert!(matches!(
            renderer.render("ok {{ it.data", &context()),
            Err(TemplateError::UnclosedTag(3))
        ));
        assert!(matches!(
            renderer.render("{{ }}", &context()),
            Err(TemplateError::EmptyTag(0))
        ));
        assert!(matches!(
            renderer.render("{{ it.loading | shout }}", &context()),
            Err(TemplateError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_render_or_message_falls_back_to_error_text() {
        assert_eq!(
            render_or_message(&PlaceholderRenderer, "{{ it.data", &context()),
            "Unclosed tag at position 0"
        );
        assert_eq!(render_or_message(&PlaceholderRenderer, "", &context()), "");
    }
}
