//! Точки связи с хостом дашборда: шина сообщений, реестр вкладки, фича-флаги
//! и шаблонизатор.
//!
//! Каждая точка это трейт с браузерной реализацией поверх объектов `window`
//! хоста и реализацией в памяти для работы без хоста.

pub mod bus;
pub mod error;
pub mod feature_flags;
mod js;
pub mod registry;
pub mod template;

pub use bus::{BusEvent, BusHandler, BusRecord, InMemoryBus, MessageBus, WindowMessageBus};
pub use error::{HostError, TemplateError};
pub use feature_flags::{is_enabled, FeatureFlags, FeatureState, JsFeatureFlags, StaticFeatureFlags};
pub use registry::{HostHook, HostRegistry, MemoryRegistry, WindowRegistry};
pub use template::{
    render_or_message, JsTemplateRenderer, PlaceholderRenderer, TemplateRenderer,
};

use std::rc::Rc;

/// Сервисы хоста, передаваемые виджету при монтировании
#[derive(Clone)]
pub struct HostBindings {
    pub bus: Rc<dyn MessageBus>,
    pub registry: Rc<dyn HostRegistry>,
    pub feature_flags: Rc<dyn FeatureFlags>,
    pub templates: Rc<dyn TemplateRenderer>,
}

impl HostBindings {
    /// Привязки к объектам, которые страница дашборда публикует в `window`
    ///
    /// Если шаблонизатор на странице не загружен, используется встроенный
    /// рендерер шаблонов.
    pub fn browser() -> Self {
        let js_templates = JsTemplateRenderer::default();
        let templates: Rc<dyn TemplateRenderer> = if js_templates.available() {
            Rc::new(js_templates)
        } else {
            log::debug!("host template engine not found, using placeholder renderer");
            Rc::new(PlaceholderRenderer)
        };
        Self {
            bus: Rc::new(WindowMessageBus::default()),
            registry: Rc::new(WindowRegistry::default()),
            feature_flags: Rc::new(JsFeatureFlags::default()),
            templates,
        }
    }

    /// Привязки в памяти для работы без хоста дашборда
    pub fn detached() -> Self {
        Self {
            bus: Rc::new(InMemoryBus::new()),
            registry: Rc::new(MemoryRegistry::new()),
            feature_flags: Rc::new(StaticFeatureFlags::new()),
            templates: Rc::new(PlaceholderRenderer),
        }
    }
}
