use thiserror::Error;

/// Ошибки взаимодействия с хостом дашборда (глобальные объекты window, шина, флаги)
#[derive(Debug, Error)]
pub enum HostError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("tab registry '{0}' is not available")]
    NoTabRegistry(String),
    #[error("host object '{0}' is not available")]
    MissingObject(String),
    #[error("host function '{0}' is not registered")]
    MissingFunction(String),
    #[error("host call failed: {0}")]
    Js(String),
    #[error("payload conversion failed: {0}")]
    Payload(String),
}

/// Ошибки рендеринга шаблона; текст показывается вместо HTML
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unclosed tag at position {0}")]
    UnclosedTag(usize),
    #[error("Empty tag at position {0}")]
    EmptyTag(usize),
    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),
    #[error("{0}")]
    Renderer(String),
}
