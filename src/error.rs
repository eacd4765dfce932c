use wasm_bindgen::JsValue;

/// Failures that stop the chooser from attaching at all.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("no global `window` exists")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("listener element is not mounted")]
    MissingListener,
    #[error("container element is not mounted")]
    MissingContainer,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Dom(js_error_text(&value))
    }
}

/// Host-side failures at runtime. The coordinator logs these and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("marker creation failed: {0}")]
    Marker(String),
    #[error("timer scheduling failed: {0}")]
    Timer(String),
}

pub fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
