//! Splash error types

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while wiring the splash to the page.
#[derive(Debug, Error)]
pub enum SplashError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    /// A required element (screens or headline) is not in the document.
    #[error("required element #{id} not found")]
    MissingElement { id: String },

    #[error("element #{id} is not an HtmlElement")]
    WrongElementType { id: String },

    /// A DOM call was rejected by the browser.
    #[error("dom error: {0}")]
    Js(String),

    #[cfg(feature = "serde_json")]
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<JsValue> for SplashError {
    fn from(value: JsValue) -> Self {
        SplashError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SplashError> for JsValue {
    fn from(err: SplashError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SplashError>;
