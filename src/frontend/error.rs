use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl EffectError {
    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement(selector.into())
    }
}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type EffectResult<T> = Result<T, EffectError>;
