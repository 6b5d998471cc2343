//! Browser host for the Yeki scroll behavior.
//!
//! Built for `wasm32-unknown-unknown`. With the default `autostart` feature
//! the module attaches itself with the default configuration as soon as the
//! DOM is ready; otherwise call `install` from JavaScript with an optional
//! TOML configuration string.

mod document;
mod logging;
mod runtime;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use yeki_core::AppConfig;

pub use document::BrowserDocument;

fn to_js(e: yeki_core::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Attach the behavior now, using `config_toml` when given.
///
/// Fails if the page already has it attached, which is the case once the
/// `autostart` hook has run; build with `default-features = false` to
/// configure from JavaScript.
#[wasm_bindgen]
pub fn install(config_toml: Option<String>) -> Result<(), JsValue> {
    let config = match config_toml {
        Some(content) => AppConfig::from_toml_str(&content).map_err(to_js)?,
        None => AppConfig::default(),
    };
    logging::init(&config.general.log_level);
    runtime::install(config)
}

/// Attach once the DOM has been parsed, like a jQuery ready handler
pub fn install_when_ready(config: AppConfig) -> Result<(), JsValue> {
    logging::init(&config.general.log_level);

    let document = BrowserDocument::new().map_err(to_js)?;
    if document.dom().ready_state() != "loading" {
        return runtime::install(config);
    }

    let mut pending = Some(config);
    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Some(config) = pending.take() {
            if let Err(e) = runtime::install(config) {
                tracing::warn!(error = ?e, "failed to attach scroll behavior");
            }
        }
    });
    document
        .dom()
        .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    install_when_ready(AppConfig::default())
}
