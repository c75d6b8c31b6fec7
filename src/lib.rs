#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod camera;
pub mod config;
pub mod deck;
pub mod error;
pub mod field;
pub mod particles;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::config::{CameraConfig, DeckConfig, FieldConfig};
    use crate::error::InitError;

    pub mod render;
    pub mod shader;
    pub mod slides;

    impl From<JsValue> for InitError {
        fn from(value: JsValue) -> Self {
            InitError::Js(
                value
                    .as_string()
                    .unwrap_or_else(|| format!("{:?}", value)),
            )
        }
    }

    impl From<InitError> for JsValue {
        fn from(error: InitError) -> Self {
            js_sys::Error::new(&error.to_string()).into()
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        console_log::init_with_level(level).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if document.ready_state() == "loading" {
            let on_ready = Closure::wrap(Box::new(boot) as Box<dyn FnMut()>);
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.as_ref().unchecked_ref(),
            )?;
            on_ready.forget();
        } else {
            boot();
        }
        Ok(())
    }

    /// Starts both page components. They are independent: one failing to
    /// find its elements leaves the other running.
    fn boot() {
        if let Err(e) = render::start(FieldConfig::default(), CameraConfig::default()) {
            log::error!("particle background disabled: {}", e);
        }
        if let Err(e) = slides::start(&DeckConfig::default()) {
            log::error!("slide navigation disabled: {}", e);
        }
    }
}
