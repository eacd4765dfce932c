use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::error::{HostError, js_error_text};
use crate::state::{DebounceTimer, RandomSource};

/// `window.setTimeout` backed debounce timer. One closure is reused for every arm;
/// handles are the browser's timeout ids.
pub struct WindowTimer {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl WindowTimer {
    pub fn new(window: Window, on_fire: impl FnMut() + 'static) -> Self {
        Self {
            window,
            callback: Closure::wrap(Box::new(on_fire) as Box<dyn FnMut()>),
        }
    }
}

impl DebounceTimer for WindowTimer {
    type Handle = i32;

    fn arm(&mut self, delay_ms: u32) -> Result<i32, HostError> {
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                delay,
            )
            .map_err(|e| HostError::Timer(js_error_text(&e)))
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

/// Browser RNG (`Math.random`).
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let r = js_sys::Math::random();
        ((r * len as f64).floor() as usize).min(len - 1)
    }
}
