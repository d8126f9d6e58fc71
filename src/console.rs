// Browser console logging. On native targets (unit tests) the macros only
// type-check their arguments.

macro_rules! console_log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!($($t)*)));
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($t)*);
        }
    }};
}

macro_rules! console_warn {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!($($t)*)));
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($t)*);
        }
    }};
}
