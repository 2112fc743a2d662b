//! Console logging macros
//!
//! In the browser: `console.log` / `console.warn` through web-sys.
//! On native targets (tests, tools): stderr, so nothing calls into JS imports.
//!
//! Usage:
//! ```rust
//! use motion_physics::{log_info, log_warn};
//!
//! log_info!("bodies: {}", 3);
//! log_warn!("unknown constraint id {}", 42);
//! ```

#[doc(hidden)]
pub fn write_info(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&message.into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("[motion-physics] {}", message);
    }
}

#[doc(hidden)]
pub fn write_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&message.into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("[motion-physics] warning: {}", message);
    }
}

/// Informational log line (format! syntax)
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::core::utils::logging::write_info(&format!($($arg)*));
    }};
}

/// Warning log line (format! syntax)
///
/// Used for no-op operations on unknown ids and rejected input.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::core::utils::logging::write_warn(&format!($($arg)*));
    }};
}
