//! Environment capability probing (reduced motion, device memory).

use wasm_bindgen::JsValue;

pub trait Capabilities {
    fn prefers_reduced_motion(&self) -> bool;
    /// Approximate device memory in GB; `None` where unsupported.
    fn device_memory_gb(&self) -> Option<f64>;
}

/// Snapshot of [`Capabilities`], taken once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceProfile {
    pub reduced_motion: bool,
    pub device_memory_gb: Option<f64>,
}

impl DeviceProfile {
    pub fn probe(caps: &dyn Capabilities) -> Self {
        Self {
            reduced_motion: caps.prefers_reduced_motion(),
            device_memory_gb: caps.device_memory_gb(),
        }
    }

    /// Zero or unreported memory never counts as low.
    pub fn is_low_memory(&self, threshold_gb: f64) -> bool {
        matches!(self.device_memory_gb, Some(gb) if gb > 0.0 && gb < threshold_gb)
    }
}

impl Capabilities for DeviceProfile {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn device_memory_gb(&self) -> Option<f64> {
        self.device_memory_gb
    }
}

/// `matchMedia` + `navigator.deviceMemory`.
pub struct BrowserCapabilities {
    window: web_sys::Window,
}

impl BrowserCapabilities {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Capabilities for BrowserCapabilities {
    fn prefers_reduced_motion(&self) -> bool {
        match self.window.match_media("(prefers-reduced-motion: reduce)") {
            Ok(Some(mql)) => mql.matches(),
            _ => false,
        }
    }

    fn device_memory_gb(&self) -> Option<f64> {
        // Not in the web-sys Navigator bindings (Chromium only).
        let navigator: JsValue = self.window.navigator().into();
        js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
            .ok()
            .and_then(|v| v.as_f64())
    }
}
