//! Academy splash core crate.
//!
//! Two-screen splash: floating dot particles under a headline that, once
//! activated, fades into a second screen with bar particles and a looping
//! typewriter. `start_splash()` wires it to the page; everything below `dom`
//! is browser-independent and driven through the `surface`, `scheduler` and
//! `capabilities` traits.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod capabilities;
pub mod config;
pub mod dom;
pub mod error;
pub mod input;
pub mod logging;
pub mod particles;
pub mod scheduler;
pub mod surface;
pub mod transition;
pub mod typewriter;

pub use config::SplashConfig;
pub use error::SplashError;
pub use transition::{SplashController, SplashView};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

thread_local! {
    // Keeps the controller (and through it every timer/listener target) alive for the page.
    static SPLASH: RefCell<Option<SplashController>> = const { RefCell::new(None) };
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_splash() -> Result<(), JsValue> {
    start_with(SplashConfig::default()).map_err(Into::into)
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_splash_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = SplashConfig::from_json(json)?;
    start_with(cfg).map_err(Into::into)
}

fn start_with(cfg: SplashConfig) -> Result<(), SplashError> {
    if SPLASH.with(|s| s.borrow().is_some()) {
        log::warn!("splash already started");
        return Ok(());
    }

    let win = web_sys::window().ok_or(SplashError::NoWindow)?;
    let doc = win.document().ok_or(SplashError::NoDocument)?;

    let elements = dom::SplashElements::resolve(&doc, &cfg.ids)?;
    let profile = capabilities::DeviceProfile::probe(&capabilities::BrowserCapabilities::new(win.clone()));
    log::debug!("device profile: {profile:?}");

    let scheduler: Rc<dyn scheduler::Scheduler> = Rc::new(scheduler::BrowserScheduler::new(win));
    let controller = SplashController::new(
        cfg,
        elements.view,
        scheduler,
        Box::new(particles::BrowserRandom::default()),
        profile,
    );
    controller.init();
    dom::attach_headline_listeners(&elements.headline, &controller)?;

    SPLASH.with(|s| s.replace(Some(controller)));
    Ok(())
}
