// RockolaFly landing page compiled to WebAssembly.
//
// The header runs a particle "vortex" on a 2D canvas behind the navigation
// and hero text; below it sit the signup and contact forms. `start` (run
// automatically by wasm-bindgen) mounts everything into `document.body`.

mod animation;
mod color;
mod config;
mod dom;
mod forms;
mod header;
mod page;
mod particle;
mod renderer;
mod utils;
mod viewport;
mod vortex;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub use color::{fade_alpha, Hsla};
pub use config::{VortexConfig, MOBILE_BREAKPOINT};
pub use forms::{FieldKind, FieldSpec, FormKind, FormRecord, FormState, MissingFields, SubmissionSink};
pub use header::VortexHeader;
pub use page::LandingPage;
pub use particle::{Particle, SpawnBand, PARTICLE_PROP_COUNT};
pub use viewport::{FormFactor, Viewport};
pub use vortex::{Stroke, Surface, Vortex};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

thread_local! {
    static PAGE: RefCell<Option<LandingPage>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    if let Err(err) = mount_landing_page(VortexConfig::default()) {
        log::error!("landing page failed to mount: {:?}", err);
    }
}

/// Mount the page into `document.body`, replacing any page mounted before.
#[wasm_bindgen(js_name = mountLandingPage)]
pub fn mount_landing_page(config: VortexConfig) -> Result<(), JsValue> {
    unmount_landing_page();
    let body = dom::document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let page = LandingPage::mount(&body, config)?;
    PAGE.with(|cell| *cell.borrow_mut() = Some(page));
    Ok(())
}

/// Stop the animation and remove the page from the document.
#[wasm_bindgen(js_name = unmountLandingPage)]
pub fn unmount_landing_page() {
    let page = PAGE.with(|cell| cell.borrow_mut().take());
    drop(page);
}
