//! Client-side controller for the pricing/checkout page embedded in the
//! site-builder template. The host page registers [`run`] as its startup
//! hook; everything else binds to attribute-tagged regions of the template.

use log::{info, Level};
use wasm_bindgen::prelude::*;

pub mod account;
pub mod api;
pub mod checkout;
pub mod config;
pub mod dom;
pub mod format;
pub mod page;
pub mod plan;
pub mod reconcile;
pub mod token;

/// Page-load entry point, invoked once by the host page's startup hook.
#[wasm_bindgen]
pub async fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // tolerate a host that registers the hook more than once
    let _ = console_log::init_with_level(Level::Info);
    info!("Script loaded");

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    page::run(&document).await
}
