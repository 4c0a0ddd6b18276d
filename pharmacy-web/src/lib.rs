#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod components;
pub mod dom;
pub mod i18n;
#[cfg(test)]
mod i18n_tests;
pub mod logger;
pub mod pages;
pub mod paths;
pub mod router;
pub mod service;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::ConsoleLogger::install(log::LevelFilter::Info);
    // Sets <html lang dir> from the saved language before the first paint.
    i18n::set_lang(i18n::current_lang());
    a11y::inject_focus_css();
    log::info!("storefront starting");
    yew::Renderer::<app::App>::new().render();
}
