mod api;
mod app;
mod browser;
mod camera;
mod components;
mod config;
mod draft;
mod error;
mod ledger;
mod model;
mod notice;
mod report;
mod scan;
mod session;

use app::{App, AppProps};
use config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::debug!("using backend {}", config.backend_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
