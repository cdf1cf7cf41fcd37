#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use env_logger::{Builder, Env};

mod components;
mod error;
mod process;
mod structs;
mod types;
mod ui;
mod util;

const ENV_LOG: &str = "ICO_CONVERTER_LOG";
const ENV_LOG_STYLE: &str = "ICO_CONVERTER_LOG_STYLE";

fn main() -> eframe::Result {
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 420.0])
            .with_drag_and_drop(true)
            .with_maximize_button(false),
        ..Default::default()
    };

    eframe::run_native(
        "Image to ICO converter",
        options,
        Box::new(|_cc| Ok(Box::<ui::App>::default())),
    )
}
