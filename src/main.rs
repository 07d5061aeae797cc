mod app;
mod color;
mod data;
mod state;
mod ui;

use app::CarbonScopeApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Energy and Carbon Emission Review"),
        ..Default::default()
    };

    eframe::run_native(
        "Energy and Carbon Emission Review",
        options,
        Box::new(|cc| Ok(Box::new(CarbonScopeApp::new(cc)))),
    )
}
