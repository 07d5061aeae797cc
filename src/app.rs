use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui;

use crate::data::loader::{self, LoadError};
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CarbonScopeApp {
    pub state: AppState,
    /// Completion signal from the one-shot background fetch.
    load_rx: Option<Receiver<Result<&'static Dataset, LoadError>>>,
}

impl CarbonScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // Kick off the fetch immediately; the UI thread never blocks on it.
        let (tx, rx) = channel();
        thread::spawn(move || {
            let _ = tx.send(loader::load());
        });

        Self {
            state: AppState::default(),
            load_rx: Some(rx),
        }
    }

    /// Drain the load channel; the fetch completes exactly once.
    fn check_load_result(&mut self) {
        if let Some(rx) = self.load_rx.take() {
            match rx.try_recv() {
                Ok(Ok(dataset)) => {
                    log::info!(
                        "Loaded {} records across {} countries",
                        dataset.len(),
                        dataset.countries.len()
                    );
                    self.state.set_dataset(dataset);
                }
                Ok(Err(e)) => {
                    log::error!("Failed to load dataset: {e}");
                    self.state.fail_load(format!("Error: {e}"));
                }
                // Still in flight: put the receiver back.
                Err(_) => self.load_rx = Some(rx),
            }
        }
    }
}

impl eframe::App for CarbonScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_result();
        if self.state.loading {
            ctx.request_repaint();
        }

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabbed views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            views::central_panel(ui, &mut self.state);
        });
    }
}
