use eframe::{egui, App, CreationContext};
use log::debug;

pub const WINDOW_TITLE: &str = "WebDAV uploader";

/// Idle window kept around for the `/StartMinimized` mode. It minimizes
/// itself on the first frame and does nothing else until closed.
#[derive(Default)]
pub struct BackgroundWindow {
    minimized: bool,
}

impl App for BackgroundWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.minimized {
            debug!("Minimizing background window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
            self.minimized = true;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(WINDOW_TITLE);
                ui.label("Send a file to this program to upload it.");
            });
        });
    }
}

pub fn run_background() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([320.0, 120.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc: &CreationContext| Box::new(BackgroundWindow::default())),
    )
}
