#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Figure Poser"),
        ..Default::default()
    };
    eframe::run_native(
        "figure_poser",
        native_options,
        Box::new(|cc| Ok(Box::new(figure_poser::FigurePoserApp::new(cc)))),
    )
}

// The editor only ships as a native app
#[cfg(target_arch = "wasm32")]
fn main() {}
