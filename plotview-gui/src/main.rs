mod app;
mod panel;

use eframe::egui;
use plotview::Config;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::from_env()?;
    log::info!("writing plots to {:?}", config.get_output_dir());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sample editor")
            .with_inner_size([1040.0, 640.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sample editor",
        options,
        Box::new(move |cc| Ok(Box::new(app::SampleEditor::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the application: {}", e))
}
