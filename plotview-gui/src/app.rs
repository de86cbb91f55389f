use std::path::{Path, PathBuf};

use eframe::egui;
use plotview::{image_io, Config, PlotKind, Plotter, ScaledImage};

use crate::panel::ImagePanel;

const ABOUT_HELP: &str = " Information about this program";
const EXIT_HELP: &str = " Terminate the program";
const OPEN_HELP: &str = " Open a file to edit";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    About,
    Exit,
    Open,
    DrawBessel,
}

/// Uploads a scaled image to the GPU
pub fn texture(ctx: &egui::Context, name: &str, img: &ScaledImage) -> egui::TextureHandle {
    ctx.load_texture(
        name,
        egui::ColorImage::from_rgba_unmultiplied(img.size(), &img.rgba),
        egui::TextureOptions::LINEAR,
    )
}

/// Error message with its causes
pub fn describe<E>(error: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::new(error))
}

fn menu_item(
    ui: &mut egui::Ui,
    label: &str,
    help: &'static str,
    item: Action,
    hover: &mut Option<&'static str>,
    action: &mut Option<Action>,
) {
    let response = ui.button(label);
    if response.hovered() {
        *hover = Some(help);
    }
    if response.clicked() {
        *action = Some(item);
        ui.close_menu();
    }
}

/// The application main window
pub struct SampleEditor {
    config: Config,
    plotter: Plotter,
    image_file: PathBuf,
    image: Option<egui::TextureHandle>,
    panel: ImagePanel,
    about_open: bool,
    status: String,
}
impl SampleEditor {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        Self::with_context(&cc.egui_ctx, config)
    }
    /// Computes all the plots and shows the Bessel plot
    pub fn with_context(ctx: &egui::Context, config: Config) -> Self {
        let plotter = Plotter::new(&config);
        let image_file = plotter.path(PlotKind::Bessel);
        let panel = ImagePanel::new(ctx, &plotter, config.get_max_image_size());
        let status = match panel.error(PlotKind::Bessel) {
            Some(error) => error.to_string(),
            None => format!("{} written", image_file.display()),
        };
        let mut this = Self {
            panel,
            config,
            plotter,
            image_file,
            image: None,
            about_open: false,
            status,
        };
        this.display_image(ctx);
        this
    }
    pub fn image_file(&self) -> &Path {
        &self.image_file
    }
    pub fn image_size(&self) -> Option<[usize; 2]> {
        self.image.as_ref().map(|texture| texture.size())
    }
    pub fn status(&self) -> &str {
        &self.status
    }
    fn calculate_bessel(&mut self) {
        match self.plotter.bessel(self.config.get_order()) {
            Ok(path) => self.status = format!("{} written", path.display()),
            Err(e) => {
                log::error!("{}", e);
                self.status = describe(e);
            }
        }
    }
    /// Loads the current image file into the displayed bitmap
    ///
    /// On failure the previous bitmap stays on screen and the error goes to the status bar
    fn display_image(&mut self, ctx: &egui::Context) {
        match image_io::load_scaled(&self.image_file, self.config.get_max_image_size()) {
            Ok(img) => {
                self.image = Some(texture(ctx, "image", &img));
            }
            Err(e) => {
                log::warn!("{}", e);
                self.status = describe(e);
            }
        }
    }
    /// Points the display at another file
    pub fn show_file<P: AsRef<Path>>(&mut self, ctx: &egui::Context, path: P) {
        self.image_file = path.as_ref().to_path_buf();
        self.status = format!("{}", self.image_file.display());
        self.display_image(ctx);
    }
    fn open(&mut self, ctx: &egui::Context) {
        let dialog = rfd::FileDialog::new()
            .set_title("Choose a file")
            .add_filter("PNG", &["png"]);
        if let Some(path) = dialog.pick_file() {
            self.show_file(ctx, path);
        }
    }
    /// Recomputes the Bessel plot and refreshes the display
    pub fn draw_bessel(&mut self, ctx: &egui::Context) {
        self.calculate_bessel();
        self.display_image(ctx);
        self.panel.reload(ctx, &self.plotter, PlotKind::Bessel);
    }
    pub fn ui(&mut self, ctx: &egui::Context) {
        let mut action = None;
        let mut hover = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    menu_item(ui, "About", ABOUT_HELP, Action::About, &mut hover, &mut action);
                    ui.separator();
                    menu_item(ui, "Exit", EXIT_HELP, Action::Exit, &mut hover, &mut action);
                    menu_item(ui, "Open", OPEN_HELP, Action::Open, &mut hover, &mut action);
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| match hover {
            Some(help) => ui.label(help),
            None => ui.label(&self.status),
        });

        egui::SidePanel::right("image_panel")
            .resizable(true)
            .default_width(480.0)
            .show(ctx, |ui| {
                if self.about_open {
                    ui.disable();
                }
                self.panel.ui(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.about_open {
                ui.disable();
            }
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                if ui.button("Draw Bessel").clicked() {
                    action = Some(Action::DrawBessel);
                }
                ui.add_space(10.0);
                if let Some(texture) = &self.image {
                    let size = texture.size_vec2();
                    ui.add_space(((ui.available_height() - size.y) / 2.0).max(0.0));
                    ui.image(egui::load::SizedTexture::new(texture.id(), size));
                }
            });
        });

        if self.about_open {
            let mut close = false;
            egui::Window::new("About Sample Editor")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label("A small text editor");
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            close = true;
                        }
                    });
                });
            if close {
                self.about_open = false;
            }
        }

        if let Some(action) = action {
            self.handle(ctx, action);
        }
    }
    fn handle(&mut self, ctx: &egui::Context, action: Action) {
        log::debug!("{:?}", action);
        match action {
            Action::About => self.about_open = true,
            Action::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Action::Open => self.open(ctx),
            Action::DrawBessel => self.draw_bessel(ctx),
        }
    }
}

impl eframe::App for SampleEditor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(dir: &Path) -> (egui::Context, SampleEditor) {
        let ctx = egui::Context::default();
        let config = Config::default().output_dir(dir);
        let editor = SampleEditor::with_context(&ctx, config);
        (ctx, editor)
    }

    #[test]
    fn startup() {
        let dir = tempfile::tempdir().unwrap();
        let (_ctx, editor) = editor(dir.path());
        assert_eq!(editor.image_file(), dir.path().join("plot.png"));
        assert_eq!(editor.image_size(), Some([460, 344]));
        assert!(editor.status().ends_with("plot.png written"));
        for kind in [PlotKind::Intensity, PlotKind::Contour, PlotKind::Gradient] {
            assert!(dir.path().join(kind.file_name()).exists());
        }
    }

    #[test]
    fn open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, mut editor) = editor(dir.path());
        editor.show_file(&ctx, dir.path().join("missing.png"));
        assert!(editor.status().contains("missing.png"));
        // the previous bitmap is still displayed
        assert_eq!(editor.image_size(), Some([460, 344]));
    }

    #[test]
    fn open_other_plot() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, mut editor) = editor(dir.path());
        editor.show_file(&ctx, dir.path().join("gradient.png"));
        assert_eq!(editor.image_file(), dir.path().join("gradient.png"));
        editor.draw_bessel(&ctx);
        // redraw refreshes the current file
        assert_eq!(editor.image_file(), dir.path().join("gradient.png"));
        assert_eq!(editor.image_size(), Some([460, 344]));
    }

    #[test]
    fn about() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, mut editor) = editor(dir.path());
        let _ = ctx.run(egui::RawInput::default(), |ctx| editor.ui(ctx));
        assert!(!editor.about_open);
        editor.handle(&ctx, Action::About);
        assert!(editor.about_open);
        // the dialog stays up until OK is clicked
        let _ = ctx.run(egui::RawInput::default(), |ctx| editor.ui(ctx));
        assert!(editor.about_open);
    }

    #[test]
    fn exit() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, mut editor) = editor(dir.path());
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            editor.handle(ctx, Action::Exit)
        });
        let commands = &output.viewport_output[&egui::ViewportId::ROOT].commands;
        assert!(commands.contains(&egui::ViewportCommand::Close));
    }
}
