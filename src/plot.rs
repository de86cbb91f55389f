//! Plot rendering
//!
//! Each plot is drawn with `plotters` and written as a PNG file in the
//! output directory:
//!  - `plot.png`: Bessel function with its first maximum,
//!  - `intensity.png`: sinusoidal intensity field color map,
//!  - `contour.png`: Gaussian bumps iso-lines,
//!  - `gradient.png`: synthetic RGB gradient.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use plotters::{coord::Shift, drawing::DrawingAreaErrorKind, prelude::*};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    bessel::BesselCurve,
    config::Config,
    field::{self, contour_levels, contour_segments},
    optimize::OptimizeError,
};

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to create the output directory {1:?}")]
    OutputDir(#[source] io::Error, PathBuf),
    #[error("failed to draw the plot: {0}")]
    Drawing(String),
    #[error("failed to write {1:?}")]
    Write(#[source] io::Error, PathBuf),
    #[error("failed to encode the PNG image")]
    Encoding(#[from] png::EncodingError),
    #[error("Bessel function extremum search failed")]
    Optimize(#[from] OptimizeError),
    #[error("the {0} field has no finite sample")]
    EmptyField(PlotKind),
}
impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(error.to_string())
    }
}
type Result<T> = std::result::Result<T, PlotError>;

/// Figure size in inches and resolution in dots per inch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}
impl Default for Figure {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: 96.,
        }
    }
}
impl Figure {
    /// Raster size in pixels
    pub fn pixels(&self) -> (u32, u32) {
        (
            ((self.width_in * self.dpi).floor() as u32).max(1),
            ((self.height_in * self.dpi).floor() as u32).max(1),
        )
    }
    /// Resolution in pixels per meter
    pub fn pixels_per_meter(&self) -> u32 {
        (self.dpi / 0.0254).round() as u32
    }
}

/// The plots of the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PlotKind {
    Bessel,
    Intensity,
    Contour,
    Gradient,
}
impl PlotKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            PlotKind::Bessel => "plot.png",
            PlotKind::Intensity => "intensity.png",
            PlotKind::Contour => "contour.png",
            PlotKind::Gradient => "gradient.png",
        }
    }
    pub fn title(&self) -> &'static str {
        match self {
            PlotKind::Bessel => "Bessel function",
            PlotKind::Intensity => "Intensity",
            PlotKind::Contour => "Contour",
            PlotKind::Gradient => "RGB gradient",
        }
    }
}

/// Field grid resolution
const FIELD_GRID: usize = 120;
/// Number of contour levels
const N_LEVEL: usize = 8;
/// Gradient image size
const GRADIENT_SIZE: (u32, u32) = (256, 192);
/// Width of the color bar area
const COLORBAR_WIDTH: i32 = 90;
const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);

fn rgb(color: colorous::Color) -> RGBColor {
    let (r, g, b) = color.as_tuple();
    RGBColor(r, g, b)
}

/// PNG plot renderer
#[derive(Debug, Clone)]
pub struct Plotter {
    output_dir: PathBuf,
    figure: Figure,
    order: u32,
}
impl Default for Plotter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
impl Plotter {
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: config.get_output_dir().to_path_buf(),
            figure: config.get_figure(),
            order: config.get_order(),
        }
    }
    /// Path to the file of a given plot
    pub fn path(&self, kind: PlotKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }
    fn output_path(&self, kind: PlotKind) -> Result<PathBuf> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)
                .map_err(|e| PlotError::OutputDir(e, self.output_dir.clone()))?;
        }
        Ok(self.path(kind))
    }
    /// Renders a plot and returns the path to the PNG file
    pub fn render(&self, kind: PlotKind) -> Result<PathBuf> {
        match kind {
            PlotKind::Bessel => self.bessel(self.order),
            PlotKind::Intensity => self.intensity(),
            PlotKind::Contour => self.contour(),
            PlotKind::Gradient => self.gradient(),
        }
    }
    /// Renders all the plots
    pub fn render_all(&self) -> Result<Vec<PathBuf>> {
        PlotKind::iter().map(|kind| self.render(kind)).collect()
    }
    /// Bessel function `J_order` plot written to `plot.png`
    pub fn bessel(&self, order: u32) -> Result<PathBuf> {
        let curve = BesselCurve::new(order)?;
        self.bessel_curve(&curve)
    }
    /// Draws a computed Bessel function curve into `plot.png`
    pub fn bessel_curve(&self, curve: &BesselCurve) -> Result<PathBuf> {
        let path = self.output_path(PlotKind::Bessel)?;
        self.bessel_to(curve, &path)?;
        Ok(path)
    }
    /// Draws a Bessel function curve into `path`
    pub fn bessel_to<P: AsRef<Path>>(&self, curve: &BesselCurve, path: P) -> Result<()> {
        let now = Instant::now();
        let path = path.as_ref();
        self.save(path, |root| {
            let (ymin, ymax) = curve.minmax();
            let pad = 0.05 * (ymax - ymin).max(f64::EPSILON);
            let mut chart = ChartBuilder::on(root)
                .caption(
                    format!("{} J{}", PlotKind::Bessel.title(), curve.order),
                    CAPTION_FONT,
                )
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .margin(10)
                .build_cartesian_2d(-0.5f64..10.5f64, ymin - pad..ymax + pad)?;
            chart
                .configure_mesh()
                .x_desc("x")
                .y_desc(format!("J{}(x)", curve.order))
                .draw()?;

            let mut colors = colorous::TABLEAU10.iter().cycle();
            let line = colors.next().copied().map(rgb).unwrap_or(BLUE);
            let marker = colors.next().copied().map(rgb).unwrap_or(RED);
            chart
                .draw_series(LineSeries::new(curve.xy_iter(), &line))?
                .label(format!("J{}", curve.order))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &line));
            let (x_peak, y_peak) = curve.peak();
            chart
                .draw_series(std::iter::once(Circle::new(
                    (x_peak, y_peak),
                    5,
                    marker.filled(),
                )))?
                .label(format!("max ({:.4}, {:.4})", x_peak, y_peak))
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, marker.filled()));
            chart
                .configure_series_labels()
                .border_style(&BLACK)
                .background_style(&WHITE.mix(0.8))
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
            Ok(())
        })?;
        log::info!(
            "J{} plot written to {:?} in {}ms",
            curve.order,
            path,
            now.elapsed().as_millis()
        );
        Ok(())
    }
    /// Intensity field color map written to `intensity.png`
    pub fn intensity(&self) -> Result<PathBuf> {
        let path = self.output_path(PlotKind::Intensity)?;
        self.intensity_to(&path)?;
        Ok(path)
    }
    /// Draws the intensity field color map into `path`
    pub fn intensity_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let now = Instant::now();
        let path = path.as_ref();
        let grid = field::intensity_field(FIELD_GRID, FIELD_GRID);
        let (vmin, vmax) = grid
            .minmax()
            .ok_or(PlotError::EmptyField(PlotKind::Intensity))?;

        let cmap = colorous::VIRIDIS;
        let span = (vmax - vmin).max(f64::EPSILON);
        let color = |v: f64| rgb(cmap.eval_continuous(((v - vmin) / span).clamp(0., 1.)));

        let (width, _) = self.figure.pixels();
        self.save(path, |root| {
            let (map_area, bar_area) =
                root.split_horizontally((width as i32 - COLORBAR_WIDTH).max(1));

            let (x0, y0, _, _, _) = grid.cells().next().unwrap_or_default();
            let (_, _, x1, y1, _) = grid.cells().last().unwrap_or_default();
            let mut chart = ChartBuilder::on(&map_area)
                .caption(PlotKind::Intensity.title(), CAPTION_FONT)
                .set_label_area_size(LabelAreaPosition::Left, 40)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .margin(10)
                .build_cartesian_2d(x0..x1, y0..y1)?;
            chart
                .configure_mesh()
                .disable_mesh()
                .x_desc("x")
                .y_desc("y")
                .draw()?;
            chart.draw_series(grid.cells().map(|(x0, y0, x1, y1, v)| {
                Rectangle::new([(x0, y0), (x1, y1)], color(v).filled())
            }))?;

            colorbar(&bar_area, (vmin, vmax), color)
        })?;
        log::info!(
            "intensity plot written to {:?} in {}ms",
            path,
            now.elapsed().as_millis()
        );
        Ok(())
    }
    /// Gaussian bumps iso-lines written to `contour.png`
    pub fn contour(&self) -> Result<PathBuf> {
        let path = self.output_path(PlotKind::Contour)?;
        self.contour_to(&path)?;
        Ok(path)
    }
    /// Draws the Gaussian bumps iso-lines into `path`
    pub fn contour_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let now = Instant::now();
        let path = path.as_ref();
        let grid = field::gaussian_bumps(FIELD_GRID, FIELD_GRID);
        let (vmin, vmax) = grid
            .minmax()
            .ok_or(PlotError::EmptyField(PlotKind::Contour))?;

        self.save(path, |root| {
            let (x0, x1) = extent(&grid.x);
            let (y0, y1) = extent(&grid.y);
            let mut chart = ChartBuilder::on(root)
                .caption(PlotKind::Contour.title(), CAPTION_FONT)
                .set_label_area_size(LabelAreaPosition::Left, 40)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .margin(10)
                .build_cartesian_2d(x0..x1, y0..y1)?;
            chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

            let cmap = colorous::VIRIDIS;
            let levels = contour_levels(vmin, vmax, N_LEVEL);
            let n_level = levels.len().max(2) as f64;
            for (k, level) in levels.into_iter().enumerate() {
                let c = rgb(cmap.eval_continuous(k as f64 / (n_level - 1.)));
                let segments = contour_segments(&grid, level);
                log::debug!("level {:.3}: {} segments", level, segments.len());
                chart
                    .draw_series(
                        segments
                            .into_iter()
                            .map(|(a, b)| PathElement::new(vec![a, b], c.stroke_width(2))),
                    )?
                    .label(format!("{:.2}", level))
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &c));
            }
            chart
                .configure_series_labels()
                .border_style(&BLACK)
                .background_style(&WHITE.mix(0.8))
                .position(SeriesLabelPosition::UpperLeft)
                .draw()?;
            Ok(())
        })?;
        log::info!(
            "contour plot written to {:?} in {}ms",
            path,
            now.elapsed().as_millis()
        );
        Ok(())
    }
    /// Synthetic RGB gradient written to `gradient.png`
    pub fn gradient(&self) -> Result<PathBuf> {
        let path = self.output_path(PlotKind::Gradient)?;
        self.gradient_to(&path)?;
        Ok(path)
    }
    /// Draws the synthetic RGB gradient into `path`
    pub fn gradient_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let now = Instant::now();
        let path = path.as_ref();
        let (width, height) = GRADIENT_SIZE;
        let img = field::rgb_gradient(width, height);

        self.save(path, |root| {
            let (w, h) = (width as i32, height as i32);
            let mut chart = ChartBuilder::on(root)
                .caption(PlotKind::Gradient.title(), CAPTION_FONT)
                .set_label_area_size(LabelAreaPosition::Left, 40)
                .set_label_area_size(LabelAreaPosition::Bottom, 40)
                .margin(10)
                .build_cartesian_2d(0..w, 0..h)?;
            chart.configure_mesh().disable_mesh().draw()?;
            // first image row at the top
            chart.draw_series(img.enumerate_pixels().map(|(i, j, p)| {
                let (i, j) = (i as i32, j as i32);
                Rectangle::new(
                    [(i, h - j - 1), (i + 1, h - j)],
                    RGBColor(p[0], p[1], p[2]).filled(),
                )
            }))?;
            Ok(())
        })?;
        log::info!(
            "gradient plot written to {:?} in {}ms",
            path,
            now.elapsed().as_millis()
        );
        Ok(())
    }
    /// Rasterizes a drawing on a white background and writes it as a PNG file
    ///
    /// The PNG physical resolution is set to the figure dpi
    fn save<F>(&self, path: &Path, draw: F) -> Result<()>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
    {
        let (width, height) = self.figure.pixels();
        let mut buffer = vec![0u8; 3 * width as usize * height as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;
            draw(&root)?;
            root.present()?;
        }

        let file = fs::File::create(path).map_err(|e| PlotError::Write(e, path.to_path_buf()))?;
        let mut encoder = png::Encoder::new(io::BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let ppu = self.figure.pixels_per_meter();
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppu,
            yppu: ppu,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&buffer)?;
        writer.finish()?;
        Ok(())
    }
}

fn extent(v: &[f64]) -> (f64, f64) {
    match (v.first(), v.last()) {
        (Some(&a), Some(&b)) if b > a => (a, b),
        (Some(&a), _) => (a - 0.5, a + 0.5),
        _ => (0., 1.),
    }
}

fn colorbar<F>(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    (vmin, vmax): (f64, f64),
    color: F,
) -> Result<()>
where
    F: Fn(f64) -> RGBColor,
{
    let n = 100;
    let span = (vmax - vmin).max(f64::EPSILON);
    let dv = span / n as f64;
    let mut chart = ChartBuilder::on(area)
        .set_label_area_size(LabelAreaPosition::Left, 45)
        .margin_top(40)
        .margin_bottom(50)
        .margin_right(15)
        .build_cartesian_2d(0f64..1f64, vmin..vmin + span)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .draw()?;
    chart.draw_series((0..n).map(|k| {
        let v = vmin + k as f64 * dv;
        Rectangle::new([(0., v), (1., v + dv)], color(v + 0.5 * dv).filled())
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_io::{load_scaled, MAX_IMAGE_SIZE};

    fn plotter(dir: &Path) -> Plotter {
        Plotter::new(&Config::default().output_dir(dir))
    }

    #[test]
    fn figure_pixels() {
        assert_eq!(Figure::default().pixels(), (614, 460));
        assert_eq!(Figure::default().pixels_per_meter(), 3780);
        let figure = Figure {
            width_in: 4.,
            height_in: 4.,
            dpi: 100.,
        };
        assert_eq!(figure.pixels(), (400, 400));
    }

    #[test]
    fn kinds() {
        let names: Vec<_> = PlotKind::iter().map(|k| k.file_name()).collect();
        assert_eq!(
            names,
            ["plot.png", "intensity.png", "contour.png", "gradient.png"]
        );
        assert_eq!("contour".parse::<PlotKind>().unwrap(), PlotKind::Contour);
        assert_eq!(PlotKind::Gradient.to_string(), "gradient");
    }

    #[test]
    fn bessel_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = plotter(dir.path()).bessel(3).unwrap();
        assert_eq!(path, dir.path().join("plot.png"));
        let raw = image::open(&path).unwrap();
        assert_eq!((raw.width(), raw.height()), Figure::default().pixels());
        let img = load_scaled(&path, MAX_IMAGE_SIZE).unwrap();
        assert_eq!(img.width.max(img.height), MAX_IMAGE_SIZE);
        assert_eq!((img.width, img.height), (460, 344));
    }

    #[test]
    fn bessel_curve_order() {
        let dir = tempfile::tempdir().unwrap();
        let curve = BesselCurve::new(1).unwrap();
        let path = plotter(dir.path()).bessel_curve(&curve).unwrap();
        assert_eq!(path, dir.path().join("plot.png"));
        assert!(path.exists());
    }

    #[test]
    fn render_all() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("plots");
        let paths = plotter(&output).render_all().unwrap();
        assert_eq!(paths.len(), 4);
        for (kind, path) in PlotKind::iter().zip(paths) {
            assert_eq!(path, output.join(kind.file_name()));
            let img = image::open(&path).unwrap();
            assert_eq!((img.width(), img.height()), (614, 460));
        }
    }

    #[test]
    fn draw_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let plotter = plotter(dir.path());
        let path = dir.path().join("levels.png");
        plotter.contour_to(&path).unwrap();
        plotter.intensity_to(dir.path().join("map.png")).unwrap();
        plotter.gradient_to(dir.path().join("rgb.png")).unwrap();
        for name in ["levels.png", "map.png", "rgb.png"] {
            let img = image::open(dir.path().join(name)).unwrap();
            assert_eq!((img.width(), img.height()), (614, 460));
        }
        // nothing written under the default names
        assert!(!plotter.path(PlotKind::Contour).exists());
    }

    #[test]
    fn png_resolution() {
        let dir = tempfile::tempdir().unwrap();
        for kind in PlotKind::iter() {
            let path = plotter(dir.path()).render(kind).unwrap();
            let decoder = png::Decoder::new(fs::File::open(&path).unwrap());
            let reader = decoder.read_info().unwrap();
            let info = reader.info();
            assert_eq!((info.width, info.height), (614, 460));
            let dims = info.pixel_dims.unwrap();
            assert_eq!((dims.xppu, dims.yppu), (3780, 3780), "{}", kind);
            assert_eq!(dims.unit, png::Unit::Meter);
        }
    }
}
