//! Chart adapter - Implements ChartPort with plotters
//!
//! The chart is drawn with the plotters SVG backend and rasterized to PNG
//! with resvg, so no native font or image libraries are needed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{ChartImage, ChartPort};
use domain::{LocationQuery, WeatherReport};
use plotters::prelude::*;
use resvg::{tiny_skia, usvg};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ChartAppConfig;

/// Bar colour for the temperature value
const TEMPERATURE_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Bar colour for the humidity value
const HUMIDITY_COLOR: RGBColor = RGBColor(144, 238, 144);

/// Bar labels in drawing order
const BAR_LABELS: [&str; 2] = ["Temperature", "Humidity"];

/// Largest magnitude drawn on the value axis; larger values are clipped to it
///
/// Plotters cannot lay out an axis whose span is not finite.
const AXIS_LIMIT: f64 = 1e300;

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    /// A value cannot be placed on an axis
    #[error("cannot chart non-finite value {0}")]
    NonFinite(f64),

    /// Zero-sized image requested
    #[error("invalid image size {0}x{1}")]
    InvalidSize(u32, u32),

    /// Plotters failed while drawing
    #[error("drawing failed: {0}")]
    Drawing(String),

    /// The value axis cannot be laid out
    #[error("cannot build value axis {0}..{1}")]
    AxisRange(f64, f64),

    /// The SVG could not be rasterized or encoded
    #[error("rasterizing failed: {0}")]
    Rasterize(String),

    /// The PNG could not be written
    #[error("writing chart failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ChartError> for ApplicationError {
    fn from(err: ChartError) -> Self {
        Self::Rendering(err.to_string())
    }
}

/// Two-bar weather chart renderer
pub struct PlottersChartRenderer {
    width: u32,
    height: u32,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for PlottersChartRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlottersChartRenderer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fonts", &self.fontdb.len())
            .finish()
    }
}

impl PlottersChartRenderer {
    /// Create a renderer producing `width` x `height` pixel images
    ///
    /// System fonts are loaded once here; without any, labels are omitted
    /// but the bars still render.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!(fonts = fontdb.len(), "Loaded chart fonts");

        Self {
            width,
            height,
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a renderer from configuration
    #[must_use]
    pub fn from_config(config: &ChartAppConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Image size in pixels
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Render the chart for raw values as PNG bytes
    pub fn render_png(
        &self,
        location: &str,
        temperature: f64,
        humidity: f64,
    ) -> Result<Vec<u8>, ChartError> {
        for value in [temperature, humidity] {
            if !value.is_finite() {
                return Err(ChartError::NonFinite(value));
            }
        }
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidSize(self.width, self.height));
        }

        let (temperature, humidity) = (clip_to_axis(temperature), clip_to_axis(humidity));
        let svg = self.draw_svg(location, temperature, humidity)?;
        self.rasterize(&svg)
    }

    /// Render the chart and write it to `path`
    ///
    /// Any existing file is replaced. The file is kept afterwards.
    #[instrument(skip(self, report), fields(path = %path.display()))]
    pub fn render_to_file(
        &self,
        location: &LocationQuery,
        report: &WeatherReport,
        path: &Path,
    ) -> Result<PathBuf, ApplicationError> {
        let image = self.render(location, report)?;
        std::fs::write(path, image.bytes()).map_err(ChartError::from)?;
        debug!(bytes = image.bytes().len(), "Chart written");
        Ok(path.to_path_buf())
    }

    fn draw_svg(&self, location: &str, temperature: f64, humidity: f64) -> Result<String, ChartError> {
        let (y_min, y_max) = value_range(temperature, humidity);
        if !(y_max - y_min).is_finite() {
            return Err(ChartError::AxisRange(y_min, y_max));
        }
        let mut svg = String::new();

        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(drawing_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(format!("Weather in {location}"), ("sans-serif", 30))
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d((0u32..2u32).into_segmented(), y_min..y_max)
                .map_err(drawing_error)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("Values")
                .x_label_formatter(&|value| match value {
                    SegmentValue::CenterOf(index) => BAR_LABELS
                        .get(*index as usize)
                        .copied()
                        .unwrap_or_default()
                        .to_string(),
                    _ => String::new(),
                })
                .draw()
                .map_err(drawing_error)?;

            let bars = [(0u32, temperature, TEMPERATURE_COLOR), (1, humidity, HUMIDITY_COLOR)];
            for (index, value, color) in bars {
                // Corners must be (top-left, bottom-right) for negative values too
                let (low, high) = if value < 0.0 { (value, 0.0) } else { (0.0, value) };
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(index), high),
                        (SegmentValue::Exact(index + 1), low),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, 40, 40);
                chart
                    .draw_series(std::iter::once(bar))
                    .map_err(drawing_error)?;
            }

            root.present().map_err(drawing_error)?;
        }

        Ok(svg)
    }

    fn rasterize(&self, svg: &str) -> Result<Vec<u8>, ChartError> {
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|e| ChartError::Rasterize(e.to_string()))?;

        let mut pixmap = tiny_skia::Pixmap::new(self.width, self.height)
            .ok_or(ChartError::InvalidSize(self.width, self.height))?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| ChartError::Rasterize(e.to_string()))
    }
}

impl ChartPort for PlottersChartRenderer {
    #[instrument(skip(self, report), fields(location = %location))]
    fn render(
        &self,
        location: &LocationQuery,
        report: &WeatherReport,
    ) -> Result<ChartImage, ApplicationError> {
        let png = self.render_png(
            location.as_str(),
            report.temperature_celsius(),
            report.humidity().as_f64(),
        )?;
        let image = ChartImage::new(png);
        debug!(request_id = %image.request_id(), bytes = image.bytes().len(), "Chart rendered");
        Ok(image)
    }
}

/// Y-axis range covering zero and both values, with some headroom
///
/// Saturates at `f64::MAX` instead of overflowing.
fn value_range(temperature: f64, humidity: f64) -> (f64, f64) {
    let low = temperature.min(humidity).min(0.0);
    let high = temperature.max(humidity).max(0.0);
    let padding = (high * 0.1 - low * 0.1).max(1.0);
    (
        if low < 0.0 {
            low - padding.min(low + f64::MAX)
        } else {
            0.0
        },
        high + padding.min(f64::MAX - high),
    )
}

/// Clip a value to the drawable axis
fn clip_to_axis(value: f64) -> f64 {
    if value.abs() > AXIS_LIMIT {
        debug!(value, "Value clipped to chart axis");
    }
    value.clamp(-AXIS_LIMIT, AXIS_LIMIT)
}

fn drawing_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Drawing(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Humidity;
    use proptest::prelude::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn renderer() -> PlottersChartRenderer {
        PlottersChartRenderer::new(400, 300)
    }

    fn report(temperature: f64, humidity: u8) -> WeatherReport {
        WeatherReport::new("clear sky", temperature, Humidity::new(humidity).unwrap()).unwrap()
    }

    #[test]
    fn value_range_includes_zero_and_values() {
        let (low, high) = value_range(18.5, 60.0);
        assert!(low <= 0.0 && high >= 60.0);

        let (low, high) = value_range(-25.0, 0.0);
        assert!(low < -25.0 && high > 0.0);

        let (low, high) = value_range(0.0, 0.0);
        assert!(low <= 0.0 && high > 0.0);
    }

    fn finite_f64() -> impl Strategy<Value = f64> {
        prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
    }

    proptest! {
        #[test]
        fn value_range_is_finite_and_covers_values(
            temperature in finite_f64(),
            humidity in 0.0f64..=100.0,
        ) {
            let (low, high) = value_range(temperature, humidity);
            prop_assert!(low.is_finite() && high.is_finite());
            prop_assert!(low <= temperature.min(0.0));
            prop_assert!(high >= temperature.max(humidity));
            prop_assert!(low < high);
        }

        #[test]
        fn clipped_values_give_finite_axis_span(temperature in finite_f64()) {
            let (low, high) = value_range(clip_to_axis(temperature), 100.0);
            prop_assert!((high - low).is_finite());
        }
    }

    #[test]
    fn value_range_saturates_at_extremes() {
        let (low, high) = value_range(f64::MAX, 100.0);
        assert!(low <= 0.0);
        assert!((high - f64::MAX).abs() < f64::EPSILON);

        let (low, high) = value_range(-f64::MAX, 0.0);
        assert!((low + f64::MAX).abs() < f64::EPSILON);
        assert!(high > 0.0);
    }

    #[test]
    fn render_handles_extreme_finite_temperatures() {
        for temperature in [f64::MAX, -f64::MAX, f64::MIN_POSITIVE, 1e300, -1e300] {
            let image = renderer()
                .render(&LocationQuery::new("Anywhere"), &report(temperature, 50))
                .unwrap();
            assert!(image.bytes().starts_with(&PNG_MAGIC), "failed for {temperature}");
        }
    }

    #[test]
    fn render_png_clips_to_axis_limit() {
        let renderer = renderer();
        let at_limit = renderer.render_png("Paris", AXIS_LIMIT, 50.0).unwrap();
        let beyond = renderer.render_png("Paris", f64::MAX, 50.0).unwrap();
        assert_eq!(at_limit, beyond);
    }

    #[test]
    fn render_produces_png() {
        let image = renderer()
            .render(&LocationQuery::new("Paris"), &report(18.5, 60))
            .unwrap();
        assert!(image.bytes().starts_with(&PNG_MAGIC));
    }

    #[test]
    fn render_handles_negative_temperature() {
        let image = renderer()
            .render(&LocationQuery::new("Yakutsk"), &report(-41.3, 75))
            .unwrap();
        assert!(image.bytes().starts_with(&PNG_MAGIC));
    }

    #[test]
    fn render_handles_humidity_bounds() {
        for humidity in [Humidity::MIN.percent(), Humidity::MAX.percent()] {
            let image = renderer()
                .render(&LocationQuery::new("Anywhere"), &report(0.0, humidity))
                .unwrap();
            assert!(image.bytes().starts_with(&PNG_MAGIC));
        }
    }

    #[test]
    fn render_handles_empty_location() {
        assert!(renderer().render(&LocationQuery::default(), &report(5.0, 50)).is_ok());
    }

    #[test]
    fn render_png_rejects_non_finite() {
        let err = renderer().render_png("Paris", f64::INFINITY, 50.0).unwrap_err();
        assert!(matches!(err, ChartError::NonFinite(_)));

        let err = renderer().render_png("Paris", 10.0, f64::NAN).unwrap_err();
        assert!(matches!(err, ChartError::NonFinite(_)));
    }

    #[test]
    fn render_png_rejects_zero_size() {
        let err = PlottersChartRenderer::new(0, 300)
            .render_png("Paris", 10.0, 50.0)
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidSize(0, 300)));
    }

    #[test]
    fn render_error_maps_to_rendering() {
        let err: ApplicationError = ChartError::NonFinite(f64::NAN).into();
        assert!(matches!(err, ApplicationError::Rendering(_)));
    }

    #[test]
    fn each_render_gets_own_request_id() {
        let renderer = renderer();
        let location = LocationQuery::new("Paris");
        let first = renderer.render(&location, &report(18.5, 60)).unwrap();
        let second = renderer.render(&location, &report(18.5, 60)).unwrap();
        assert_ne!(first.request_id(), second.request_id());
    }

    #[test]
    fn render_to_file_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.png");
        let renderer = renderer();

        renderer
            .render_to_file(&LocationQuery::new("Paris"), &report(18.5, 60), &path)
            .unwrap();
        let written = renderer
            .render_to_file(&LocationQuery::new("Oslo"), &report(-3.0, 90), &path)
            .unwrap();

        assert_eq!(written, path);
        let on_disk = std::fs::read(&path).unwrap();
        let expected = renderer.render_png("Oslo", -3.0, 90.0).unwrap();
        assert_eq!(on_disk, expected);
    }

    #[test]
    fn render_to_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("weather.png");

        let err = renderer()
            .render_to_file(&LocationQuery::new("Paris"), &report(18.5, 60), &path)
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Rendering(_)));
    }
}
