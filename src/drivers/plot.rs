use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use log::info;
use plotters::prelude::*;
use crate::drivers::error::MonitorError;
use crate::drivers::pipeline::SummaryExporter;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub line: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background: RGBColor(0, 0, 0),
            line: RED,
        }
    }
}
/// Render the smoothed session as a PNG on `[0, len] x [0, max_metric]`.
pub fn render_summary_png(
    smoothed: &[f64],
    metric: &str,
    max_metric: f64,
    style: &PlotStyle,
) -> Result<Vec<u8>, MonitorError> {
    if !max_metric.is_finite() || max_metric <= 0.0 {
        return Err(MonitorError::Plot(format!(
            "value axis must be positive, got {max_metric}"
        )));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_max = smoothed.len().max(1) as f64;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                "CPU Power Summary (All Samples)",
                ("sans-serif", 20).into_font().color(&WHITE),
            )
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..x_max, 0f64..max_metric)?;
        chart
            .configure_mesh()
            .x_desc("Sample")
            .y_desc(format!("{metric} (W)"))
            .axis_style(&WHITE)
            .label_style(("sans-serif", 14).into_font().color(&WHITE))
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        let color = style.line;
        let series = smoothed.iter().enumerate().map(|(i, v)| (i as f64, *v));
        chart
            .draw_series(LineSeries::new(series, &color))?
            .label(metric)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        chart
            .configure_series_labels()
            .label_font(("sans-serif", 14).into_font().color(&WHITE))
            .border_style(&WHITE.mix(0.2))
            .background_style(&style.background)
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, MonitorError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| MonitorError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
pub fn write_summary(path: &Path, png: &[u8]) -> Result<(), MonitorError> {
    fs::write(path, png).map_err(|source| MonitorError::Export {
        path: path.to_path_buf(),
        source,
    })
}
/// Writes the full-session chart to a fixed path.
#[derive(Clone, Debug)]
pub struct PngSummaryExporter {
    pub path: PathBuf,
    pub metric: String,
    pub max_metric: f64,
    pub style: PlotStyle,
}
impl PngSummaryExporter {
    pub fn new(path: impl Into<PathBuf>, metric: impl Into<String>, max_metric: f64) -> Self {
        Self {
            path: path.into(),
            metric: metric.into(),
            max_metric,
            style: PlotStyle::default(),
        }
    }
}
impl SummaryExporter for PngSummaryExporter {
    fn export(&mut self, smoothed: &[f64]) -> Result<PathBuf, MonitorError> {
        let png = render_summary_png(smoothed, &self.metric, self.max_metric, &self.style)?;
        write_summary(&self.path, &png)?;
        info!("Saved full-session summary graph to {}", self.path.display());
        Ok(self.path.clone())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn write_summary_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        write_summary(&path, b"\x89PNG").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG");
    }
    #[test]
    fn unwritable_path_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.png");
        match write_summary(&path, b"png") {
            Err(MonitorError::Export { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected export error, got {other:?}"),
        }
    }
    #[test]
    fn exporter_writes_decodable_png_of_documented_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pkgwatt.png");
        let mut exporter = PngSummaryExporter::new(&path, "PkgWatt", 200.0);
        let written = exporter.export(&[12.0, 35.5, 48.25, 250.0, 0.0]).unwrap();
        assert_eq!(written, path);
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 1200);
        assert_eq!(decoded.height(), 600);
    }
    #[test]
    fn exporter_surfaces_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("pkgwatt.png");
        let mut exporter = PngSummaryExporter::new(&path, "PkgWatt", 200.0);
        assert!(matches!(
            exporter.export(&[1.0, 2.0]),
            Err(MonitorError::Export { .. })
        ));
        assert!(!path.exists());
    }
    #[test]
    fn rejects_degenerate_value_axis() {
        let result = render_summary_png(&[1.0, 2.0], "PkgWatt", 0.0, &PlotStyle::default());
        assert!(matches!(result, Err(MonitorError::Plot(_))));
    }
    #[test]
    fn encode_png_checks_buffer_size() {
        assert!(encode_png(&[0u8; 12], 2, 2).is_ok());
        assert!(matches!(encode_png(&[0u8; 5], 2, 2), Err(MonitorError::Plot(_))));
    }
}
