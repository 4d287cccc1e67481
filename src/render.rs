use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::chart::figure::{padded_range, Figure, PanelSpec};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported image format '{0}' (use .png or .svg)")]
    UnsupportedFormat(String),

    #[error("drawing failed: {0}")]
    Backend(String),
}

fn backend<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Draw `figure` into an image file. The format follows the extension.
pub fn render_to_file(figure: &Figure, path: &Path) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(path)?;
    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, figure.size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present().map_err(backend)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, figure.size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present().map_err(backend)?;
        }
    }
    log::info!("Wrote {:?} figure to {}", format, path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(backend)?;
    let areas = root.split_evenly((1, figure.panels.len()));
    for (area, panel) in areas.iter().zip(&figure.panels) {
        draw_panel(area, &figure.x, panel)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: &[f64],
    panel: &PanelSpec,
) -> Result<(), RenderError> {
    let x_range = panel
        .x_bounds
        .unwrap_or_else(|| padded_range(x.iter().copied()));
    let y_range = panel.y_bounds.unwrap_or_else(|| {
        padded_range(panel.series.iter().flat_map(|s| s.values.iter().copied()))
    });

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 22).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(backend)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()
        .map_err(backend)?;

    for series in &panel.series {
        // Figure::new assigns a colour to every series.
        let color = series.color.unwrap_or_default().plotters();
        let points = x.iter().copied().zip(series.values.iter().copied());
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(backend)?
            .label(series.label.as_str())
            .legend(move |(lx, ly)| {
                PathElement::new(vec![(lx, ly), (lx + 20, ly)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(backend)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Layout;
    use crate::data::reader::parse_records;

    fn time_diff_figure() -> Figure {
        let ds = Layout::TimeDiff
            .schema()
            .validate(&parse_records("10 9 0.5 0.25\n11 9 0.75 0.125\n"))
            .unwrap();
        Layout::TimeDiff
            .build(&ds, &Layout::TimeDiff.domain(Some((10, 12))))
            .unwrap()
    }

    fn features_figure() -> Figure {
        let ds = Layout::Features
            .schema()
            .validate(&parse_records(
                "10 - - - - 0.12s 0.91 0.013 0.93\n20 - - - - 0.34s 0.93 0.012 0.95\n",
            ))
            .unwrap();
        let mut fig = Layout::Features
            .build(&ds, &Layout::Features.domain(None))
            .unwrap();
        fig.size = (600, 240);
        fig
    }

    #[test]
    fn svg_has_every_panel_and_legend_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("time_diff.svg");
        render_to_file(&time_diff_figure(), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        for text in ["optimal set", "time taken", "Linear-time LS", "LS", "input set"] {
            assert!(svg.contains(text), "missing '{text}'");
        }
    }

    #[test]
    fn png_with_fixed_bounds_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.png");
        let fig = features_figure();
        assert_eq!(fig.panels[0].y_bounds, Some((0.8, 1.0)));
        render_to_file(&fig, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn unsupported_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("time_diff.jpg");
        let err = render_to_file(&time_diff_figure(), &path).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ImageFormat::from_path(Path::new("out/compare.PNG")).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("compare.svg")).unwrap(),
            ImageFormat::Svg
        );
        let err = ImageFormat::from_path(Path::new("compare.jpg")).unwrap_err();
        assert!(err.to_string().contains("jpg"));
    }
}
