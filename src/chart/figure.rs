use thiserror::Error;

use crate::color::{generate_palette, SeriesColor};
use crate::data::model::Dataset;
use crate::data::schema::SchemaError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum PlotError {
    #[error("nothing to plot: the x-axis has no points")]
    EmptyDomain,

    #[error("figure has no panels")]
    NoPanels,

    #[error("panel '{panel}' has no series")]
    EmptyPanel { panel: String },

    #[error("panel '{panel}', series '{series}': {found} values for {expected} x points")]
    LengthMismatch {
        panel: String,
        series: String,
        expected: usize,
        found: usize,
    },

    #[error("x range {start}..{end} has {expected} points but the log has {found} rows")]
    DomainMismatch {
        start: i64,
        end: i64,
        expected: usize,
        found: usize,
    },

    #[error("panel '{panel}': invalid {axis} bounds {min}..{max}")]
    InvalidBounds {
        panel: String,
        axis: char,
        min: f64,
        max: f64,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

// ---------------------------------------------------------------------------
// x-axis domain
// ---------------------------------------------------------------------------

/// Where the x values of a figure come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// `start..end`; must have exactly one point per row.
    Span { start: i64, end: i64 },
    /// A numeric column of the dataset.
    Column(&'static str),
}

impl Domain {
    pub fn resolve(&self, dataset: &Dataset) -> Result<Vec<f64>, PlotError> {
        if dataset.is_empty() {
            return Err(PlotError::EmptyDomain);
        }
        match *self {
            Domain::Span { start, end } => {
                let expected = end
                    .checked_sub(start)
                    .and_then(|d| usize::try_from(d).ok())
                    .unwrap_or(0);
                if expected != dataset.len() {
                    return Err(PlotError::DomainMismatch {
                        start,
                        end,
                        expected,
                        found: dataset.len(),
                    });
                }
                Ok((start..end).map(|x| x as f64).collect())
            }
            Domain::Column(name) => Ok(dataset.series(name)?),
        }
    }
}

// ---------------------------------------------------------------------------
// Panel / series descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub label: String,
    /// `None` picks a colour from the generated palette.
    pub color: Option<SeriesColor>,
    pub values: Vec<f64>,
}

impl SeriesSpec {
    pub fn new(label: impl Into<String>, color: SeriesColor, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            color: Some(color),
            values,
        }
    }
}

/// One subplot of a comparative figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_bounds: Option<(f64, f64)>,
    pub y_bounds: Option<(f64, f64)>,
    pub series: Vec<SeriesSpec>,
}

impl PanelSpec {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_bounds: None,
            y_bounds: None,
            series: Vec::new(),
        }
    }

    pub fn x_bounds(mut self, min: f64, max: f64) -> Self {
        self.x_bounds = Some((min, max));
        self
    }

    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.y_bounds = Some((min, max));
        self
    }

    pub fn series(mut self, series: SeriesSpec) -> Self {
        self.series.push(series);
        self
    }
}

// ---------------------------------------------------------------------------
// Figure – validated, ready to render
// ---------------------------------------------------------------------------

/// A validated set of side-by-side panels sharing one x-axis.
///
/// Constructed only through [`Figure::new`], so renderers can index series
/// by x position without further checks and every series has a colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    /// Pixel size (width, height).
    pub size: (u32, u32),
    pub x: Vec<f64>,
    pub panels: Vec<PanelSpec>,
}

impl Figure {
    pub fn new(
        title: impl Into<String>,
        size: (u32, u32),
        x: Vec<f64>,
        mut panels: Vec<PanelSpec>,
    ) -> Result<Self, PlotError> {
        if x.is_empty() {
            return Err(PlotError::EmptyDomain);
        }
        if panels.is_empty() {
            return Err(PlotError::NoPanels);
        }

        for panel in &panels {
            if panel.series.is_empty() {
                return Err(PlotError::EmptyPanel {
                    panel: panel.title.clone(),
                });
            }
            for s in &panel.series {
                if s.values.len() != x.len() {
                    return Err(PlotError::LengthMismatch {
                        panel: panel.title.clone(),
                        series: s.label.clone(),
                        expected: x.len(),
                        found: s.values.len(),
                    });
                }
            }
            for (axis, bounds) in [('x', panel.x_bounds), ('y', panel.y_bounds)] {
                if let Some((min, max)) = bounds {
                    if !(min.is_finite() && max.is_finite() && min < max) {
                        return Err(PlotError::InvalidBounds {
                            panel: panel.title.clone(),
                            axis,
                            min,
                            max,
                        });
                    }
                }
            }
        }

        let missing = panels
            .iter()
            .flat_map(|p| &p.series)
            .filter(|s| s.color.is_none())
            .count();
        let mut palette = generate_palette(missing).into_iter();
        for s in panels.iter_mut().flat_map(|p| p.series.iter_mut()) {
            if s.color.is_none() {
                s.color = palette.next();
            }
        }

        Ok(Self {
            title: title.into(),
            size,
            x,
            panels,
        })
    }
}

/// Data range of `values`, padded so a line never touches the frame.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span.abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min - span * 0.05, max + span * 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reader::parse_records;
    use crate::data::schema::{COMPARE, FEATURES};

    fn panel(values: Vec<f64>) -> PanelSpec {
        PanelSpec::new("time taken", "input set", "sec").series(SeriesSpec::new(
            "LS",
            SeriesColor::Red,
            values,
        ))
    }

    #[test]
    fn empty_x_is_rejected_first() {
        assert_eq!(
            Figure::new("t", (10, 10), vec![], vec![]),
            Err(PlotError::EmptyDomain)
        );
    }

    #[test]
    fn no_panels_and_empty_panels() {
        assert_eq!(
            Figure::new("t", (10, 10), vec![1.0], vec![]),
            Err(PlotError::NoPanels)
        );
        let err = Figure::new("t", (10, 10), vec![1.0], vec![PanelSpec::new("p", "x", "y")])
            .unwrap_err();
        assert_eq!(err, PlotError::EmptyPanel { panel: "p".into() });
    }

    #[test]
    fn series_length_must_match_x() {
        let err = Figure::new("t", (10, 10), vec![1.0, 2.0, 3.0], vec![panel(vec![1.0, 2.0])])
            .unwrap_err();
        assert_eq!(
            err,
            PlotError::LengthMismatch {
                panel: "time taken".into(),
                series: "LS".into(),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let p = panel(vec![1.0]).y_bounds(1.0, 0.8);
        let err = Figure::new("t", (10, 10), vec![1.0], vec![p]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidBounds { axis: 'y', .. }));
    }

    #[test]
    fn uncoloured_series_get_palette_colours() {
        let mut p = panel(vec![1.0]);
        p.series.push(SeriesSpec {
            label: "extra".into(),
            color: None,
            values: vec![2.0],
        });
        let fig = Figure::new("t", (10, 10), vec![1.0], vec![p]).unwrap();
        assert!(fig.panels[0].series.iter().all(|s| s.color.is_some()));
        assert_eq!(fig.panels[0].series[0].color, Some(SeriesColor::Red));
    }

    #[test]
    fn span_domain_must_match_row_count() {
        let ds = COMPARE
            .validate(&parse_records("5 6 1 1 0.1 0.1\n6 6 1 1 0.1 0.1\n"))
            .unwrap();
        let ok = Domain::Span { start: 10, end: 12 }.resolve(&ds).unwrap();
        assert_eq!(ok, vec![10.0, 11.0]);

        let err = Domain::Span { start: 10, end: 200 }.resolve(&ds).unwrap_err();
        assert_eq!(
            err,
            PlotError::DomainMismatch {
                start: 10,
                end: 200,
                expected: 190,
                found: 2,
            }
        );
    }

    #[test]
    fn extreme_span_is_a_mismatch_not_an_overflow() {
        let ds = COMPARE.validate(&parse_records("5 6 1 1 0.1 0.1\n")).unwrap();
        let err = Domain::Span {
            start: i64::MIN,
            end: i64::MAX,
        }
        .resolve(&ds)
        .unwrap_err();
        assert!(matches!(err, PlotError::DomainMismatch { found: 1, .. }));

        let backwards = Domain::Span { start: 20, end: 10 }.resolve(&ds).unwrap_err();
        assert!(matches!(backwards, PlotError::DomainMismatch { expected: 0, .. }));
    }

    #[test]
    fn column_domain_reads_x_from_data() {
        let ds = FEATURES
            .validate(&parse_records(
                "10 - - - - 0.1 0.9 0.01 0.92\n11 - - - - 0.2 0.91 0.011 0.93\n",
            ))
            .unwrap();
        let x = Domain::Column("target_features").resolve(&ds).unwrap();
        assert_eq!(x, vec![10.0, 11.0]);
    }

    #[test]
    fn empty_dataset_is_an_empty_domain() {
        let ds = COMPARE.validate(&[]).unwrap();
        assert_eq!(
            Domain::Span { start: 10, end: 200 }.resolve(&ds),
            Err(PlotError::EmptyDomain)
        );
        assert_eq!(
            Domain::Column("ls_size").resolve(&ds),
            Err(PlotError::EmptyDomain)
        );
    }

    #[test]
    fn padded_range_handles_flat_and_spread_data() {
        assert_eq!(padded_range([2.0, 2.0]), (1.5, 2.5));
        let (lo, hi) = padded_range([0.0, 10.0]);
        assert!((lo + 0.5).abs() < 1e-9 && (hi - 10.5).abs() < 1e-9);
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));
    }
}
