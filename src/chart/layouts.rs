use clap::ValueEnum;

use super::figure::{Domain, Figure, PanelSpec, PlotError, SeriesSpec};
use crate::color::SeriesColor;
use crate::data::model::Dataset;
use crate::data::schema::{self, LogSchema};

const BASELINE: &str = "LS";
const VARIANT: &str = "Linear-time LS";
const INPUT_SET: &str = "input set";
const FEATURES_SELECTED: &str = "Number of features selected";

// ---------------------------------------------------------------------------
// Layout – the fixed figures this tool knows how to draw
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Solution size, objective value and time of both variants.
    Compare,
    /// Solution size and time of both variants.
    TimeDiff,
    /// Feature-selection quality and training time per feature count.
    Features,
}

impl Layout {
    pub fn schema(self) -> &'static LogSchema {
        match self {
            Layout::Compare => &schema::COMPARE,
            Layout::TimeDiff => &schema::TIME_DIFF,
            Layout::Features => &schema::FEATURES,
        }
    }

    /// File name looked up in the working directory when no input is given.
    pub fn default_input(self) -> &'static str {
        match self {
            Layout::Compare => "compare.log",
            Layout::TimeDiff => "time_diff.log",
            Layout::Features => "10_to_100.log",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Layout::Compare => "LS vs. Linear-time LS",
            Layout::TimeDiff => "LS vs. Linear-time LS: running time",
            Layout::Features => "Greedy feature selection",
        }
    }

    /// Default pixel size of the figure.
    pub fn size(self) -> (u32, u32) {
        match self {
            Layout::Compare => (1800, 600),
            Layout::TimeDiff => (1200, 600),
            Layout::Features => (1500, 600),
        }
    }

    /// Whether the x-axis is a fixed input-size range rather than a column.
    pub fn uses_span(self) -> bool {
        !matches!(self, Layout::Features)
    }

    /// Default domain; `span` overrides the input-size range where it applies.
    pub fn domain(self, span: Option<(i64, i64)>) -> Domain {
        let (start, end) = span.unwrap_or((10, 200));
        match self {
            Layout::Compare | Layout::TimeDiff => Domain::Span { start, end },
            Layout::Features => Domain::Column("target_features"),
        }
    }

    /// Build the figure for a dataset loaded with [`Layout::schema`].
    pub fn build(self, dataset: &Dataset, domain: &Domain) -> Result<Figure, PlotError> {
        let x = domain.resolve(dataset)?;
        let panels = match self {
            Layout::Compare => vec![
                optimal_set(dataset, domain)?,
                pair(dataset, "optimal value", "g(S)", "ls_value", "lls_value")?,
                pair(dataset, "time taken", "time taken (in sec)", "ls_time", "lls_time")?,
            ],
            Layout::TimeDiff => vec![
                optimal_set(dataset, domain)?,
                pair(dataset, "time taken", "time taken (in sec)", "ls_time", "lls_time")?,
            ],
            Layout::Features => features_panels(dataset)?,
        };
        Figure::new(self.title(), self.size(), x, panels)
    }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

fn pair(
    dataset: &Dataset,
    title: &str,
    y_label: &str,
    baseline: &str,
    variant: &str,
) -> Result<PanelSpec, PlotError> {
    Ok(PanelSpec::new(title, INPUT_SET, y_label)
        .series(SeriesSpec::new(BASELINE, SeriesColor::Red, dataset.series(baseline)?))
        .series(SeriesSpec::new(VARIANT, SeriesColor::Green, dataset.series(variant)?)))
}

/// Sizes are bounded by the input range, so both axes follow the span.
fn optimal_set(dataset: &Dataset, domain: &Domain) -> Result<PanelSpec, PlotError> {
    let panel = pair(dataset, "optimal set", "output set", "ls_size", "lls_size")?;
    Ok(match *domain {
        Domain::Span { start, end } => {
            let (lo, hi) = (start as f64, end as f64);
            panel.x_bounds(lo, hi).y_bounds(lo, hi)
        }
        Domain::Column(_) => panel,
    })
}

fn features_panels(dataset: &Dataset) -> Result<Vec<PanelSpec>, PlotError> {
    Ok(vec![
        PanelSpec::new("R²-statistic", FEATURES_SELECTED, "R²")
            .y_bounds(0.8, 1.0)
            .series(SeriesSpec::new(
                "objective function",
                SeriesColor::Red,
                dataset.series("objective")?,
            ))
            .series(SeriesSpec::new(
                "R-squared on test data",
                SeriesColor::Green,
                dataset.series("test_r2")?,
            )),
        PanelSpec::new("Sum-squared error", FEATURES_SELECTED, "Sum-squared error")
            .y_bounds(0.01, 0.015)
            .series(SeriesSpec::new(
                "error on test data",
                SeriesColor::Red,
                dataset.series("sse")?,
            )),
        PanelSpec::new("Training time", FEATURES_SELECTED, "Training time (in sec)").series(
            SeriesSpec::new("training time", SeriesColor::Blue, dataset.series("train_time")?),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reader::parse_records;

    fn compare_log(rows: usize) -> String {
        (0..rows)
            .map(|i| format!("{} {} 1.{i} 1.{i} 0.0{i} 0.00{i}\n", i + 5, i + 4))
            .collect()
    }

    #[test]
    fn compare_figure_has_three_panels() {
        let ds = schema::COMPARE.validate(&parse_records(&compare_log(190))).unwrap();
        let fig = Layout::Compare
            .build(&ds, &Layout::Compare.domain(None))
            .unwrap();
        assert_eq!(fig.x.len(), 190);
        assert_eq!(fig.x[0], 10.0);
        assert_eq!(fig.panels.len(), 3);
        let titles: Vec<_> = fig.panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["optimal set", "optimal value", "time taken"]);
        assert_eq!(fig.panels[0].x_bounds, Some((10.0, 200.0)));
        assert_eq!(fig.panels[0].y_bounds, Some((10.0, 200.0)));
        assert_eq!(fig.panels[1].series[1].label, VARIANT);
        assert_eq!(fig.panels[2].series[0].color, Some(SeriesColor::Red));
    }

    #[test]
    fn custom_span_fits_short_logs() {
        let ds = schema::TIME_DIFF
            .validate(&parse_records("10 9 0.1 0.05\n11 10 0.2 0.06\n12 10 0.3 0.07\n"))
            .unwrap();
        let fig = Layout::TimeDiff
            .build(&ds, &Layout::TimeDiff.domain(Some((20, 23))))
            .unwrap();
        assert_eq!(fig.x, vec![20.0, 21.0, 22.0]);
        assert_eq!(fig.panels.len(), 2);
        assert_eq!(fig.panels[0].x_bounds, Some((20.0, 23.0)));
        assert_eq!(fig.panels[0].y_bounds, Some((20.0, 23.0)));
        assert_eq!(fig.panels[1].series[1].values, vec![0.05, 0.06, 0.07]);
    }

    #[test]
    fn features_x_comes_from_first_column() {
        let ds = schema::FEATURES
            .validate(&parse_records(
                "10 - - - - 0.12s 0.91 0.013 0.93\n20 - - - - 0.34s 0.93 0.012 0.95\n",
            ))
            .unwrap();
        let fig = Layout::Features
            .build(&ds, &Layout::Features.domain(Some((0, 1))))
            .unwrap();
        assert_eq!(fig.x, vec![10.0, 20.0]);
        assert_eq!(fig.panels[0].series[1].values, vec![0.93, 0.95]);
        assert_eq!(fig.panels[2].series[0].color, Some(SeriesColor::Blue));
    }

    #[test]
    fn empty_log_fails_before_rendering() {
        let ds = schema::COMPARE.validate(&parse_records("")).unwrap();
        let err = Layout::Compare
            .build(&ds, &Layout::Compare.domain(None))
            .unwrap_err();
        assert_eq!(err, PlotError::EmptyDomain);
    }
}
