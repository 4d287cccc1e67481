use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::chart::{Figure, PanelSpec};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Comparative figure (central panel)
// ---------------------------------------------------------------------------

/// Render the current figure, one plot per panel, side by side.
pub fn figure_plot(ui: &mut Ui, state: &AppState) {
    let figure = match &state.figure {
        Some(f) => f,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a log file to plot it  (File → Open…)");
            });
            return;
        }
    };

    ui.columns(figure.panels.len(), |columns: &mut [Ui]| {
        for (i, (ui, panel)) in columns.iter_mut().zip(&figure.panels).enumerate() {
            panel_plot(ui, i, figure, panel);
        }
    });
}

fn panel_plot(ui: &mut Ui, index: usize, figure: &Figure, panel: &PanelSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&panel.title);
    });

    let mut plot = Plot::new(("panel", index))
        .legend(Legend::default())
        .x_axis_label(panel.x_label.as_str())
        .y_axis_label(panel.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    let (xs, ys) = included_extents(panel);
    for x in xs {
        plot = plot.include_x(x);
    }
    for y in ys {
        plot = plot.include_y(y);
    }

    plot.show(ui, |plot_ui| {
        for series in &panel.series {
            let points: PlotPoints = figure
                .x
                .iter()
                .zip(series.values.iter())
                .map(|(&xi, &yi)| [xi, yi])
                .collect();

            let line = Line::new(points)
                .name(&series.label)
                .color(series.color.unwrap_or_default().color32())
                .width(1.5);

            plot_ui.line(line);
        }
    });
}

/// Values each axis must show on first draw; auto-bounds fit the data around them.
fn included_extents(panel: &PanelSpec) -> (Vec<f64>, Vec<f64>) {
    let extents = |bounds: Option<(f64, f64)>| {
        bounds.map_or_else(Vec::new, |(min, max)| vec![min, max])
    };
    (extents(panel.x_bounds), extents(panel.y_bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figure::SeriesSpec;
    use crate::color::SeriesColor;

    #[test]
    fn fixed_bounds_become_included_extents() {
        let panel = PanelSpec::new("R²-statistic", "features", "R²")
            .y_bounds(0.8, 1.0)
            .series(SeriesSpec::new("objective", SeriesColor::Red, vec![0.9]));
        let (xs, ys) = included_extents(&panel);
        assert!(xs.is_empty());
        assert_eq!(ys, vec![0.8, 1.0]);

        let both = panel.x_bounds(10.0, 200.0);
        assert_eq!(included_extents(&both).0, vec![10.0, 200.0]);
    }
}
