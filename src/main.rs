mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod render;
mod state;
mod ui;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use eframe::egui;

use app::BenchPlotApp;
use chart::Layout;
use config::{Overrides, RunOptions, Settings};
use export::ExportFormat;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "benchplot", version, about = "Comparative charts for LS / Linear-time LS benchmark logs")]
struct Cli {
    #[arg(long, global = true, help = "Settings file (default: ./benchplot.toml if present)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Solution size, objective value and time (compare.log)")]
    Compare(PlotArgs),
    #[command(about = "Solution size and time (time_diff.log)")]
    TimeDiff(PlotArgs),
    #[command(about = "Feature-selection quality and training time (10_to_100.log)")]
    Features(PlotArgs),
    #[command(about = "Validate a log and write it with named columns")]
    Export {
        #[arg(value_enum, help = "Log layout")]
        layout: Layout,
        #[arg(short, long, help = "Log file; defaults to the layout's usual file name")]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        #[arg(short, long, help = "Output file; stdout if omitted")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[arg(short, long, help = "Log file; defaults to the layout's usual file name")]
    input: Option<PathBuf>,
    #[arg(short, long, help = "Write a .png or .svg instead of opening a window")]
    output: Option<PathBuf>,
    #[arg(long, help = "First input size on the x-axis (compare, time-diff)")]
    x_start: Option<i64>,
    #[arg(long, help = "End of the x-axis range, exclusive (compare, time-diff)")]
    x_end: Option<i64>,
}

impl PlotArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            x_start: self.x_start,
            x_end: self.x_end,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Compare(args) => plot(Layout::Compare, &args, &settings),
        Command::TimeDiff(args) => plot(Layout::TimeDiff, &args, &settings),
        Command::Features(args) => plot(Layout::Features, &args, &settings),
        Command::Export {
            layout,
            input,
            format,
            output,
        } => {
            let cli = Overrides {
                input,
                ..Overrides::default()
            };
            let opts = RunOptions::resolve(layout, &cli, &settings);
            export_log(layout, &opts, format, output)
        }
    }
}

fn plot(layout: Layout, args: &PlotArgs, settings: &Settings) -> Result<()> {
    let opts = RunOptions::resolve(layout, &args.overrides(), settings);
    match &args.output {
        Some(path) => {
            let figure = state::build_figure(layout, &opts.input, opts.span, opts.size)?;
            render::render_to_file(&figure, path)
                .with_context(|| format!("rendering {}", path.display()))
        }
        None => show_window(layout, &opts),
    }
}

fn show_window(layout: Layout, opts: &RunOptions) -> Result<()> {
    let mut state = AppState::new(layout, opts);
    state.load(&opts.input)?;

    let (w, h) = opts.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w as f32, h as f32 + 40.0])
            .with_min_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        layout.title(),
        options,
        Box::new(|_cc| Ok(Box::new(BenchPlotApp::new(state)))),
    )
    .map_err(|e| anyhow!("cannot open viewer window: {e}"))
}

fn export_log(
    layout: Layout,
    opts: &RunOptions,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let dataset = data::load_log(&opts.input, layout.schema())?;
    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            export::write_dataset(&dataset, format, BufWriter::new(file))?;
            log::info!("Exported {} rows to {}", dataset.len(), path.display());
        }
        None => export::write_dataset(&dataset, format, io::stdout().lock())?,
    }
    Ok(())
}
