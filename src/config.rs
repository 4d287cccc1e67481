use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chart::Layout;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "benchplot.toml";

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// Optional `benchplot.toml`. Every key may be omitted.
///
/// ```toml
/// [inputs]
/// compare = "logs/compare.log"
///
/// [domain]
/// x_start = 10
/// x_end = 200
///
/// [render]
/// width = 1800
/// height = 600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub inputs: Inputs,
    pub domain: DomainSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Inputs {
    pub compare: Option<PathBuf>,
    pub time_diff: Option<PathBuf>,
    pub features: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainSettings {
    pub x_start: Option<i64>,
    pub x_end: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing settings")
    }

    /// Load `explicit` if given (it must exist), else `benchplot.toml` if
    /// present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings =
            Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
        log::info!("Using settings from {}", path.display());
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Merged per-run options
// ---------------------------------------------------------------------------

/// CLI flags for one plot or export run, before merging.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub x_start: Option<i64>,
    pub x_end: Option<i64>,
}

/// Fully resolved options: CLI > settings file > layout defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub span: Option<(i64, i64)>,
    pub size: (u32, u32),
}

impl RunOptions {
    pub fn resolve(layout: Layout, cli: &Overrides, settings: &Settings) -> Self {
        let configured = match layout {
            Layout::Compare => &settings.inputs.compare,
            Layout::TimeDiff => &settings.inputs.time_diff,
            Layout::Features => &settings.inputs.features,
        };
        let input = cli
            .input
            .clone()
            .or_else(|| configured.clone())
            .unwrap_or_else(|| PathBuf::from(layout.default_input()));

        let start = cli.x_start.or(settings.domain.x_start);
        let end = cli.x_end.or(settings.domain.x_end);
        let span = match (start, end) {
            (None, None) => None,
            (s, e) => Some((s.unwrap_or(10), e.unwrap_or(200))),
        };
        if span.is_some() && !layout.uses_span() {
            log::warn!("x range is ignored for the {layout:?} layout; x comes from the log");
        }

        let (w, h) = layout.size();
        let size = (
            settings.render.width.unwrap_or(w),
            settings.render.height.unwrap_or(h),
        );

        Self { input, span, size }
    }
}
