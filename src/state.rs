use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::chart::{Figure, Layout};
use crate::config::RunOptions;
use crate::data;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The viewer state, independent of rendering.
pub struct AppState {
    /// Which figure is drawn; fixed for the lifetime of the window.
    pub layout: Layout,

    /// x-range override for span layouts.
    pub span: Option<(i64, i64)>,

    /// Pixel size used when saving an image.
    pub size: (u32, u32),

    /// Log file the current figure was built from.
    pub source: PathBuf,

    /// Current figure (None only if every load so far failed).
    pub figure: Option<Figure>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(layout: Layout, options: &RunOptions) -> Self {
        Self {
            layout,
            span: options.span,
            size: options.size,
            source: options.input.clone(),
            figure: None,
            status_message: None,
        }
    }

    /// Load `path` with the current layout and replace the figure.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let figure = build_figure(self.layout, path, self.span, self.size)?;
        self.figure = Some(figure);
        self.source = path.to_path_buf();
        self.status_message = None;
        Ok(())
    }

    /// Like [`AppState::load`], but keeps the old figure and records the error.
    pub fn try_load(&mut self, path: &Path) {
        if let Err(e) = self.load(path) {
            log::error!("Failed to load {}: {e:#}", path.display());
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    pub fn point_count(&self) -> usize {
        self.figure.as_ref().map_or(0, |f| f.x.len())
    }
}

/// Read, validate and lay out one log file.
pub fn build_figure(
    layout: Layout,
    path: &Path,
    span: Option<(i64, i64)>,
    size: (u32, u32),
) -> Result<Figure> {
    let dataset = data::load_log(path, layout.schema())?;
    let mut figure = layout.build(&dataset, &layout.domain(span))?;
    figure.size = size;
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn options(input: PathBuf) -> RunOptions {
        RunOptions {
            input,
            span: Some((1, 3)),
            size: (800, 300),
        }
    }

    #[test]
    fn failed_reload_keeps_previous_figure() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "10 9 0.5 0.25\n11 9 0.75 0.125").unwrap();
        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "10 9 fast 0.25\n11 9 0.75 0.125").unwrap();

        let mut state = AppState::new(Layout::TimeDiff, &options(good.path().into()));
        state.load(good.path()).unwrap();
        assert_eq!(state.point_count(), 2);
        assert_eq!(state.figure.as_ref().unwrap().size, (800, 300));

        state.try_load(bad.path());
        assert_eq!(state.point_count(), 2);
        assert_eq!(state.source, good.path());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("ls_time"), "{msg}");
    }

    #[test]
    fn empty_log_is_a_clear_error() {
        let empty = tempfile::NamedTempFile::new().unwrap();
        let err = build_figure(Layout::Compare, empty.path(), None, (10, 10)).unwrap_err();
        assert!(err.to_string().contains("nothing to plot"), "{err:#}");
    }
}
