use eframe::egui::{self, Color32, RichText, Ui};

use crate::render;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_save = state.figure.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save image…"))
                .clicked()
            {
                save_image_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(figure) = &state.figure {
            ui.strong(&figure.title);
            ui.label(format!(
                "{} points from {}",
                state.point_count(),
                state.source.display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {} log", state.layout.schema().name))
        .add_filter("Log files", &["log", "txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.try_load(&path);
    }
}

pub fn save_image_dialog(state: &mut AppState) {
    let Some(figure) = &state.figure else {
        return;
    };

    let stem = state
        .source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("figure");
    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .set_file_name(format!("{stem}.png"))
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = render::render_to_file(figure, &path) {
            log::error!("Failed to save {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
