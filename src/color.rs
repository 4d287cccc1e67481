use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Colour of one plotted series, shared by the egui and plotters backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesColor {
    Red,
    Green,
    #[default]
    Blue,
    Rgb(u8, u8, u8),
}

impl SeriesColor {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            SeriesColor::Red => (214, 39, 40),
            SeriesColor::Green => (44, 160, 44),
            SeriesColor::Blue => (31, 119, 180),
            SeriesColor::Rgb(r, g, b) => (r, g, b),
        }
    }

    pub fn color32(self) -> Color32 {
        let (r, g, b) = self.rgb();
        Color32::from_rgb(r, g, b)
    }

    pub fn plotters(self) -> plotters::style::RGBColor {
        let (r, g, b) = self.rgb();
        plotters::style::RGBColor(r, g, b)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            SeriesColor::Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
