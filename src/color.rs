use palette::{Hsl, IntoColor, Srgb};

/// 8-bit sRGB colour handed to the rendering layer.
pub type Rgb = Srgb<u8>;

/// The qualitative "Set3" colour scheme used across the dashboard charts.
const SET3: [(u8, u8, u8); 12] = [
    (141, 211, 199),
    (255, 255, 179),
    (190, 186, 218),
    (251, 128, 114),
    (128, 177, 211),
    (253, 180, 98),
    (179, 222, 105),
    (252, 205, 229),
    (217, 217, 217),
    (188, 128, 189),
    (204, 235, 197),
    (255, 237, 111),
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` qualitative colours: the Set3 scheme first, then evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    let extra = n.saturating_sub(SET3.len());
    SET3.iter()
        .take(n)
        .map(|&(r, g, b)| Srgb::new(r, g, b))
        .chain((0..extra).map(|i| {
            let hue = (i as f32 / extra as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: categorical key → colour
// ---------------------------------------------------------------------------

/// Assigns colours to categorical keys (regions, years, categories) in the
/// order the keys are given.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Rgb)>,
    default_color: Rgb,
}

impl ColorMap {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys_seen: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if !keys_seen.contains(&key) {
                keys_seen.push(key);
            }
        }
        let palette = generate_palette(keys_seen.len());
        ColorMap {
            mapping: keys_seen.into_iter().zip(palette).collect(),
            default_color: Srgb::new(128, 128, 128),
        }
    }

    /// Look up the colour for a key, grey when unknown.
    pub fn color_for(&self, key: &str) -> Rgb {
        self.mapping
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (key → colour) in assignment order.
    pub fn legend_entries(&self) -> &[(String, Rgb)] {
        &self.mapping
    }
}
