/// Badge color used whenever a tag has no usable color of its own.
pub const DEFAULT_TAG_COLOR: &str = "#6b7280";

const BADGE_BACKGROUND_ALPHA: f32 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// Composite this color over an opaque backdrop.
    pub fn over(self, backdrop: Rgb) -> Rgb {
        let alpha = self.alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8
        };
        Rgb {
            r: mix(self.rgb.r, backdrop.r),
            g: mix(self.rgb.g, backdrop.g),
            b: mix(self.rgb.b, backdrop.b),
        }
    }
}

/// Display colors for a tag badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeStyle {
    pub border: Rgb,
    pub background: Rgba,
    pub foreground: Rgb,
}

/// Normalizes user or backend input to lowercase `#rrggbb`.
///
/// Accepts six hex digits with or without a leading `#`, surrounded by any
/// amount of whitespace. Everything else yields `None`; callers substitute
/// [`DEFAULT_TAG_COLOR`] themselves.
pub fn normalize_hex_color(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", hex.to_ascii_lowercase()))
    } else {
        None
    }
}

/// Like [`normalize_hex_color`] but never fails.
pub fn normalize_or_default(value: Option<&str>) -> String {
    normalize_hex_color(value).unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string())
}

pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let normalized = normalize_hex_color(Some(hex))?;
    let digits = &normalized[1..];
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();

    Some(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

pub fn badge_style(color: Option<&str>) -> BadgeStyle {
    let normalized = normalize_or_default(color);
    let background = match hex_to_rgb(&normalized) {
        Some(rgb) => Rgba {
            rgb,
            alpha: BADGE_BACKGROUND_ALPHA,
        },
        None => Rgba {
            rgb: Rgb::WHITE,
            alpha: 0.1,
        },
    };
    let border = background.rgb;

    BadgeStyle {
        border,
        background,
        foreground: Rgb::WHITE,
    }
}
