//! RGBA color type, CSS color parsing, and predefined color constants.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use pageframe::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let parsed = Color::parse_css("#ff0000").unwrap();
/// assert_eq!(parsed, red);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components in the 0.0-1.0 range.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels plus a 0.0-1.0 alpha.
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a,
        }
    }

    /// Returns the same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Formats the color as a CSS `rgba(r, g, b, a)` string with 0-255 channels.
    pub fn to_css_rgba(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            self.a
        )
    }

    /// Parses a CSS color string.
    ///
    /// Understands `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(...)`, `rgba(...)`,
    /// `hsl(...)`, `hsla(...)` and the named colors known to
    /// [`crate::util::name_to_color`]. Returns `None` for anything else,
    /// including the empty string.
    pub fn parse_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = value.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
            return parse_rgb_args(&args);
        }
        if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
            return parse_hsl_args(&args);
        }

        crate::util::name_to_color(&lower)
    }

    /// Builds a color from HSL components (hue in degrees, saturation and
    /// lightness in the 0.0-1.0 range).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64, a: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self { r: l, g: l, b: l, a };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
            a,
        }
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn function_args(value: &str, name: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix(name)?.trim_start();
    let inner = inner.strip_prefix('(')?.strip_suffix(')')?;
    Some(
        inner
            .split(|c| c == ',' || c == '/' || char::is_whitespace(c))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let expand = |i: usize| byte(&hex[i..=i].repeat(2));
            Some(Color::from_rgb8(expand(0)?, expand(1)?, expand(2)?, 1.0))
        }
        6 => Some(Color::from_rgb8(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            1.0,
        )),
        8 => Some(Color::from_rgb8(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])? as f64 / 255.0,
        )),
        _ => None,
    }
}

fn parse_alpha(part: Option<&String>) -> Option<f64> {
    match part {
        None => Some(1.0),
        Some(raw) => {
            let alpha = if let Some(pct) = raw.strip_suffix('%') {
                pct.parse::<f64>().ok()? / 100.0
            } else {
                raw.parse::<f64>().ok()?
            };
            Some(alpha.clamp(0.0, 1.0))
        }
    }
}

fn parse_rgb_args(args: &[String]) -> Option<Color> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let channel = |raw: &str| -> Option<f64> {
        let value = if let Some(pct) = raw.strip_suffix('%') {
            pct.parse::<f64>().ok()? / 100.0
        } else {
            raw.parse::<f64>().ok()? / 255.0
        };
        Some(value.clamp(0.0, 1.0))
    };
    Some(Color {
        r: channel(&args[0])?,
        g: channel(&args[1])?,
        b: channel(&args[2])?,
        a: parse_alpha(args.get(3))?,
    })
}

fn parse_hsl_args(args: &[String]) -> Option<Color> {
    if !(3..=4).contains(&args.len()) {
        return None;
    }
    let hue = args[0].trim_end_matches("deg").parse::<f64>().ok()?;
    let percent =
        |raw: &str| -> Option<f64> { Some(raw.strip_suffix('%')?.parse::<f64>().ok()? / 100.0) };
    Some(Color::from_hsl(
        hue,
        percent(&args[1])?,
        percent(&args[2])?,
        parse_alpha(args.get(3))?,
    ))
}

// ============================================================================
// Predefined Color Constants (CSS named colors)
// ============================================================================

/// CSS `red` (255, 0, 0)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// CSS `green` (0, 128, 0)
pub const GREEN: Color = Color {
    r: 0.0,
    g: 128.0 / 255.0,
    b: 0.0,
    a: 1.0,
};

/// CSS `blue` (0, 0, 255)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// CSS `yellow` (255, 255, 0)
pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// CSS `orange` (255, 165, 0)
pub const ORANGE: Color = Color {
    r: 1.0,
    g: 165.0 / 255.0,
    b: 0.0,
    a: 1.0,
};

/// CSS `pink` (255, 192, 203)
pub const PINK: Color = Color {
    r: 1.0,
    g: 192.0 / 255.0,
    b: 203.0 / 255.0,
    a: 1.0,
};

/// CSS `white`
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// CSS `black`
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Fully transparent
pub const TRANSPARENT: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Color, expected: Color) {
        let eps = 1e-3;
        assert!(
            (actual.r - expected.r).abs() < eps
                && (actual.g - expected.g).abs() < eps
                && (actual.b - expected.b).abs() < eps
                && (actual.a - expected.a).abs() < eps,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse_css("#ff0000"), Some(RED));
        assert_eq!(Color::parse_css("#FFFF00"), Some(YELLOW));
        assert_eq!(Color::parse_css("#00f"), Some(BLUE));
        assert_close(
            Color::parse_css("#00000080").unwrap(),
            Color::new(0.0, 0.0, 0.0, 128.0 / 255.0),
        );
        assert!(Color::parse_css("#12345").is_none());
        assert!(Color::parse_css("#zzzzzz").is_none());
    }

    #[test]
    fn parses_rgb_functions() {
        assert_close(
            Color::parse_css("rgba(255, 0, 0, 0.3)").unwrap(),
            RED.with_alpha(0.3),
        );
        assert_close(
            Color::parse_css("rgb(0 123 255)").unwrap(),
            Color::from_rgb8(0, 123, 255, 1.0),
        );
        assert!(Color::parse_css("rgba(1, 2)").is_none());
    }

    #[test]
    fn parses_hsl_functions() {
        assert_close(Color::parse_css("hsl(0, 100%, 50%)").unwrap(), RED);
        assert_close(Color::parse_css("hsl(240, 100%, 50%)").unwrap(), BLUE);
        assert_close(
            Color::parse_css("hsl(0, 0%, 50%)").unwrap(),
            Color::new(0.5, 0.5, 0.5, 1.0),
        );
    }

    #[test]
    fn parses_named_and_rejects_empty() {
        assert_eq!(Color::parse_css("red"), Some(RED));
        assert_eq!(Color::parse_css(" Yellow "), Some(YELLOW));
        assert!(Color::parse_css("").is_none());
        assert!(Color::parse_css("chartreuse-ish").is_none());
    }

    #[test]
    fn formats_css_rgba() {
        assert_eq!(
            Color::from_rgb8(0, 123, 255, 0.15).to_css_rgba(),
            "rgba(0, 123, 255, 0.15)"
        );
    }
}
