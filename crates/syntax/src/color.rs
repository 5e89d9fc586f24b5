//! RGBA color literals.
//!
//! Colors appear in stylesheets as hex literals, `rgb()`/`rgba()` and
//! `hsl()`/`hsla()` functions, or one of the named colors. [`RgbaColor::parse`]
//! accepts the textual form; the lexical parser uses it for hash tokens and
//! the engine's color value managers use it for identifiers and functions.

use std::fmt;

/// Error returned when color parsing fails.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorParseError {
    /// Human-readable description of the parsing error.
    pub message: String,
}

impl ColorParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ColorParseError {}

/// An sRGB color with straight alpha.
///
/// # Examples
///
/// ```
/// use css_syntax::RgbaColor;
///
/// let red = RgbaColor::rgb(255, 0, 0);
/// assert_eq!(RgbaColor::parse("#f00").unwrap(), red);
/// assert_eq!(RgbaColor::parse("red").unwrap(), red);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbaColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0.0 = transparent, 1.0 = opaque).
    pub a: f32,
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl RgbaColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Returns a fully transparent color.
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0.0)
    }

    /// Returns true if the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Parse a color string in any of the supported formats.
    ///
    /// - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
    /// - RGB: `rgb(r,g,b)`, `rgba(r,g,b,a)`, components may be percentages
    /// - HSL: `hsl(h,s%,l%)`, `hsla(h,s%,l%,a)`
    /// - Named: `red`, `aliceblue`, ... and `transparent`
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorParseError::new("empty color string"));
        }

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let lower = input.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return Self::parse_rgb_func(&lower);
        }
        if lower.starts_with("hsl") {
            return Self::parse_hsl_func(&lower);
        }
        Self::named(&lower).ok_or_else(|| ColorParseError::new(format!("unknown color name: {}", input)))
    }

    /// Looks up a named color (case-sensitive, lowercase).
    pub fn named(name: &str) -> Option<Self> {
        if name == "transparent" {
            return Some(Self::transparent());
        }
        NAMED_COLORS
            .binary_search_by(|(candidate, _)| candidate.cmp(&name))
            .ok()
            .map(|idx| {
                let [r, g, b] = NAMED_COLORS[idx].1;
                Self::rgb(r, g, b)
            })
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or_else(|| ColorParseError::new(format!("invalid hex digit: {}", c)))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits.as_slice() {
            [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
            [r, g, b, a] => Ok(Self::rgba(r * 17, g * 17, b * 17, (a * 17) as f32 / 255.0)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::rgba(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                (a1 * 16 + a2) as f32 / 255.0,
            )),
            _ => Err(ColorParseError::new(format!(
                "invalid hex color length: {}",
                digits.len()
            ))),
        }
    }

    fn function_args(input: &str, name: &str) -> Result<Vec<String>, ColorParseError> {
        let start = input
            .find('(')
            .ok_or_else(|| ColorParseError::new(format!("missing '(' in {} function", name)))?;
        let end = input
            .rfind(')')
            .ok_or_else(|| ColorParseError::new(format!("missing ')' in {} function", name)))?;
        if end < start {
            return Err(ColorParseError::new(format!("malformed {} function", name)));
        }
        let parts: Vec<String> = input[start + 1..end]
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();
        if parts.len() < 3 {
            return Err(ColorParseError::new(format!(
                "{} requires at least 3 components",
                name
            )));
        }
        Ok(parts)
    }

    fn parse_rgb_func(input: &str) -> Result<Self, ColorParseError> {
        let parts = Self::function_args(input, "rgb")?;
        let r = Self::parse_channel(&parts[0])?;
        let g = Self::parse_channel(&parts[1])?;
        let b = Self::parse_channel(&parts[2])?;
        let a = match parts.get(3) {
            Some(a) => Self::parse_f32(a)?.clamp(0.0, 1.0),
            None => 1.0,
        };
        Ok(Self::rgba(r, g, b, a))
    }

    fn parse_hsl_func(input: &str) -> Result<Self, ColorParseError> {
        let parts = Self::function_args(input, "hsl")?;
        let h = Self::parse_f32(&parts[0])?;
        let s = Self::parse_percentage(&parts[1])?;
        let l = Self::parse_percentage(&parts[2])?;
        let a = match parts.get(3) {
            Some(a) => Self::parse_f32(a)?.clamp(0.0, 1.0),
            None => 1.0,
        };
        Ok(Self::from_hsl(h, s, l, a))
    }

    /// An `rgb()` channel: an integer in 0..=255 or a percentage.
    fn parse_channel(s: &str) -> Result<u8, ColorParseError> {
        if s.ends_with('%') {
            let pct = Self::parse_percentage(s)?.clamp(0.0, 1.0);
            return Ok((pct * 255.0).round() as u8);
        }
        let val: i32 = s
            .parse()
            .map_err(|_| ColorParseError::new(format!("invalid number: {}", s)))?;
        if !(0..=255).contains(&val) {
            return Err(ColorParseError::new(format!(
                "value out of range (0-255): {}",
                val
            )));
        }
        Ok(val as u8)
    }

    fn parse_f32(s: &str) -> Result<f32, ColorParseError> {
        s.parse()
            .map_err(|_| ColorParseError::new(format!("invalid float: {}", s)))
    }

    fn parse_percentage(s: &str) -> Result<f32, ColorParseError> {
        let s = s.trim_end_matches('%');
        let val: f32 = s
            .parse()
            .map_err(|_| ColorParseError::new(format!("invalid percentage: {}", s)))?;
        Ok(val / 100.0)
    }

    /// Creates an RgbaColor from HSL values (hue in degrees, s and l in 0..=1).
    pub fn from_hsl(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                Self::hue_to_rgb(p, q, h + 1.0 / 3.0),
                Self::hue_to_rgb(p, q, h),
                Self::hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Self::rgba(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a,
        )
    }

    fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }
}

// Sorted by name for binary search.
static NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(RgbaColor::parse("#f00").unwrap(), RgbaColor::rgb(255, 0, 0));
        assert_eq!(RgbaColor::parse("#00FF00").unwrap(), RgbaColor::rgb(0, 255, 0));
        let with_alpha = RgbaColor::parse("#0000ff80").unwrap();
        assert_eq!((with_alpha.r, with_alpha.g, with_alpha.b), (0, 0, 255));
        assert!((with_alpha.a - 128.0 / 255.0).abs() < 0.001);
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(
            RgbaColor::parse("rgb(10, 20, 30)").unwrap(),
            RgbaColor::rgb(10, 20, 30)
        );
        assert_eq!(
            RgbaColor::parse("rgb(100%, 0%, 0%)").unwrap(),
            RgbaColor::rgb(255, 0, 0)
        );
        assert_eq!(
            RgbaColor::parse("rgba(0,0,0,0.5)").unwrap(),
            RgbaColor::rgba(0, 0, 0, 0.5)
        );
    }

    #[test]
    fn test_hsl_primary() {
        assert_eq!(
            RgbaColor::parse("hsl(120, 100%, 50%)").unwrap(),
            RgbaColor::rgb(0, 255, 0)
        );
        assert_eq!(
            RgbaColor::parse("hsl(0, 0%, 50%)").unwrap(),
            RgbaColor::rgb(128, 128, 128)
        );
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(RgbaColor::parse("Navy").unwrap(), RgbaColor::rgb(0, 0, 128));
        assert_eq!(RgbaColor::named("grey"), Some(RgbaColor::rgb(128, 128, 128)));
        assert!(RgbaColor::parse("transparent").unwrap().is_transparent());
    }

    #[test]
    fn test_named_table_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_invalid_input() {
        assert!(RgbaColor::parse("").is_err());
        assert!(RgbaColor::parse("#12").is_err());
        assert!(RgbaColor::parse("#ggg").is_err());
        assert!(RgbaColor::parse("rgb(1, 2)").is_err());
        assert!(RgbaColor::parse("rgb(300, 0, 0)").is_err());
        assert!(RgbaColor::parse("notacolor").is_err());
    }
}
