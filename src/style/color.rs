use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Theme color accepting the notations found in CSS.
///
/// Accepted forms: `"#rgb"`, `"#rrggbb"`, `"#rrggbbaa"`, `"rgb(15 23 42)"`,
/// `"rgba(37, 99, 235, 0.8)"`, `"white"`/`"black"`/`"transparent"`, objects
/// `{"r": 0..255, "g": .., "b": .., "a": 0..1}` and arrays `[r, g, b]` / `[r, g, b, a]`.
/// Serializes back to `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorDef(pub Rgba8);

impl ColorDef {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba8::rgb(r, g, b))
    }

    /// Color with a CSS-style fractional alpha.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self(Rgba8::rgb(r, g, b).with_alpha_f(a))
    }

    /// Parse one of the string notations.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let body = body
                .strip_suffix(')')
                .ok_or_else(|| format!("unterminated color function \"{s}\""))?;
            return parse_rgb_fn(body);
        }
        match lower.as_str() {
            "white" => Ok(Self::rgb(255, 255, 255)),
            "black" => Ok(Self::rgb(0, 0, 0)),
            "transparent" => Ok(Self(Rgba8::transparent())),
            _ => Err(format!("unsupported color \"{s}\"")),
        }
    }

    /// Inner straight-alpha color.
    pub fn rgba8(self) -> Rgba8 {
        self.0
    }
}

impl From<Rgba8> for ColorDef {
    fn from(c: Rgba8) -> Self {
        Self(c)
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let Rgba8 { r, g, b, a } = self.0;
        serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(from_channels(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(from_channels(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(from_channels(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

fn from_channels(r: f64, g: f64, b: f64, a: f64) -> ColorDef {
    ColorDef::rgba(channel(r), channel(g), channel(b), a)
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    let (r, g, b, a) = match s.len() {
        3 => {
            let nib = |i: usize| hex_byte(&s[i..i + 1].repeat(2));
            (nib(0)?, nib(1)?, nib(2)?, 255)
        }
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned());
        }
    };

    Ok(ColorDef(Rgba8::rgba(r, g, b, a)))
}

// Both `rgb(1, 2, 3)` and `rgb(1 2 3 / 0.5)` appear in stylesheets.
fn parse_rgb_fn(body: &str) -> Result<ColorDef, String> {
    let parts: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let num = |p: &str| -> Result<f64, String> {
        if let Some(pct) = p.strip_suffix('%') {
            return pct
                .parse::<f64>()
                .map(|v| v / 100.0)
                .map_err(|_| format!("invalid percentage \"{p}\""));
        }
        p.parse::<f64>()
            .map_err(|_| format!("invalid color component \"{p}\""))
    };

    match parts.as_slice() {
        [r, g, b] => Ok(from_channels(num(r)?, num(g)?, num(b)?, 1.0)),
        [r, g, b, a] => Ok(from_channels(num(r)?, num(g)?, num(b)?, num(a)?)),
        _ => Err(format!("rgb() needs 3 or 4 components, got {}", parts.len())),
    }
}
