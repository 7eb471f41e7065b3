use crate::foundation::error::{SplashError, SplashResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight-alpha RGBA8 color.
///
/// Serialized as a CSS-style hex string (`#rgb`, `#rrggbb` or `#rrggbbaa`) so configs stay
/// readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS hex color. Surrounding whitespace is ignored.
    pub fn parse_hex(s: &str) -> SplashResult<Self> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| SplashError::validation(format!("color '{s}' must start with '#'")))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SplashError::validation(format!("color '{s}' is not hex")));
        }

        let nibble = |i: usize| -> SplashResult<u8> {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| SplashError::validation(format!("color '{s}' is not hex")))
        };
        let byte = |i: usize| -> SplashResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| SplashError::validation(format!("color '{s}' is not hex")))
        };

        match hex.len() {
            3 => Ok(Self::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(SplashError::validation(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }

    /// Premultiplied RGBA8 bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { ((u16::from(c) * a + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    /// Lowercase `#rrggbb` (or `#rrggbbaa` when not opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = SplashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

/// Point at `radius` from `center` along `angle_deg` (degrees, screen orientation).
pub fn polar(center: Point, angle_deg: f64, radius: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(center.x + rad.cos() * radius, center.y + rad.sin() * radius)
}

/// Center of a viewport of the given size.
pub fn center_of(size: Size) -> Point {
    Point::new(size.width / 2.0, size.height / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
