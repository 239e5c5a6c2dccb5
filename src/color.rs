//! Colors

use crate::math::multiply_u8;
use crate::Error;

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color as Red, Green, Blue and Alpha, not pre-multiplied
///
/// In configuration files and commands a color is written as a hex string,
///   `#rgb`, `#rrggbb` or `#rrggbbaa`
///
///     use tilecanvas::Rgba8;
///
///     let c: Rgba8 = "#ff8000".parse().unwrap();
///     assert_eq!(c, Rgba8::new(255, 128, 0, 255));
///
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Create new color
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// White Color (255,255,255,255)
    pub const fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub const fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Fully transparent (0,0,0,0)
    pub const fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Gray scale, opaque
    pub const fn gray(g: u8) -> Self {
        Self::new(g,g,g,255)
    }
    /// Return the color with its components multiplied by alpha
    pub fn premultiply(self) -> Self {
        if self.a == 255 {
            return self;
        }
        Self::new(multiply_u8(self.r, self.a),
                  multiply_u8(self.g, self.a),
                  multiply_u8(self.b, self.a),
                  self.a)
    }
    /// Undo [premultiply](#method.premultiply)
    ///
    /// Precision lost while multiplying is not recovered
    pub fn demultiply(self) -> Self {
        match self.a {
            255 => self,
            0 => Self::transparent(),
            a => {
                let f = |v: u8| -> u8 {
                    let v = (u32::from(v) * 255 + u32::from(a) / 2) / u32::from(a);
                    v.min(255) as u8
                };
                Self::new(f(self.r), f(self.g), f(self.b), a)
            }
        }
    }
    /// Hex representation, `#rrggbbaa`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0' ..= b'9' => Some(c - b'0'),
        b'a' ..= b'f' => Some(c - b'a' + 10),
        b'A' ..= b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl FromStr for Rgba8 {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        let bad = || Error::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        let digits = hex.bytes()
            .map(hex_nibble)
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(bad)?;
        let pair = |i: usize| digits[i] << 4 | digits[i+1];
        match digits.len() {
            3 => Ok(Self::new(digits[0] * 17, digits[1] * 17, digits[2] * 17, 255)),
            6 => Ok(Self::new(pair(0), pair(2), pair(4), 255)),
            8 => Ok(Self::new(pair(0), pair(2), pair(4), pair(6))),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> String {
        c.to_hex()
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
