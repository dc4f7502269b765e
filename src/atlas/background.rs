use std::fmt;
use std::str::FromStr;

use image::Rgba;

use crate::error::TilesheetError;

/// Fill colour for the canvas before tiles are placed.
///
/// Shows through in padding and in empty cells of the last row. Tile pixels
/// are copied as-is, so it never blends into a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background(pub [u8; 4]);

impl Background {
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);

    pub fn rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl FromStr for Background {
    type Err = TilesheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TilesheetError::InvalidBackground(s.to_string());

        match s.to_ascii_lowercase().as_str() {
            "transparent" => return Ok(Self::TRANSPARENT),
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut rgba = [0, 0, 0, 255];
        for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_e| invalid())?;
        }

        Ok(Self(rgba))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TRANSPARENT => write!(f, "transparent"),
            Self::WHITE => write!(f, "white"),
            Self::BLACK => write!(f, "black"),
            Self([r, g, b, a]) => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}
