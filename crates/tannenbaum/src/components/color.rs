use serde::Serialize;

/// Linear RGB color with components in [0, 1].
/// Hex inputs are sRGB-encoded and converted on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed sRGB `0xRRGGBB` value, converting to linear.
    pub fn from_u32(rgb: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xFF) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Parse sRGB `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_u32)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// sRGB transfer function, inverted.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Named scene colors, packed as `0xRRGGBB`.
pub mod palette {
    pub const GOLD: u32 = 0xFFD700;
    pub const EMERALD: u32 = 0x046307;
    pub const RED_VELVET: u32 = 0xC60C30;
    pub const ROYAL_BLUE: u32 = 0x002366;
    pub const SILVER: u32 = 0xE5E4E2;
    pub const WARM_LIGHT: u32 = 0xFFFACD;

    pub const ICE_WHITE: u32 = 0xFFFFFF;
    pub const ICE_BLUE: u32 = 0xDBEAFE;

    /// Sphere ornament palette. Gold appears twice so it dominates.
    pub const ORNAMENTS: [u32; 5] = [GOLD, RED_VELVET, ROYAL_BLUE, SILVER, GOLD];
    pub const ICICLES: [u32; 2] = [ICE_WHITE, ICE_BLUE];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u32_unpacks_channels() {
        let gold = Rgb::from_u32(palette::GOLD);
        assert!((gold.r - 1.0).abs() < 1e-6);
        assert!((gold.g - 0.679_542_5).abs() < 1e-5, "g was {}", gold.g);
        assert_eq!(gold.b, 0.0);
    }

    #[test]
    fn hex_values_are_linearized() {
        let emerald = Rgb::from_u32(palette::EMERALD);
        assert!((emerald.g - 0.124_771_84).abs() < 1e-5, "g was {}", emerald.g);
        assert!((emerald.r - 0.001_214_11).abs() < 1e-6, "r was {}", emerald.r);
        let white = Rgb::from_u32(0xFFFFFF);
        assert!((white.r - 1.0).abs() < 1e-6 && (white.b - 1.0).abs() < 1e-6);
        assert_eq!(Rgb::from_u32(0x000000), Rgb::BLACK);
    }

    #[test]
    fn from_hex_matches_packed() {
        assert_eq!(Rgb::from_hex("#dbeafe"), Some(Rgb::from_u32(palette::ICE_BLUE)));
        assert_eq!(Rgb::from_hex("046307"), Some(Rgb::from_u32(palette::EMERALD)));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(Rgb::from_hex("#fff").is_none());
        assert!(Rgb::from_hex("#gg0000").is_none());
    }
}
