use std::fmt;

/// An RGBA colour with components in `[0, 1]`, used for shape styling.
///
/// Transform-invariant: applying a transform to a shape never touches its
/// colours.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Colour {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        }
    }

    pub fn black() -> Self {
        Self::default()
    }
    pub fn white() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
    pub fn red() -> Self {
        Self {
            r: 1.0,
            ..Default::default()
        }
    }
    pub fn green() -> Self {
        Self {
            g: 1.0,
            ..Default::default()
        }
    }
    pub fn blue() -> Self {
        Self {
            b: 1.0,
            ..Default::default()
        }
    }
    pub fn grey() -> Self {
        Self {
            r: 0.5,
            g: 0.5,
            b: 0.5,
            a: 1.0,
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    /// Converts to byte components, e.g. for a pixel-based drawing adapter.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl Default for Colour {
    fn default() -> Self {
        // Opaque black.
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.as_bytes();
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_byte_round_trip() {
        let c = Colour::from_bytes(255, 128, 0, 255);
        assert_eq!(c.as_bytes(), [255, 128, 0, 255]);
    }

    #[test]
    fn colour_display_as_hex() {
        assert_eq!(format!("{}", Colour::white()), "#ffffffff");
        assert_eq!(format!("{}", Colour::black()), "#000000ff");
    }

    #[test]
    fn colour_with_alpha() {
        let c = Colour::red().with_alpha(0.5);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.a, 0.5);
    }
}
