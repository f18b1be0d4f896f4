pub use kurbo::{Affine, Point, Rect, Vec2};

/// Size of the drawable area in device pixels.
///
/// Zero-sized viewports happen transiently while a window is being resized and are tolerated
/// everywhere; they simply produce no visible output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Undo premultiplication; fully transparent colours map to transparent black.
    pub fn to_straight(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = u16::from(self.a);
        let unpremul = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }
}

/// Value-typed affine transform used for grid-space to surface mapping.
///
/// Operations post-concatenate, so `t.translate(dx, dy)` maps a point `p` to
/// `t(p + (dx, dy))`. Every operation returns a new value; nothing is shared or mutated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D(Affine);

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for Transform2D {
    fn from(value: Affine) -> Self {
        Self(value)
    }
}

impl Transform2D {
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self(self.0 * Affine::translate(Vec2::new(dx, dy)))
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Self(self.0 * Affine::scale_non_uniform(sx, sy))
    }

    /// `self` applied after `inner`.
    pub fn then(self, inner: Transform2D) -> Self {
        Self(self.0 * inner.0)
    }

    pub fn apply(self, p: Point) -> Point {
        self.0 * p
    }

    pub fn to_affine(self) -> Affine {
        self.0
    }

    pub fn translation(self) -> Vec2 {
        self.0.translation()
    }

    /// Horizontal and vertical scale factors, ignoring shear.
    pub fn scale_factors(self) -> (f64, f64) {
        let [a, b, c, d, _, _] = self.0.as_coeffs();
        (a.hypot(b), c.hypot(d))
    }

    /// True when the transform keeps rectangles axis-aligned.
    pub fn is_axis_aligned(self) -> bool {
        let [_, b, c, _, _, _] = self.0.as_coeffs();
        b == 0.0 && c == 0.0
    }

    pub fn approx_eq(self, other: Transform2D, eps: f64) -> bool {
        self.0
            .as_coeffs()
            .iter()
            .zip(other.0.as_coeffs().iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
