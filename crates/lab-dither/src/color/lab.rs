//! CIELAB perceptual color space (D65)
//!
//! CIELAB is the "uniform" space of the pipeline: adjustment, palette
//! matching and error diffusion all operate on `Lab` values with
//! `L` in 0..=100 and `a`/`b` practically within -127..=127.
//!
//! # References
//!
//! CIE 15:2004, Colorimetry. sRGB primaries per IEC 61966-2-1.

use std::ops::{Add, AddAssign, Mul, Sub};

use super::linear_rgb::LinearRgb;

// Linear sRGB -> CIE XYZ (D65)
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

// CIE XYZ (D65) -> linear sRGB
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240_454_2, -1.537_138_5, -0.498_531_4],
    [-0.969_266_0, 1.876_010_8, 0.041_556_0],
    [0.055_643_4, -0.204_025_9, 1.057_225_2],
];

// Reference white taken from the matrix row sums, so that sRGB white maps
// to exactly L=100, a=b=0.
const WHITE_X: f32 = 0.412_456_4 + 0.357_576_1 + 0.180_437_5;
const WHITE_Y: f32 = 0.212_672_9 + 0.715_152_2 + 0.072_175_0;
const WHITE_Z: f32 = 0.019_333_9 + 0.119_192_0 + 0.950_304_1;

const EPSILON: f32 = 216.0 / 24389.0;
const KAPPA: f32 = 24389.0 / 27.0;

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f32) -> f32 {
    let cubed = f * f * f;
    if cubed > EPSILON {
        cubed
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

/// A color in CIELAB space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
///
/// Values are not clamped. Error diffusion pushes pixels outside the
/// nominal ranges and that is preserved until the next clamp point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f32,
    /// Green-red axis
    pub a: f32,
    /// Blue-yellow axis
    pub b: f32,
}

impl Lab {
    /// Create a new Lab color.
    ///
    /// # Example
    ///
    /// ```
    /// use lab_dither::Lab;
    ///
    /// let red = Lab::new(50.0, 81.0, 59.0);
    /// assert_eq!(red.l, 50.0);
    /// ```
    #[inline]
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Plain squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Lab) -> f32 {
        let d = self - other;
        d.l * d.l + d.a * d.a + d.b * d.b
    }

    /// Squared distance with the two chroma terms scaled by `chroma_weight`.
    ///
    /// `dL² + w·da² + w·db²`
    #[inline]
    pub fn weighted_distance_squared(self, other: Lab, chroma_weight: f32) -> f32 {
        let d = self - other;
        d.l * d.l + chroma_weight * (d.a * d.a + d.b * d.b)
    }

    /// Chroma magnitude `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// True when all three channels are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }
}

impl Add for Lab {
    type Output = Lab;

    #[inline]
    fn add(self, rhs: Lab) -> Lab {
        Lab::new(self.l + rhs.l, self.a + rhs.a, self.b + rhs.b)
    }
}

impl AddAssign for Lab {
    #[inline]
    fn add_assign(&mut self, rhs: Lab) {
        self.l += rhs.l;
        self.a += rhs.a;
        self.b += rhs.b;
    }
}

impl Sub for Lab {
    type Output = Lab;

    #[inline]
    fn sub(self, rhs: Lab) -> Lab {
        Lab::new(self.l - rhs.l, self.a - rhs.a, self.b - rhs.b)
    }
}

impl Mul<f32> for Lab {
    type Output = Lab;

    #[inline]
    fn mul(self, rhs: f32) -> Lab {
        Lab::new(self.l * rhs, self.a * rhs, self.b * rhs)
    }
}

impl From<LinearRgb> for Lab {
    /// Linear sRGB -> XYZ -> CIELAB.
    fn from(rgb: LinearRgb) -> Self {
        let m = &RGB_TO_XYZ;
        let x = m[0][0] * rgb.r + m[0][1] * rgb.g + m[0][2] * rgb.b;
        let y = m[1][0] * rgb.r + m[1][1] * rgb.g + m[1][2] * rgb.b;
        let z = m[2][0] * rgb.r + m[2][1] * rgb.g + m[2][2] * rgb.b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for LinearRgb {
    /// CIELAB -> XYZ -> linear sRGB.
    ///
    /// The result is not clamped. Colors outside the sRGB gamut produce
    /// channels below 0.0 or above 1.0.
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let x = lab_f_inv(fx) * WHITE_X;
        let y = lab_f_inv(fy) * WHITE_Y;
        let z = lab_f_inv(fz) * WHITE_Z;

        let m = &XYZ_TO_RGB;
        LinearRgb {
            r: m[0][0] * x + m[0][1] * y + m[0][2] * z,
            g: m[1][0] * x + m[1][1] * y + m[1][2] * z,
            b: m[2][0] * x + m[2][1] * y + m[2][2] * z,
        }
    }
}
