//! sRGB transfer function (IEC 61966-2-1).
//!
//! Computed directly rather than through a lookup table so that the
//! sRGB <-> CIELAB round trip stays exact up to floating point rounding.

const DECODE_THRESHOLD: f32 = 0.04045;
const ENCODE_THRESHOLD: f32 = 0.003_130_8;
const LINEAR_SLOPE: f32 = 12.92;
const OFFSET: f32 = 0.055;
const GAMMA: f32 = 2.4;

/// Decode a gamma-encoded sRGB channel (0.0..=1.0) to linear light.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= DECODE_THRESHOLD {
        srgb / LINEAR_SLOPE
    } else {
        ((srgb + OFFSET) / (1.0 + OFFSET)).powf(GAMMA)
    }
}

/// Encode a linear light channel as sRGB.
///
/// Out-of-gamut input (negative or above 1.0, which CIELAB colors such as
/// saturated greens produce) is clamped to 0.0..=1.0 first.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let linear = linear.clamp(0.0, 1.0);
    if linear <= ENCODE_THRESHOLD {
        linear * LINEAR_SLOPE
    } else {
        (1.0 + OFFSET) * linear.powf(1.0 / GAMMA) - OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for i in 0..=255u8 {
            let v = i as f32 / 255.0;
            let back = linear_to_srgb(srgb_to_linear(v));
            assert!((v - back).abs() < 1e-5, "Round trip failed at {}: {}", v, back);
        }
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_gamut_is_clamped() {
        assert_eq!(linear_to_srgb(-0.3), 0.0);
        assert!((linear_to_srgb(1.7) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mid_gray() {
        // sRGB 186/255 is close to half linear intensity
        let linear = srgb_to_linear(186.0 / 255.0);
        assert!((linear - 0.4910).abs() < 1e-3, "got {}", linear);
    }
}
