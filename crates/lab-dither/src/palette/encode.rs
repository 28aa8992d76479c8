//! Palette Encoder: the fixed-size RGB table written next to an index map.

use super::palette::{Palette, MAX_PALETTE_SIZE};

/// Byte length of an encoded palette table (256 entries × RGB).
pub const PALETTE_TABLE_LEN: usize = MAX_PALETTE_SIZE * 3;

/// Encode a palette as a 768-byte `R, G, B` table.
///
/// Each entry is converted from CIELAB back to sRGB, rounded and clamped
/// to 0..=255. Slots past the end of the palette are zero.
///
/// # Example
///
/// ```
/// use lab_dither::{encode_palette, Palette};
///
/// let table = encode_palette(&Palette::from_hex(&["#ff0000"]).unwrap());
/// assert_eq!(table.len(), 768);
/// assert_eq!(&table[..3], &[255, 0, 0]);
/// assert!(table[3..].iter().all(|&b| b == 0));
/// ```
pub fn encode_palette(palette: &Palette) -> Vec<u8> {
    let mut table = vec![0u8; PALETTE_TABLE_LEN];
    for (slot, color) in table.chunks_exact_mut(3).zip(palette.to_srgb()) {
        slot.copy_from_slice(&color.to_bytes());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Lab;

    #[test]
    fn test_black_white_table() {
        let palette =
            Palette::new(&[Lab::new(0.0, 0.0, 0.0), Lab::new(100.0, 0.0, 0.0)]).unwrap();
        let table = encode_palette(&palette);
        assert_eq!(table.len(), PALETTE_TABLE_LEN);
        assert_eq!(&table[..6], &[0, 0, 0, 255, 255, 255]);
        assert!(table[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_out_of_gamut_entries_clamp() {
        // Saturated Lab green is far outside sRGB
        let palette = Palette::new(&[Lab::new(25.0, -100.0, 0.0), Lab::new(120.0, 0.0, 0.0)])
            .unwrap();
        let table = encode_palette(&palette);
        assert_eq!(table[0], 0, "Red channel of Lab green clamps to 0");
        assert_eq!(&table[3..6], &[255, 255, 255], "L=120 clamps to white");
    }

    #[test]
    fn test_full_palette_has_no_padding() {
        let entries: Vec<Lab> = (0..MAX_PALETTE_SIZE)
            .map(|i| Lab::new(100.0 * i as f32 / 255.0, 0.0, 0.0))
            .collect();
        let table = encode_palette(&Palette::new(&entries).unwrap());
        assert_eq!(&table[PALETTE_TABLE_LEN - 3..], &[255, 255, 255]);
    }
}
