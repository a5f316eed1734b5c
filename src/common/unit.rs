//! Length units used by DrawingML.
//!
//! All geometry in a .pptx is stored in English Metric Units (EMU).

pub const EMUS_PER_INCH: i64 = 914_400;

/// Convert inches to EMU, rounding to the nearest unit.
#[inline]
pub fn inches(value: f64) -> i64 {
    (value * EMUS_PER_INCH as f64).round() as i64
}

/// Convert a font size in points to DrawingML hundredths of a point (`sz`).
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}
