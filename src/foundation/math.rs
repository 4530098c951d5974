/// Fractional bits of fixed-point filter weights.
pub(crate) const FIXED_BITS: u32 = 14;
/// `1.0` in fixed-point weight units.
pub(crate) const FIXED_ONE: i32 = 1 << FIXED_BITS;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// `(f * a + b * (255 - a) + 127) / 255`: channel `f` weighted by `a` over channel `b`.
pub(crate) fn lerp_div255(f: u8, b: u8, a: u8) -> u8 {
    let a = u32::from(a);
    ((u32::from(f) * a + u32::from(b) * (255 - a) + 127) / 255) as u8
}

/// Number of destination pixels covered by `n` source pixels at `scale`.
///
/// Shared by the kernel builder and both scalers so their visible regions agree.
pub(crate) fn scaled_extent(n: usize, scale: f64) -> i64 {
    (n as f64 * scale).round() as i64
}

pub(crate) fn clamp_u8(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
