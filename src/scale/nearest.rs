//! Point-sampling scaler.

use crate::foundation::core::{Point, Rect};
use crate::foundation::math::scaled_extent;
use crate::parallel::ThreadPool;
use crate::parallel::bands::{fan_out, split_even};
use crate::pixmap::Pixmap;

use super::Compose;

/// Fractional bits of the source step when enlarging.
const UPSCALE_BITS: u32 = 32;
/// Fractional bits of the source step when shrinking; leaves headroom for large ratios.
const DOWNSCALE_BITS: u32 = 25;

/// Destination area covered by `src_w x src_h` pixels placed at `pos` and scaled by `scale`,
/// clipped to `dst`.
///
/// The projected edges can lie far outside the `Rect` range, so clipping happens in `i64`.
pub(crate) fn visible_rect(dst: Rect, src_w: usize, src_h: usize, pos: Point, scale: f64) -> Rect {
    if !dst.is_valid() {
        return Rect::INVALID;
    }
    let (x, y) = (i64::from(pos.x), i64::from(pos.y));
    let right = x.saturating_add(scaled_extent(src_w, scale));
    let bottom = y.saturating_add(scaled_extent(src_h, scale));
    Rect::from_edges(
        x.max(dst.left()),
        y.max(dst.top()),
        right.min(dst.right()),
        bottom.min(dst.bottom()),
    )
}

/// Source indices sampled for destination indices `start..end` placed at `offset`.
fn sample_table(start: i64, end: i64, offset: i64, scale: f64, src_len: usize) -> Vec<usize> {
    let bits = if scale >= 1.0 {
        UPSCALE_BITS
    } else {
        DOWNSCALE_BITS
    };
    let step = ((1u64 << bits) as f64 / scale).ceil() as u128;
    let last = src_len as u128 - 1;
    (start..end)
        .map(|d| {
            let rel = (d - offset).max(0) as u128;
            ((rel * step) >> bits).min(last) as usize
        })
        .collect()
}

/// Scale `src` by `scale`, place its top-left corner at `pos` and write it into `dst`.
///
/// Rows are split evenly between the pool workers and the calling thread. Nothing happens when
/// the scaled image does not overlap `dst`.
pub fn scale_nearest<S, D>(
    pool: &ThreadPool,
    dst: &mut Pixmap<D>,
    src: &Pixmap<S>,
    pos: Point,
    scale: f64,
    compose: Compose,
) where
    S: AsRef<[u8]> + Sync,
    D: AsRef<[u8]> + AsMut<[u8]>,
{
    assert!(scale.is_finite() && scale > 0.0, "scale must be positive, got {scale}");
    assert!(
        src.format().is_color() && dst.format().is_color(),
        "nearest scaling needs color pixmaps ({:?} -> {:?})",
        src.format(),
        dst.format()
    );
    let area = visible_rect(dst.rect(), src.width(), src.height(), pos, scale);
    if !area.is_valid() || src.is_empty() {
        return;
    }

    let xs = sample_table(
        area.left(),
        area.right(),
        i64::from(pos.x),
        scale,
        src.width(),
    );
    let ys = sample_table(
        area.top(),
        area.bottom(),
        i64::from(pos.y),
        scale,
        src.height(),
    );
    let left = area.x as usize;
    let top = area.y as usize;

    let ranges: Vec<_> = split_even(0..ys.len(), pool.size() + 1)
        .into_iter()
        .map(|r| r.start + top..r.end + top)
        .collect();
    let bands: Vec<_> = dst
        .split_rows_mut(&ranges)
        .into_iter()
        .zip(ranges.iter().map(|r| r.start - top))
        .collect();

    tracing::trace!(?area, bands = bands.len(), "nearest scale");
    fan_out(pool, bands, |(mut band, first_row)| {
        for row in 0..band.height() {
            let sy = ys[first_row + row];
            for (i, &sx) in xs.iter().enumerate() {
                let px = src.at(sx, sy);
                let out = compose.apply(band.at(left + i, row), px);
                band.set(left + i, row, out);
            }
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/scale/nearest.rs"]
mod tests;
