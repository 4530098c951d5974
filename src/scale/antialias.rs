//! Separable anti-aliased scaler.
//!
//! The horizontal kernel is applied to every source row the vertical kernel will read,
//! producing an intermediate image `horizontal.n_out` wide and `vertical.n_in` tall. All
//! participants then meet at a barrier, and only after that does the vertical kernel read
//! the intermediate image and write into the destination. Both passes are split by rows
//! between the pool workers and the calling thread.

use std::sync::Barrier;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::foundation::core::{Argb, Point, Rect};
use crate::foundation::math::{FIXED_BITS, FIXED_ONE, clamp_u8};
use crate::parallel::ThreadPool;
use crate::parallel::bands::{fan_out, split_even};
use crate::pixmap::Pixmap;

use super::Compose;
use super::kernel::{Filter, Kernel};

/// Weighted average of `pixels`, weighting color by alpha.
///
/// Alpha is the fixed-point weighted sum rounded back to 8 bits. Colors are divided by the
/// accumulated alpha weight, or by `1 << 14` when that is not positive.
pub(crate) fn accumulate(weights: &[i16], pixels: impl Iterator<Item = Argb>) -> Argb {
    let (mut sa, mut sr, mut sg, mut sb) = (0i64, 0i64, 0i64, 0i64);
    for (&w, px) in weights.iter().zip(pixels) {
        let wa = i64::from(w) * i64::from(px.a);
        sa += wa;
        sr += wa * i64::from(px.r);
        sg += wa * i64::from(px.g);
        sb += wa * i64::from(px.b);
    }
    let alpha = clamp_u8((sa + (1 << (FIXED_BITS - 1))) >> FIXED_BITS);
    let div = if sa > 0 { sa } else { i64::from(FIXED_ONE) };
    let channel = |sum: i64| clamp_u8((sum + div / 2).div_euclid(div));
    Argb::new(alpha, channel(sr), channel(sg), channel(sb))
}

/// Scale `src` by `scale` with `filter`, place its top-left corner at `pos` and write it into
/// `dst`.
///
/// Uses exactly `pool.size() + 1` participants so the rendezvous between the two passes
/// needs every pool worker to be free; the pool must not be running other tasks meanwhile.
pub fn scale_antialiased<S, D>(
    pool: &ThreadPool,
    dst: &mut Pixmap<D>,
    src: &Pixmap<S>,
    pos: Point,
    scale: f64,
    filter: Filter,
    compose: Compose,
) where
    S: AsRef<[u8]> + Sync,
    D: AsRef<[u8]> + AsMut<[u8]>,
{
    assert!(scale.is_finite() && scale > 0.0, "scale must be positive, got {scale}");
    assert!(
        src.format().is_color() && dst.format().is_color(),
        "anti-aliased scaling needs color pixmaps ({:?} -> {:?})",
        src.format(),
        dst.format()
    );

    let horizontal = Kernel::build(
        src.width(),
        dst.width(),
        i64::from(pos.x),
        scale,
        filter,
    );
    let vertical = Kernel::build(
        src.height(),
        dst.height(),
        i64::from(pos.y),
        scale,
        filter,
    );
    if horizontal.is_empty() || vertical.is_empty() {
        return;
    }

    let width = horizontal.n_out;
    let buffer: Vec<AtomicU32> = (0..width * vertical.n_in).map(|_| AtomicU32::new(0)).collect();

    let parts = pool.size() + 1;
    let mid_rows = split_even(0..vertical.n_in, parts);
    let out_rows = split_even(0..vertical.n_out, parts);

    let area = Rect::new(
        horizontal.start_out as i32,
        vertical.start_out as i32,
        horizontal.n_out as u32,
        vertical.n_out as u32,
    );
    let mut target = dst.submap_mut(area);
    let bands = target.split_rows_mut(&out_rows);
    let work: Vec<_> = mid_rows.into_iter().zip(out_rows.iter().cloned()).zip(bands).collect();

    tracing::trace!(
        ?area,
        %filter,
        intermediate_rows = vertical.n_in,
        participants = parts,
        "anti-aliased scale"
    );

    let barrier = Barrier::new(parts);
    let (horizontal, vertical, buffer) = (&horizontal, &vertical, &buffer);
    fan_out(pool, work, |((mid, out), mut band)| {
        for row in mid {
            let sy = vertical.start_in + row;
            let line = &buffer[row * width..(row + 1) * width];
            for (slot, o) in line.iter().zip(&horizontal.outputs) {
                let px = accumulate(
                    horizontal.weights_of(o),
                    (o.first..o.first + o.n).map(|sx| src.at(sx, sy)),
                );
                slot.store(px.to_u32(), Ordering::Relaxed);
            }
        }

        barrier.wait();

        for (row, o) in vertical.outputs[out].iter().enumerate() {
            let weights = vertical.weights_of(o);
            let base = o.first - vertical.start_in;
            for x in 0..width {
                let px = accumulate(
                    weights,
                    (base..base + o.n)
                        .map(|r| Argb::from_u32(buffer[r * width + x].load(Ordering::Relaxed))),
                );
                let out = compose.apply(band.at(x, row), px);
                band.set(x, row, out);
            }
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/scale/antialias.rs"]
mod tests;
