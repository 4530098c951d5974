//! Gaussian blur approximated by three successive box blurs.

use crate::parallel::ThreadPool;
use crate::pixmap::RegionMut;

/// Number of box passes used to approximate one Gaussian.
const PASSES: usize = 3;

/// Box radii for each of the three passes.
///
/// Two odd widths `wl` and `wl + 2` are mixed so the variance of the cascade matches the
/// Gaussian's: the first `m` passes use the narrower one.
pub fn box_radii(sigma: f64) -> [usize; PASSES] {
    assert!(sigma.is_finite() && sigma > 0.0, "blur sigma must be positive, got {sigma}");
    let n = PASSES as f64;
    let var12 = 12.0 * sigma * sigma;
    let ideal = (var12 / n + 1.0).sqrt();
    let mut wl = ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wu = wl + 2;
    let wlf = wl as f64;
    let m = ((var12 - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0)).round();
    let m = m.clamp(0.0, n) as usize;

    let mut radii = [0; PASSES];
    for (i, radius) in radii.iter_mut().enumerate() {
        let w = if i < m { wl } else { wu };
        *radius = ((w - 1) / 2) as usize;
    }
    radii
}

/// Gaussian blur of a fixed sigma, with the box radii computed once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxBlur {
    radii: [usize; PASSES],
}

impl BoxBlur {
    /// Precompute the radii for `sigma`; panics unless `sigma` is finite and positive.
    pub fn new(sigma: f64) -> Self {
        let radii = box_radii(sigma);
        tracing::debug!(sigma, ?radii, "box blur radii");
        Self { radii }
    }

    /// Radius of each box pass; `0` skips the pass.
    pub fn radii(&self) -> [usize; PASSES] {
        self.radii
    }

    /// Blur `region` in place. Pixels beyond the region edges count as copies of the edge.
    pub fn apply(&self, region: &mut RegionMut<'_>) {
        let bpp = region.format().bytes_per_pixel();
        let (width, height) = (region.width(), region.height());
        if width == 0 || height == 0 {
            return;
        }
        let mut line = Vec::with_capacity(width.max(height) * bpp);
        for &radius in &self.radii {
            if radius == 0 {
                continue;
            }
            for y in 0..height {
                let row = region.row_mut(y);
                line.clear();
                line.extend_from_slice(row);
                box_line(&line, row, bpp, radius);
            }

            let mut column = vec![0u8; height * bpp];
            for x in 0..width {
                line.clear();
                for y in 0..height {
                    line.extend_from_slice(&region.row(y)[x * bpp..(x + 1) * bpp]);
                }
                box_line(&line, &mut column, bpp, radius);
                for (y, px) in column.chunks_exact(bpp).enumerate() {
                    region.row_mut(y)[x * bpp..(x + 1) * bpp].copy_from_slice(px);
                }
            }
        }
    }

    /// Blur every region as its own pool task and wait for all of them.
    pub fn apply_all(&self, pool: &ThreadPool, regions: Vec<RegionMut<'_>>) {
        pool.scope(|s| {
            let ids: Vec<_> = regions
                .into_iter()
                .map(|mut region| s.add(move || self.apply(&mut region)))
                .collect();
            s.wait_all(&ids);
        });
    }
}

/// Running-sum box filter of one line of `bpp`-byte pixels from `src` into `dst`.
fn box_line(src: &[u8], dst: &mut [u8], bpp: usize, radius: usize) {
    let n = src.len() / bpp;
    let last = n - 1;
    let div = 2 * radius as u64 + 1;
    let at = |i: usize, c: usize| u64::from(src[i.min(last) * bpp + c]);
    // Window taps past the end all read the last pixel.
    let inside = radius.min(last);
    let beyond = (radius - inside) as u64;

    for c in 0..bpp {
        let mut acc = (radius as u64 + 1) * at(0, c) + beyond * at(last, c);
        for i in 1..=inside {
            acc += at(i, c);
        }
        for x in 0..n {
            dst[x * bpp + c] = ((acc + div / 2) / div) as u8;
            acc += at(x + radius + 1, c);
            acc -= at(x.saturating_sub(radius), c);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
