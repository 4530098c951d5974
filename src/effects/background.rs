//! Backgrounds synthesized from the image itself around a preserved rectangle.

use crate::foundation::core::{Point, Rect};
use crate::foundation::math::scaled_extent;
use crate::parallel::ThreadPool;
use crate::pixmap::{Pixmap, RegionMut};
use crate::scale::Compose;
use crate::scale::nearest::scale_nearest;

use super::blur::BoxBlur;

/// Fill everything outside `preserve` with an enlarged copy of the preserved pixels.
///
/// The copy is scaled to cover the whole pixmap, centered on it, and sampled by nearest
/// neighbour into each surrounding part; `blur` is then applied to those parts.
pub fn extend_background<B>(
    pool: &ThreadPool,
    pm: &mut Pixmap<B>,
    preserve: Rect,
    blur: Option<&BoxBlur>,
) where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let preserve = pm.rect().intersect(preserve);
    if !preserve.is_valid() {
        return;
    }
    let image = pm.submap(preserve).to_pixmap();
    let (w, h) = (image.width(), image.height());
    let scale = (pm.width() as f64 / w as f64).max(pm.height() as f64 / h as f64);
    let origin = Point::new(
        ((pm.width() as i64 - scaled_extent(w, scale)) / 2) as i32,
        ((pm.height() as i64 - scaled_extent(h, scale)) / 2) as i32,
    );
    tracing::trace!(?preserve, scale, ?origin, "extend background");

    for part in pm.rect().cutout(preserve) {
        if !part.is_valid() {
            continue;
        }
        let pos = Point::new(origin.x - part.x, origin.y - part.y);
        let mut target = pm.submap_mut(part);
        scale_nearest(pool, &mut target, &image, pos, scale, Compose::Copy);
    }

    if let Some(blur) = blur {
        blur.apply_all(pool, pm.cutout_mut(preserve));
    }
}

/// Fill everything outside `preserve` by tiling the preserved pixels with alternating mirror
/// flips, so every tile edge meets its mirror image; `blur` is then applied to the filled
/// parts.
pub fn mirror_background<B>(
    pool: &ThreadPool,
    pm: &mut Pixmap<B>,
    preserve: Rect,
    blur: Option<&BoxBlur>,
) where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    let preserve = pm.rect().intersect(preserve);
    if !preserve.is_valid() {
        return;
    }
    let image = pm.submap(preserve).to_pixmap();
    let image = &image;
    tracing::trace!(?preserve, "mirror background");

    pool.scope(|s| {
        let ids: Vec<_> = pm
            .cutout_mut(preserve)
            .into_iter()
            .map(|mut region| {
                s.add(move || {
                    mirror_fill(&mut region, image, preserve.pos());
                    if let Some(blur) = blur {
                        blur.apply(&mut region);
                    }
                })
            })
            .collect();
        s.wait_all(&ids);
    });
}

/// Index into a mirrored tiling of `len` pixels; odd tiles run backwards.
fn mirror_index(offset: i64, len: usize) -> usize {
    let len = len as i64;
    let tile = offset.div_euclid(len);
    let inner = offset.rem_euclid(len);
    (if tile % 2 == 0 { inner } else { len - 1 - inner }) as usize
}

fn mirror_fill(region: &mut RegionMut<'_>, image: &Pixmap, origin: Point) {
    let rect = region.rect();
    let xs: Vec<usize> = (0..region.width() as i64)
        .map(|x| mirror_index(rect.left() + x - i64::from(origin.x), image.width()))
        .collect();
    for y in 0..region.height() {
        let sy = mirror_index(rect.top() + y as i64 - i64::from(origin.y), image.height());
        for (x, &sx) in xs.iter().enumerate() {
            region.set(x, y, image.at(sx, sy));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/background.rs"]
mod tests;
