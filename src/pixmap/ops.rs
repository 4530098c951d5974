use crate::foundation::core::{Argb, Point, Rect};
use crate::foundation::math::mul_div255_u8;

use super::{PixelFormat, Pixmap};

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pixmap<B> {
    /// Overwrite every pixel of `rect` with `color`. Masks receive `color.a`.
    pub fn fill(&mut self, rect: Rect, color: Argb) {
        let clip = self.rect().intersect(rect);
        if !clip.is_valid() {
            return;
        }
        let bytes = color.to_bytes();
        let format = self.format;
        let bpp = format.bytes_per_pixel();
        let (x0, x1) = (clip.x as usize * bpp, clip.right() as usize * bpp);
        for y in clip.top() as usize..clip.bottom() as usize {
            let row = &mut self.row_mut(y)[x0..x1];
            match format {
                PixelFormat::Gray => row.fill(color.a),
                PixelFormat::Rgb | PixelFormat::Argb => {
                    for px in row.chunks_exact_mut(4) {
                        px.copy_from_slice(&bytes);
                    }
                }
            }
        }
    }

    /// Composite `color` over every pixel of `rect`.
    pub fn fill_blend(&mut self, rect: Rect, color: Argb) {
        self.map_rect(rect, |px| px.blend(color));
    }

    /// Checkerboard of `cell`-sized squares anchored at the corner of `rect`.
    pub fn grid(&mut self, rect: Rect, cell: usize, first: Argb, second: Argb) {
        assert!(cell > 0, "grid cell size must be positive");
        let clip = self.rect().intersect(rect);
        if !clip.is_valid() {
            return;
        }
        for y in clip.top()..clip.bottom() {
            let cy = ((y - rect.top()) as usize / cell) % 2;
            for x in clip.left()..clip.right() {
                let cx = ((x - rect.left()) as usize / cell) % 2;
                let color = if cx == cy { first } else { second };
                self.set(x as usize, y as usize, color);
            }
        }
    }

    /// Outline `rect` with a border `thickness` pixels wide, drawn inside the rectangle.
    pub fn rectangle(&mut self, rect: Rect, thickness: u32, color: Argb) {
        if !rect.is_valid() || thickness == 0 {
            return;
        }
        let t = thickness.min(rect.width).min(rect.height);
        let (l, tp, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        let t = i64::from(t);
        self.fill_blend(Rect::from_edges(l, tp, r, tp + t), color);
        self.fill_blend(Rect::from_edges(l, b - t, r, b), color);
        self.fill_blend(Rect::from_edges(l, tp + t, l + t, b - t), color);
        self.fill_blend(Rect::from_edges(r - t, tp + t, r, b - t), color);
    }

    /// Composite `color` through a grayscale coverage `mask` placed at `pos`.
    pub fn mask<S: AsRef<[u8]>>(&mut self, color: Argb, pos: Point, mask: &Pixmap<S>) {
        assert_eq!(mask.format(), PixelFormat::Gray, "mask() expects a gray pixmap");
        assert!(self.format.is_color(), "mask() target must be a color pixmap");
        let Some((clip, sx, sy)) = self.overlap(pos, mask.width(), mask.height()) else {
            return;
        };
        for y in 0..clip.height as usize {
            for x in 0..clip.width as usize {
                let coverage = mask.gray_at(sx + x, sy + y);
                if coverage == 0 {
                    continue;
                }
                let a = mul_div255_u8(u16::from(color.a), u16::from(coverage));
                let (dx, dy) = (clip.x as usize + x, clip.y as usize + y);
                let out = self.at(dx, dy).blend(color.with_alpha(a));
                self.set(dx, dy, out);
            }
        }
    }

    /// Copy `src` pixels verbatim to `pos`.
    pub fn copy<S: AsRef<[u8]>>(&mut self, src: &Pixmap<S>, pos: Point) {
        assert_eq!(
            self.format.bytes_per_pixel(),
            src.format().bytes_per_pixel(),
            "copy() between incompatible formats {:?} and {:?}",
            src.format(),
            self.format
        );
        let Some((clip, sx, sy)) = self.overlap(pos, src.width(), src.height()) else {
            return;
        };
        let bpp = self.format.bytes_per_pixel();
        let (x0, len) = (clip.x as usize * bpp, clip.width as usize * bpp);
        for y in 0..clip.height as usize {
            let from = &src.row(sy + y)[sx * bpp..sx * bpp + len];
            self.row_mut(clip.y as usize + y)[x0..x0 + len].copy_from_slice(from);
        }
    }

    /// Composite `src` over the pixels at `pos`.
    pub fn blend<S: AsRef<[u8]>>(&mut self, src: &Pixmap<S>, pos: Point) {
        assert!(
            self.format.is_color() && src.format().is_color(),
            "blend() needs color pixmaps"
        );
        let Some((clip, sx, sy)) = self.overlap(pos, src.width(), src.height()) else {
            return;
        };
        for y in 0..clip.height as usize {
            for x in 0..clip.width as usize {
                let (dx, dy) = (clip.x as usize + x, clip.y as usize + y);
                let out = self.at(dx, dy).blend(src.at(sx + x, sy + y));
                self.set(dx, dy, out);
            }
        }
    }

    /// Replace every pixel with `f(pixel)`.
    pub fn foreach(&mut self, f: impl FnMut(Argb) -> Argb) {
        let rect = self.rect();
        self.map_rect(rect, f);
    }

    fn map_rect(&mut self, rect: Rect, mut f: impl FnMut(Argb) -> Argb) {
        assert!(self.format.is_color(), "color operation on a mask pixmap");
        let clip = self.rect().intersect(rect);
        if !clip.is_valid() {
            return;
        }
        let opaque = self.format == PixelFormat::Rgb;
        let (x0, x1) = (clip.x as usize * 4, clip.right() as usize * 4);
        for y in clip.top() as usize..clip.bottom() as usize {
            for px in self.row_mut(y)[x0..x1].chunks_exact_mut(4) {
                let mut cur = Argb::from_bytes([px[0], px[1], px[2], px[3]]);
                if opaque {
                    cur = cur.with_alpha(0xff);
                }
                px.copy_from_slice(&f(cur).to_bytes());
            }
        }
    }

    /// Destination area covered by a `width x height` source at `pos`, plus the source
    /// coordinates of its first pixel.
    fn overlap(&self, pos: Point, width: usize, height: usize) -> Option<(Rect, usize, usize)> {
        let placed = Rect::new(pos.x, pos.y, width as u32, height as u32);
        let clip = self.rect().intersect(placed);
        if !clip.is_valid() {
            return None;
        }
        let sx = (clip.left() - placed.left()) as usize;
        let sy = (clip.top() - placed.top()) as usize;
        Some((clip, sx, sy))
    }
}
