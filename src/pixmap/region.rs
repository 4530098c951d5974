use crate::foundation::core::{Argb, Rect};

use super::{PixelFormat, Pixmap};

/// Mutable rectangular area of a pixmap held as one slice per row.
///
/// Unlike a [`super::PixmapMut`], a region can be narrower than the rows it lives in, so the
/// left and right parts of a cutout can be handed to different threads at the same time.
#[derive(Debug)]
pub struct RegionMut<'a> {
    format: PixelFormat,
    rect: Rect,
    rows: Vec<&'a mut [u8]>,
}

impl<'a> RegionMut<'a> {
    /// Placement of the region inside the pixmap it was cut from.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Pixel layout shared with the parent pixmap.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.rect.width as usize
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Color pixel at region-relative `(x, y)`.
    pub fn at(&self, x: usize, y: usize) -> Argb {
        assert!(self.format.is_color(), "at() on a mask region");
        let px = &self.rows[y][x * 4..x * 4 + 4];
        let px = Argb::from_bytes([px[0], px[1], px[2], px[3]]);
        match self.format {
            PixelFormat::Rgb => px.with_alpha(0xff),
            _ => px,
        }
    }

    /// Store a color pixel at region-relative `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, px: Argb) {
        assert!(self.format.is_color(), "set() on a mask region");
        self.rows[y][x * 4..x * 4 + 4].copy_from_slice(&px.to_bytes());
    }

    /// Pixel bytes of region row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.rows[y]
    }

    /// Mutable pixel bytes of region row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.rows[y]
    }

    /// Overwrite the whole region with `color`.
    pub fn fill(&mut self, color: Argb) {
        let bytes = color.to_bytes();
        for row in &mut self.rows {
            match self.format {
                PixelFormat::Gray => row.fill(color.a),
                PixelFormat::Rgb | PixelFormat::Argb => {
                    for px in row.chunks_exact_mut(4) {
                        px.copy_from_slice(&bytes);
                    }
                }
            }
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pixmap<B> {
    /// The whole pixmap as a single region.
    pub fn region_mut(&mut self) -> RegionMut<'_> {
        let (format, stride, height) = (self.format, self.stride, self.height);
        let rect = self.rect();
        let row_len = self.width * format.bytes_per_pixel();
        let rows = if row_len == 0 || height == 0 {
            Vec::new()
        } else {
            self.data
                .as_mut()
                .chunks_mut(stride)
                .take(height)
                .map(|line| &mut line[..row_len])
                .collect()
        };
        RegionMut { format, rect, rows }
    }

    /// Disjoint mutable regions surrounding `inner`, in `top, bottom, left, right` order.
    ///
    /// Only non-empty parts are returned; see [`Rect::cutout`].
    pub fn cutout_mut(&mut self, inner: Rect) -> Vec<RegionMut<'_>> {
        if self.is_empty() {
            return Vec::new();
        }
        let [top, bottom, left, right] = self.rect().cutout(inner);
        let (format, stride, width, height) = (self.format, self.stride, self.width, self.height);
        let bpp = format.bytes_per_pixel();
        let row_len = width * bpp;

        let mut parts: [RegionMut<'_>; 4] = [top, bottom, left, right].map(|rect| RegionMut {
            format,
            rect,
            rows: Vec::new(),
        });

        for (y, line) in self.data.as_mut().chunks_mut(stride).take(height).enumerate() {
            let y = y as i64;
            if line.len() < row_len {
                break;
            }
            let line = &mut line[..row_len];
            if top.is_valid() && y < top.bottom() {
                parts[0].rows.push(line);
            } else if bottom.is_valid() && y >= bottom.top() {
                parts[1].rows.push(line);
            } else {
                // Middle band: everything left of the hole, then everything right of it.
                let hole_left = if left.is_valid() {
                    left.right() as usize
                } else {
                    0
                };
                let hole_right = if right.is_valid() {
                    right.left() as usize
                } else {
                    width
                };
                let (l, rest) = line.split_at_mut(hole_left * bpp);
                let (_, r) = rest.split_at_mut((hole_right - hole_left) * bpp);
                if left.is_valid() {
                    parts[2].rows.push(l);
                }
                if right.is_valid() {
                    parts[3].rows.push(r);
                }
            }
        }

        parts
            .into_iter()
            .filter(|part| part.rect.is_valid())
            .collect()
    }
}
