//! Pixel buffers.
//!
//! A [`Pixmap`] is a 2-D array of pixels over some byte storage `B`. Owned pixmaps use
//! `Vec<u8>`; views attached to external memory (window surfaces, sub-regions of another
//! pixmap) use `&[u8]` or `&mut [u8]`, so they can never free the memory they point into.
//!
//! Pixel accessors assert bounds and format. Area operations clip against the pixmap bounds
//! and do nothing when the clipped area is empty.

use std::ops::Range;

use crate::foundation::core::{Argb, Rect, Size};

mod ops;
mod region;
mod transform;

pub use region::RegionMut;
pub use transform::Rotation;

/// Pixel layout of a [`Pixmap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One coverage byte per pixel, used as a blending mask.
    Gray,
    /// Opaque `0xXXRRGGBB`; the alpha byte is ignored and reads back as `0xff`.
    Rgb,
    /// Straight-alpha `0xAARRGGBB`.
    Argb,
}

impl PixelFormat {
    /// Bytes occupied by one pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb | Self::Argb => 4,
        }
    }

    /// Whether pixels carry color channels (everything but masks).
    pub const fn is_color(self) -> bool {
        !matches!(self, Self::Gray)
    }
}

/// 2-D pixel buffer over byte storage `B`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap<B = Vec<u8>> {
    format: PixelFormat,
    width: usize,
    height: usize,
    stride: usize,
    data: B,
}

/// Read-only view into pixels owned elsewhere.
pub type PixmapRef<'a> = Pixmap<&'a [u8]>;
/// Mutable view into pixels owned elsewhere.
pub type PixmapMut<'a> = Pixmap<&'a mut [u8]>;

/// Bytes needed to address `height` rows of `width` pixels at `stride`.
///
/// The last row only needs its pixels, not the full stride: sub-views end mid-row.
pub(crate) fn required_len(width: usize, height: usize, bpp: usize, stride: usize) -> usize {
    if width == 0 || height == 0 {
        0
    } else {
        (height - 1) * stride + width * bpp
    }
}

impl Pixmap {
    /// Allocate a zero-filled pixmap with a tight stride.
    pub fn new(format: PixelFormat, width: usize, height: usize) -> Self {
        let stride = width * format.bytes_per_pixel();
        Self {
            format,
            width,
            height,
            stride,
            data: vec![0; stride * height],
        }
    }

    /// Allocate a pixmap filled with `color`.
    pub fn filled(format: PixelFormat, width: usize, height: usize, color: Argb) -> Self {
        let mut pm = Self::new(format, width, height);
        let rect = pm.rect();
        pm.fill(rect, color);
        pm
    }

    /// Consume the pixmap and return its storage.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl<B: AsRef<[u8]>> Pixmap<B> {
    /// Bind to existing storage without copying.
    ///
    /// Panics if `stride` is smaller than a row or `data` cannot hold every addressed pixel.
    pub fn attach(format: PixelFormat, width: usize, height: usize, data: B, stride: usize) -> Self {
        let bpp = format.bytes_per_pixel();
        assert!(
            stride >= width * bpp,
            "pixmap stride {stride} is smaller than a row of {width} pixels"
        );
        let need = required_len(width, height, bpp, stride);
        assert!(
            data.as_ref().len() >= need,
            "pixmap storage holds {} bytes, {need} required",
            data.as_ref().len()
        );
        Self {
            format,
            width,
            height,
            stride,
            data,
        }
    }

    /// Pixel layout of the buffer.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance in bytes between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Width and height as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }

    /// Bounds of the pixmap at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width as u32, self.height as u32)
    }

    /// True when there are no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw storage, including any stride padding.
    pub fn bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Pixel bytes of row `y` (without stride padding).
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let start = y * self.stride;
        &self.data.as_ref()[start..start + self.width * self.format.bytes_per_pixel()]
    }

    /// Bytes of the pixel at `(x, y)`.
    pub fn pixel_bytes(&self, x: usize, y: usize) -> &[u8] {
        let offset = self.offset(x, y);
        &self.data.as_ref()[offset..offset + self.format.bytes_per_pixel()]
    }

    /// Color pixel at `(x, y)`. `Rgb` pixels read back opaque.
    pub fn at(&self, x: usize, y: usize) -> Argb {
        assert!(self.format.is_color(), "at() on a {:?} pixmap", self.format);
        let offset = self.offset(x, y);
        let d = self.data.as_ref();
        let px = Argb::from_bytes([d[offset], d[offset + 1], d[offset + 2], d[offset + 3]]);
        match self.format {
            PixelFormat::Rgb => px.with_alpha(0xff),
            _ => px,
        }
    }

    /// Mask coverage at `(x, y)`.
    pub fn gray_at(&self, x: usize, y: usize) -> u8 {
        assert_eq!(self.format, PixelFormat::Gray, "gray_at() on a color pixmap");
        self.data.as_ref()[self.offset(x, y)]
    }

    /// Borrow the whole pixmap as a read-only view.
    pub fn view(&self) -> PixmapRef<'_> {
        Pixmap {
            format: self.format,
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: self.data.as_ref(),
        }
    }

    /// Read-only view of `rect`, clipped to the bounds. Empty if nothing overlaps.
    pub fn submap(&self, rect: Rect) -> PixmapRef<'_> {
        let (range, width, height) = self.sub_range(rect);
        Pixmap {
            format: self.format,
            width,
            height,
            stride: self.stride,
            data: &self.data.as_ref()[range],
        }
    }

    /// Copy into a new tightly packed owned pixmap.
    pub fn to_pixmap(&self) -> Pixmap {
        let mut out = Pixmap::new(self.format, self.width, self.height);
        let row_len = self.width * self.format.bytes_per_pixel();
        if row_len > 0 {
            for (y, dst) in out.data.chunks_exact_mut(row_len).enumerate() {
                dst.copy_from_slice(self.row(y));
            }
        }
        out
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        y * self.stride + x * self.format.bytes_per_pixel()
    }

    fn sub_range(&self, rect: Rect) -> (Range<usize>, usize, usize) {
        let clip = self.rect().intersect(rect);
        if !clip.is_valid() {
            return (0..0, 0, 0);
        }
        let (width, height) = (clip.width as usize, clip.height as usize);
        let bpp = self.format.bytes_per_pixel();
        let start = clip.y as usize * self.stride + clip.x as usize * bpp;
        (
            start..start + required_len(width, height, bpp, self.stride),
            width,
            height,
        )
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pixmap<B> {
    /// Mutable raw storage, including any stride padding.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.data.as_mut()
    }

    /// Mutable pixel bytes of row `y` (without stride padding).
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
        let start = y * self.stride;
        let len = self.width * self.format.bytes_per_pixel();
        &mut self.data.as_mut()[start..start + len]
    }

    /// Store a color pixel at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, px: Argb) {
        assert!(self.format.is_color(), "set() on a {:?} pixmap", self.format);
        let offset = self.offset(x, y);
        self.data.as_mut()[offset..offset + 4].copy_from_slice(&px.to_bytes());
    }

    /// Store mask coverage at `(x, y)`.
    pub fn set_gray(&mut self, x: usize, y: usize, v: u8) {
        assert_eq!(self.format, PixelFormat::Gray, "set_gray() on a color pixmap");
        let offset = self.offset(x, y);
        self.data.as_mut()[offset] = v;
    }

    /// Borrow the whole pixmap as a mutable view.
    pub fn view_mut(&mut self) -> PixmapMut<'_> {
        Pixmap {
            format: self.format,
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: self.data.as_mut(),
        }
    }

    /// Mutable view of `rect`, clipped to the bounds. Empty if nothing overlaps.
    pub fn submap_mut(&mut self, rect: Rect) -> PixmapMut<'_> {
        let (range, width, height) = self.sub_range(rect);
        Pixmap {
            format: self.format,
            width,
            height,
            stride: self.stride,
            data: &mut self.data.as_mut()[range],
        }
    }

    /// Split disjoint row ranges into independent mutable bands.
    ///
    /// `ranges` must be ascending and non-overlapping. Each band keeps the full width and
    /// addresses its rows from 0.
    pub fn split_rows_mut(&mut self, ranges: &[Range<usize>]) -> Vec<PixmapMut<'_>> {
        let (format, width, height, stride) = (self.format, self.width, self.height, self.stride);
        let bpp = format.bytes_per_pixel();

        let mut rest: &mut [u8] = self.data.as_mut();
        let mut consumed = 0usize;
        let mut prev_end = 0usize;
        let mut bands = Vec::with_capacity(ranges.len());
        for rows in ranges {
            assert!(
                rows.start >= prev_end && rows.start <= rows.end && rows.end <= height,
                "row band {rows:?} is unordered or out of bounds (height {height})"
            );
            prev_end = rows.end;

            let start = rows.start * stride;
            let len = required_len(width, rows.len(), bpp, stride);
            let skip = start.saturating_sub(consumed).min(rest.len());
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let (band, tail) = tail.split_at_mut(len);
            rest = tail;
            consumed = start.max(consumed) + len;

            bands.push(Pixmap {
                format,
                width,
                height: rows.len(),
                stride,
                data: band,
            });
        }
        bands
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixmap/buffer.rs"]
mod tests;
