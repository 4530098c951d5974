use crate::foundation::math::lerp_div255;

/// Integer pixel position.
///
/// Coordinates may be negative: an image placed partially off-screen has a negative origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column; grows to the right.
    pub x: i32,
    /// Row; grows downwards.
    pub y: i32,
}

impl Point {
    /// Sentinel used where a position is "not set".
    pub const INVALID: Self = Self {
        x: i32::MIN,
        y: i32::MIN,
    };

    /// Point at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// False for [`Point::INVALID`].
    pub const fn is_valid(self) -> bool {
        self.x != i32::MIN && self.y != i32::MIN
    }
}

/// Integer extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Pixels per row.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl Size {
    /// Empty extent.
    pub const INVALID: Self = Self {
        width: 0,
        height: 0,
    };

    /// Extent of `width x height` pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are non-zero.
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned integer rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Extent to the right of `x`.
    pub width: u32,
    /// Extent below `y`.
    pub height: u32,
}

impl Rect {
    /// Zero-area rectangle at [`Point::INVALID`]; returned when there is nothing to cover.
    pub const INVALID: Self = Self {
        x: i32::MIN,
        y: i32::MIN,
        width: 0,
        height: 0,
    };

    /// Rectangle with top-left corner `(x, y)`.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at `pos` with extent `size`.
    pub const fn from_parts(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Rectangle spanning `[x0, x1) x [y0, y1)`, or [`Rect::INVALID`] if that is empty.
    ///
    /// Edges outside the `i32` range and extents beyond `u32::MAX` saturate.
    pub fn from_edges(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        if x1 <= x0 || y1 <= y0 {
            return Self::INVALID;
        }
        let x = x0.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        let y = y0.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        let extent = |lo: i64, hi: i64| (hi - lo).clamp(0, i64::from(u32::MAX)) as u32;
        Self::new(x as i32, y as i32, extent(x, x1), extent(y, y1))
    }

    /// True for a non-zero area.
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Top-left corner.
    pub const fn pos(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Inclusive left edge.
    pub fn left(self) -> i64 {
        i64::from(self.x)
    }

    /// Inclusive top edge.
    pub fn top(self) -> i64 {
        i64::from(self.y)
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Whether `p` lies inside a valid rectangle.
    pub fn contains(self, p: Point) -> bool {
        let (x, y) = (i64::from(p.x), i64::from(p.y));
        self.is_valid() && x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Overlap of two rectangles, or [`Rect::INVALID`] when they do not overlap.
    pub fn intersect(self, other: Rect) -> Rect {
        if !self.is_valid() || !other.is_valid() {
            return Self::INVALID;
        }
        Self::from_edges(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Split `self` into the parts surrounding `inner`: `[top, bottom, left, right]`.
    ///
    /// Top and bottom span the full width; left and right span only the rows of `inner`.
    /// Sides with no extent are [`Rect::INVALID`]. When `inner` does not overlap `self`,
    /// the whole rectangle is returned as the top part.
    pub fn cutout(self, inner: Rect) -> [Rect; 4] {
        if !self.is_valid() {
            return [Self::INVALID; 4];
        }
        let inner = self.intersect(inner);
        if !inner.is_valid() {
            return [self, Self::INVALID, Self::INVALID, Self::INVALID];
        }
        [
            Self::from_edges(self.left(), self.top(), self.right(), inner.top()),
            Self::from_edges(self.left(), inner.bottom(), self.right(), self.bottom()),
            Self::from_edges(self.left(), inner.top(), inner.left(), inner.bottom()),
            Self::from_edges(inner.right(), inner.top(), self.right(), inner.bottom()),
        ]
    }
}

/// Straight (non-premultiplied) ARGB8 pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Argb {
    /// Opacity; `0` is fully transparent.
    pub a: u8,
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Argb {
    /// All channels zero.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0xff, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff, 0xff);

    /// Build from channels in `a, r, g, b` order.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpack `0xAARRGGBB`.
    pub const fn from_u32(v: u32) -> Self {
        Self::new((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Pack into `0xAARRGGBB`.
    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Decode the in-memory layout (little-endian `0xAARRGGBB`: B, G, R, A).
    pub const fn from_bytes(px: [u8; 4]) -> Self {
        Self::new(px[3], px[2], px[1], px[0])
    }

    /// Encode into the in-memory layout, see [`Argb::from_bytes`].
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Same color with alpha replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(a, self.r, self.g, self.b)
    }

    /// Composite `fg` over `self`.
    ///
    /// Transparent `fg` keeps `self`, opaque `fg` replaces it; otherwise alpha is the max of
    /// both and each color channel is interpolated by `fg.a`.
    pub fn blend(self, fg: Argb) -> Argb {
        match fg.a {
            0 => self,
            0xff => fg,
            a => Argb::new(
                self.a.max(a),
                lerp_div255(fg.r, self.r, a),
                lerp_div255(fg.g, self.g, a),
                lerp_div255(fg.b, self.b, a),
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
