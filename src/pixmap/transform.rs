use super::Pixmap;

/// Clockwise rotation angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Quarter turn.
    Deg90,
    /// Half turn.
    Deg180,
    /// Three quarter turns.
    Deg270,
}

impl Rotation {
    /// Parse a clockwise angle in degrees; only right angles are supported.
    pub fn from_degrees(deg: i32) -> Option<Self> {
        match deg.rem_euclid(360) {
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Pixmap<B> {
    /// Mirror rows top to bottom, in place.
    pub fn flip_vertical(&mut self) {
        let (height, stride) = (self.height, self.stride);
        let row_len = self.width * self.format.bytes_per_pixel();
        let data = self.data.as_mut();
        for y in 0..height / 2 {
            let (upper, lower) = data.split_at_mut((height - 1 - y) * stride);
            upper[y * stride..y * stride + row_len].swap_with_slice(&mut lower[..row_len]);
        }
    }

    /// Mirror columns left to right, in place.
    pub fn flip_horizontal(&mut self) {
        let bpp = self.format.bytes_per_pixel();
        for y in 0..self.height {
            let row = self.row_mut(y);
            row.reverse();
            if bpp > 1 {
                for px in row.chunks_exact_mut(bpp) {
                    px.reverse();
                }
            }
        }
    }
}

impl Pixmap {
    /// Rotate clockwise. Quarter turns reallocate because width and height swap.
    pub fn rotate(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::Deg180 => {
                self.flip_vertical();
                self.flip_horizontal();
            }
            Rotation::Deg90 | Rotation::Deg270 => {
                let (w, h) = (self.width, self.height);
                let bpp = self.format.bytes_per_pixel();
                let mut out = Pixmap::new(self.format, h, w);
                for y in 0..h {
                    let row = self.row(y);
                    for x in 0..w {
                        let (nx, ny) = match rotation {
                            Rotation::Deg90 => (h - 1 - y, x),
                            _ => (y, w - 1 - x),
                        };
                        let at = ny * out.stride + nx * bpp;
                        out.data[at..at + bpp].copy_from_slice(&row[x * bpp..x * bpp + bpp]);
                    }
                }
                *self = out;
            }
        }
    }
}
