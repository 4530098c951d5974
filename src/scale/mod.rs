//! Scaling a source pixmap onto a destination at an arbitrary position and scale.

pub mod antialias;
pub mod kernel;
pub mod nearest;

pub use kernel::{Filter, Kernel, KernelOutput};

use crate::foundation::core::Argb;

/// How scaled pixels are written into the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compose {
    /// Overwrite destination pixels.
    Copy,
    /// Alpha-blend over destination pixels.
    Blend,
}

impl Compose {
    pub(crate) fn apply(self, dst: Argb, src: Argb) -> Argb {
        match self {
            Self::Copy => src,
            Self::Blend => dst.blend(src),
        }
    }
}
