//! Box-blur engine and background synthesis around a preserved image area.

pub mod background;
pub mod blur;

pub use background::{extend_background, mirror_background};
pub use blur::{BoxBlur, box_radii};
