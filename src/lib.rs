//! pixrender is a multithreaded software image renderer.
//!
//! It composites decoded raster images onto a destination [`Pixmap`] at any position and
//! scale, and synthesizes backgrounds around them:
//!
//! - Create one [`Render`] from a [`RenderConfig`]; it owns the worker pool
//! - [`Render::draw`] places an image, anti-aliased or nearest-neighbour
//! - [`Render::fill_inverse`], [`Render::extend_background`] and
//!   [`Render::mirror_background`] fill the area around a preserved rectangle
//!
//! Decoding and encoding files are adapters in [`assets`]; the renderer itself only sees
//! pixel buffers.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Adapters between encoded image files and pixmaps.
pub mod assets;
pub mod effects;
pub mod parallel;
pub mod pixmap;
pub mod render;
pub mod scale;

pub use crate::foundation::core::{Argb, Point, Rect, Size};
pub use crate::foundation::error::{PixError, PixResult};
pub use crate::parallel::{TaskId, ThreadPool};
pub use crate::pixmap::{PixelFormat, Pixmap, PixmapMut, PixmapRef, RegionMut, Rotation};
pub use crate::render::{Render, RenderConfig};
pub use crate::scale::{Compose, Filter};
