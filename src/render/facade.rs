//! The [`Render`] entry point.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::effects::{BoxBlur, background};
use crate::foundation::core::{Argb, Point, Rect};
use crate::foundation::error::PixResult;
use crate::parallel::ThreadPool;
use crate::pixmap::{PixelFormat, Pixmap};
use crate::scale::Compose;
use crate::scale::antialias::scale_antialiased;
use crate::scale::nearest::scale_nearest;

use super::config::RenderConfig;

/// Entry point for drawing images and synthesizing backgrounds.
///
/// One instance owns the worker pool and the cached blur radii; create it once and share it
/// by reference. Calls against the same destination must not overlap.
pub struct Render {
    pool: ThreadPool,
    config: RenderConfig,
    antialiasing: AtomicBool,
    blur: BoxBlur,
}

impl Render {
    /// Validate `config` and start the worker pool.
    pub fn new(config: RenderConfig) -> PixResult<Self> {
        config.validate()?;
        let pool = ThreadPool::new(config.threads)?;
        let blur = BoxBlur::new(config.blur_sigma);
        tracing::debug!(
            threads = pool.size(),
            antialiasing = config.antialiasing,
            filter = %config.filter,
            "render ready"
        );
        Ok(Self {
            pool,
            antialiasing: AtomicBool::new(config.antialiasing),
            config,
            blur,
        })
    }

    /// Configuration the renderer was built with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Worker pool shared by every operation.
    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    /// Whether scaled draws use the anti-aliased path.
    pub fn antialiasing(&self) -> bool {
        self.antialiasing.load(Ordering::Relaxed)
    }

    /// Switch between anti-aliased and nearest-neighbour scaling for later draws.
    pub fn set_antialiasing(&self, enabled: bool) {
        self.antialiasing.store(enabled, Ordering::Relaxed);
    }

    /// Draw `src` scaled by `scale` with its top-left corner at `pos`.
    ///
    /// ARGB destinations are blended onto, others are overwritten. Scale `1.0` is a plain
    /// blend or copy with no resampling.
    #[tracing::instrument(
        level = "debug",
        skip(self, dst, src),
        fields(src_w = src.width(), src_h = src.height())
    )]
    pub fn draw<D, S>(&self, dst: &mut Pixmap<D>, src: &Pixmap<S>, pos: Point, scale: f64)
    where
        D: AsRef<[u8]> + AsMut<[u8]>,
        S: AsRef<[u8]> + Sync,
    {
        let blend = dst.format() == PixelFormat::Argb;
        if scale == 1.0 {
            if blend {
                dst.blend(src, pos);
            } else {
                dst.copy(src, pos);
            }
            return;
        }

        let compose = if blend { Compose::Blend } else { Compose::Copy };
        if self.antialiasing() {
            scale_antialiased(&self.pool, dst, src, pos, scale, self.config.filter, compose);
        } else {
            scale_nearest(&self.pool, dst, src, pos, scale, compose);
        }
    }

    /// Fill everything in `pm` except `rect` with `color`, one pool task per part.
    #[tracing::instrument(level = "debug", skip(self, pm))]
    pub fn fill_inverse<B>(&self, pm: &mut Pixmap<B>, rect: Rect, color: Argb)
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        self.pool.scope(|s| {
            let ids: Vec<_> = pm
                .cutout_mut(rect)
                .into_iter()
                .map(|mut region| s.add(move || region.fill(color)))
                .collect();
            s.wait_all(&ids);
        });
    }

    /// Fill everything outside `preserve` with a blurred, enlarged copy of what it holds.
    #[tracing::instrument(level = "debug", skip(self, pm))]
    pub fn extend_background<B>(&self, pm: &mut Pixmap<B>, preserve: Rect)
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        background::extend_background(&self.pool, pm, preserve, self.background_blur());
    }

    /// Fill everything outside `preserve` with blurred mirror tiles of what it holds.
    #[tracing::instrument(level = "debug", skip(self, pm))]
    pub fn mirror_background<B>(&self, pm: &mut Pixmap<B>, preserve: Rect)
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        background::mirror_background(&self.pool, pm, preserve, self.background_blur());
    }

    fn background_blur(&self) -> Option<&BoxBlur> {
        self.config.blur_background.then_some(&self.blur)
    }
}

impl std::fmt::Debug for Render {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Render")
            .field("pool", &self.pool)
            .field("config", &self.config)
            .field("antialiasing", &self.antialiasing())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/facade.rs"]
mod tests;
