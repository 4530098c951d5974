//! One-dimensional resampling kernels in 14-bit fixed point.
//!
//! A [`Kernel`] maps a run of source pixels onto a run of destination pixels along one axis.
//! Each destination pixel gets its own list of input weights; every list sums to exactly
//! `1 << 14` so repeated scaling neither darkens nor brightens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::PixError;
use crate::foundation::math::{FIXED_ONE, scaled_extent};

/// Window function used to weigh source pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Area average; support 0.5.
    Box,
    /// Triangle (bilinear); support 1.0.
    Linear,
    /// Catmull-Rom cubic; support 2.0.
    Cubic,
    /// Magic Kernel Sharp 2013; support 2.5.
    #[default]
    Mks13,
}

impl Filter {
    /// Every filter, in increasing support order.
    pub const ALL: [Filter; 4] = [Filter::Box, Filter::Linear, Filter::Cubic, Filter::Mks13];

    /// Half-width of the window at unit scale.
    pub const fn support(self) -> f64 {
        match self {
            Self::Box => 0.5,
            Self::Linear => 1.0,
            Self::Cubic => 2.0,
            Self::Mks13 => 2.5,
        }
    }

    /// Window value at distance `x` from the center.
    pub fn weight(self, x: f64) -> f64 {
        let x = x.abs();
        match self {
            Self::Box => {
                if x < 0.5 {
                    1.0
                } else if x == 0.5 {
                    0.5
                } else {
                    0.0
                }
            }
            Self::Linear => (1.0 - x).max(0.0),
            Self::Cubic => {
                if x < 1.0 {
                    (1.5 * x - 2.5) * x * x + 1.0
                } else if x < 2.0 {
                    ((-0.5 * x + 2.5) * x - 4.0) * x + 2.0
                } else {
                    0.0
                }
            }
            Self::Mks13 => {
                if x <= 0.5 {
                    17.0 / 16.0 - 7.0 / 4.0 * x * x
                } else if x <= 1.5 {
                    (1.0 - x) * (7.0 / 4.0 - x)
                } else if x <= 2.5 {
                    let t = x - 5.0 / 2.0;
                    -1.0 / 8.0 * t * t
                } else {
                    0.0
                }
            }
        }
    }

    /// Lowercase name as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
            Self::Mks13 => "mks13",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = PixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                PixError::validation(format!(
                    "unknown filter '{s}' (expected box, linear, cubic or mks13)"
                ))
            })
    }
}

/// Input run and weight slot of one destination pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelOutput {
    /// First contributing source index.
    pub first: usize,
    /// Number of contributing source pixels.
    pub n: usize,
    /// Offset of this output's weights in [`Kernel::weights`].
    pub index: usize,
}

/// Separable resampling kernel for one axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kernel {
    /// First destination index with any image contribution.
    pub start_out: usize,
    /// Number of destination pixels produced.
    pub n_out: usize,
    /// Lowest source index read by any output.
    pub start_in: usize,
    /// Number of source pixels spanned by all outputs together.
    pub n_in: usize,
    /// One record per produced destination pixel, in destination order.
    pub outputs: Vec<KernelOutput>,
    /// Concatenated weights of all outputs.
    pub weights: Vec<i16>,
}

impl Kernel {
    /// Build the kernel that places `src_len` source pixels at destination index `offset`,
    /// scaled by `scale`, into a destination axis of `dst_len` pixels.
    ///
    /// Destination pixels outside the projected footprint are not produced. An empty kernel
    /// comes back when nothing is visible.
    pub fn build(src_len: usize, dst_len: usize, offset: i64, scale: f64, filter: Filter) -> Self {
        assert!(scale.is_finite() && scale > 0.0, "scale must be positive, got {scale}");
        let projected = scaled_extent(src_len, scale);
        let lo = offset.max(0);
        let hi = (offset + projected).min(dst_len as i64);
        if src_len == 0 || hi <= lo {
            return Self::default();
        }

        let shrink = scale.min(1.0);
        let window = filter.support() / shrink;
        let last_in = src_len as i64 - 1;

        let mut kernel = Self {
            start_out: lo as usize,
            n_out: (hi - lo) as usize,
            start_in: usize::MAX,
            n_in: 0,
            outputs: Vec::with_capacity((hi - lo) as usize),
            weights: Vec::new(),
        };
        let mut end_in = 0usize;
        let mut raw: Vec<f64> = Vec::new();

        for out in lo..hi {
            let center = ((out - offset) as f64 + 0.5) / scale - 0.5;
            let first = ((center - window).ceil() as i64).clamp(0, last_in);
            let last = ((center + window).floor() as i64).clamp(0, last_in);

            raw.clear();
            raw.extend((first..=last).map(|i| filter.weight((i as f64 - center) * shrink)));
            let sum: f64 = raw.iter().sum();

            let (first, fixed) = if sum.abs() < f64::EPSILON {
                (center.round().clamp(0.0, last_in as f64) as i64, vec![FIXED_ONE])
            } else {
                let mut fixed: Vec<i32> = raw
                    .iter()
                    .map(|w| (w / sum * f64::from(FIXED_ONE)).round() as i32)
                    .collect();
                let error = FIXED_ONE - fixed.iter().sum::<i32>();
                let middle = ((center.round() as i64).clamp(first, last) - first) as usize;
                fixed[middle] += error;
                (first, fixed)
            };

            let lead = fixed.iter().take_while(|&&w| w == 0).count();
            let trail = fixed.iter().rev().take_while(|&&w| w == 0).count();
            let kept = &fixed[lead..fixed.len() - trail];
            let first = first as usize + lead;

            kernel.outputs.push(KernelOutput {
                first,
                n: kept.len(),
                index: kernel.weights.len(),
            });
            kernel.weights.extend(kept.iter().map(|&w| {
                debug_assert!(i16::try_from(w).is_ok(), "kernel weight {w} overflows i16");
                w as i16
            }));
            kernel.start_in = kernel.start_in.min(first);
            end_in = end_in.max(first + kept.len());
        }

        kernel.n_in = end_in - kernel.start_in;
        tracing::trace!(
            src_len,
            dst_len,
            offset,
            scale,
            %filter,
            n_out = kernel.n_out,
            n_in = kernel.n_in,
            weights = kernel.weights.len(),
            "kernel built"
        );
        kernel
    }

    /// True when no destination pixel receives any contribution.
    pub fn is_empty(&self) -> bool {
        self.n_out == 0
    }

    /// Exclusive end of the produced destination run.
    pub fn end_out(&self) -> usize {
        self.start_out + self.n_out
    }

    /// Weights of `output`, one per source pixel starting at `output.first`.
    pub fn weights_of(&self, output: &KernelOutput) -> &[i16] {
        &self.weights[output.index..output.index + output.n]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/kernel.rs"]
mod tests;
