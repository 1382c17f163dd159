use crate::bail;
use crate::geometry::rectangle::Rectangle;
use crate::result::GeometryError;
use crate::types::Float;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::trace;

/// How [`Rectangle::fit_into`] picks its scale factor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleMode {
    /// No scaling, the rectangle is only centered within the target area
    None,
    /// Fills the target area without distortion, possibly cropping
    NoBorder,
    /// Fits the whole rectangle into the target area, possibly leaving empty bars
    #[default]
    ShowAll,
}

impl FromStr for ScaleMode {
    type Err = GeometryError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized: String = input
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Ok(match normalized.as_str() {
            "none" => ScaleMode::None,
            "noborder" => ScaleMode::NoBorder,
            "showall" => ScaleMode::ShowAll,
            _ => bail!("Unknown scale mode '{}'", input),
        })
    }
}

impl Rectangle {
    /// Calculates a rectangle with the same aspect ratio as this one, centered within `into`.
    ///
    /// With `pixel_perfect` the scale factor is restricted to whole-number multipliers or
    /// divisors (e.g. 3, 2, 1, 1/2, 1/3), rounded so that `ShowAll` never overshoots and
    /// `NoBorder` never leaves a gap.
    pub fn fit_into(&self, into: &Rectangle, scale_mode: ScaleMode, pixel_perfect: bool) -> Rectangle {
        let factor_x = into.width / self.width;
        let factor_y = into.height / self.height;
        let mut factor = match scale_mode {
            ScaleMode::None => 1.0,
            ScaleMode::NoBorder => factor_x.max(factor_y),
            ScaleMode::ShowAll => factor_x.min(factor_y),
        };
        if !factor.is_finite() {
            trace!("Degenerate fit of {} into {}, not scaling", self, into);
            factor = 1.0;
        }
        if pixel_perfect {
            factor = match scale_mode {
                ScaleMode::None => factor,
                ScaleMode::NoBorder => next_suitable_scale_factor(factor, true),
                ScaleMode::ShowAll => next_suitable_scale_factor(factor, false),
            };
        }
        let width = self.width * factor;
        let height = self.height * factor;
        trace!("Fitting {} into {} with factor {}", self, into, factor);
        Rectangle::new(
            into.x + (into.width - width) / 2.0,
            into.y + (into.height - height) / 2.0,
            width,
            height,
        )
    }
}

/// Beyond this, neighbouring divisors are no longer distinct floats
const MAX_DIVISOR: Float = (1 << 20) as Float;

/// Snaps `factor` to the closest value of `{..., 1/3, 1/2, 1, 2, 3, ...}` that is not
/// smaller (`up`) or not larger (`!up`) than `factor`. Factors below `1/2^20` are returned as is.
pub fn next_suitable_scale_factor(factor: Float, up: bool) -> Float {
    if !factor.is_finite() || factor <= 0.0 {
        return factor;
    }
    if factor >= 1.0 {
        return if up { factor.ceil() } else { factor.floor() };
    }
    let reciprocal = 1.0 / factor;
    if reciprocal > MAX_DIVISOR {
        return factor;
    }
    // 1/factor is off by an ulp when factor is exactly 1/n, so it is only a starting guess;
    // candidates are settled by comparing their unit fractions against factor itself
    let mut divisor = reciprocal.round().max(1.0);
    if up {
        while divisor > 1.0 && 1.0 / divisor < factor {
            divisor -= 1.0;
        }
        while 1.0 / (divisor + 1.0) >= factor {
            divisor += 1.0;
        }
    } else {
        while 1.0 / divisor > factor {
            divisor += 1.0;
        }
        while divisor > 1.0 && 1.0 / (divisor - 1.0) <= factor {
            divisor -= 1.0;
        }
    }
    1.0 / divisor
}
