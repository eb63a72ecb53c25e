//! Machine parameters and the peck (multi-pass plunge) schedule.
//!
//! All distances are inches. Depths are negative below the material
//! surface, heights positive above it.

use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound on plunge passes per hole
pub const MAX_PASSES: usize = 10_000;

/// Slowest accepted feed rate (in/min); anything lower prints as `F0.0`
pub const MIN_FEED_RATE: f64 = 0.1;

/// Slack when dividing depth by step, so exact multiples do not gain a pass
const STEP_EPSILON: f64 = 1e-9;

/// How a hole's full depth is split into passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeckPolicy {
    /// Step down by half the bit diameter each pass, clamping the last
    /// pass to the floor. Passes = ceil(|depth| / (bit / 2)).
    #[default]
    FixedStep,
    /// Plunge to half the floor depth, then to the floor. Always two passes.
    HalfDepth,
}

impl fmt::Display for PeckPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedStep => write!(f, "fixed-step"),
            Self::HalfDepth => write!(f, "half-depth"),
        }
    }
}

impl FromStr for PeckPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed-step" | "fixed" => Ok(Self::FixedStep),
            "half-depth" | "half" => Ok(Self::HalfDepth),
            _ => Err(format!("Unknown peck policy: {}", s)),
        }
    }
}

/// Per-run physical configuration of the drill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineParameters {
    /// Floor depth of every hole (in, must be < 0)
    pub z_depth: f64,
    /// Safe travel height above the surface (in)
    pub z_travel: f64,
    /// Drill bit diameter (in)
    pub bit_size: f64,
    /// Vertical feed rate (in/min)
    pub feed_rate: f64,
    /// Settle pause before program end (s)
    pub dwell_seconds: f64,
    /// Pass splitting policy
    pub peck_policy: PeckPolicy,
}

impl Default for MachineParameters {
    fn default() -> Self {
        Self {
            z_depth: -0.125,
            z_travel: 0.150,
            bit_size: 0.125,
            feed_rate: 9.0,
            dwell_seconds: 0.1,
            peck_policy: PeckPolicy::FixedStep,
        }
    }
}

impl MachineParameters {
    /// Check every parameter. Nothing may be cut with parameters that fail.
    pub fn validate(&self) -> ParameterResult<()> {
        let fields = [
            ("z_depth", self.z_depth),
            ("z_travel", self.z_travel),
            ("bit_size", self.bit_size),
            ("feed_rate", self.feed_rate),
            ("dwell_seconds", self.dwell_seconds),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ParameterError::NotFinite { name, value });
            }
        }

        if self.z_depth >= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "z_depth",
                value: self.z_depth,
                reason: "must be negative",
            });
        }
        if self.z_travel <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "z_travel",
                value: self.z_travel,
                reason: "must be above the surface",
            });
        }
        if self.bit_size <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "bit_size",
                value: self.bit_size,
                reason: "must be positive",
            });
        }
        if self.feed_rate < MIN_FEED_RATE {
            return Err(ParameterError::InvalidValue {
                name: "feed_rate",
                value: self.feed_rate,
                reason: "must be at least 0.1 in/min",
            });
        }
        if self.dwell_seconds < 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "dwell_seconds",
                value: self.dwell_seconds,
                reason: "must not be negative",
            });
        }

        let passes = self.pass_count();
        if passes > MAX_PASSES {
            return Err(ParameterError::Incompatible(format!(
                "depth {} with bit {} needs {} passes (max {})",
                self.z_depth, self.bit_size, passes, MAX_PASSES
            )));
        }

        Ok(())
    }

    /// Depth advanced per pass (positive)
    pub fn step(&self) -> f64 {
        match self.peck_policy {
            PeckPolicy::FixedStep => self.bit_size / 2.0,
            PeckPolicy::HalfDepth => -self.z_depth / 2.0,
        }
    }

    /// Number of plunge passes per hole
    pub fn pass_count(&self) -> usize {
        let ratio = (-self.z_depth / self.step() - STEP_EPSILON).ceil();
        if ratio.is_finite() && ratio >= 1.0 {
            ratio as usize
        } else {
            1
        }
    }

    /// Depths of every plunge pass for one hole, shallowest first.
    ///
    /// Strictly decreasing, each within `[z_depth, 0)`, last exactly
    /// `z_depth`. Depths are computed from the pass index so repeated
    /// subtraction cannot drift past the floor.
    pub fn plunge_depths(&self) -> Vec<f64> {
        let step = self.step();
        let passes = self.pass_count();
        (1..=passes)
            .map(|i| {
                if i == passes {
                    self.z_depth
                } else {
                    -(i as f64 * step)
                }
            })
            .collect()
    }
}
