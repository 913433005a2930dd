//! Point influences that bias the scalar potential.
use std::fmt;
use std::str::FromStr;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a pole's influence decays with distance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Falloff {
    #[default]
    Linear,
    Quadratic,
    Logarithmic,
    Logistic,
}

impl Falloff {
    pub const ALL: [Falloff; 4] = [
        Falloff::Linear,
        Falloff::Quadratic,
        Falloff::Logarithmic,
        Falloff::Logistic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Falloff::Linear => "linear",
            Falloff::Quadratic => "quadratic",
            Falloff::Logarithmic => "logarithmic",
            Falloff::Logistic => "logistic",
        }
    }

    /// Divisor applied to a pole's strength at `distance`.
    #[inline]
    pub fn divisor(self, distance: f64, cutoff: f64) -> f64 {
        match self {
            Falloff::Linear => 3.0 + 0.3 * distance,
            Falloff::Quadratic => 3.0 + 0.3 * distance * distance,
            Falloff::Logarithmic => 3.0 + 0.3 * (distance + 1.0).ln(),
            Falloff::Logistic => 3.0 + (-0.3 * (distance - cutoff / 4.0)).exp(),
        }
    }
}

impl fmt::Display for Falloff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Falloff {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Falloff::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownFalloff { name: s.to_owned() })
    }
}

/// A displaced reference origin with a strength and a falloff.
///
/// The pole's offset is added to the query point, so a pole at `(px, py)`
/// has its strongest influence around `(-px, -py)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pole {
    pub position: DVec2,
    pub strength: f64,
    pub falloff: Falloff,
}

impl Pole {
    pub fn new(x: f64, y: f64, strength: f64, falloff: Falloff) -> Self {
        Self {
            position: DVec2::new(x, y),
            strength,
            falloff,
        }
    }

    /// Distance used for falloff at query point `p`.
    #[inline]
    pub fn distance(&self, p: DVec2) -> f64 {
        (p + self.position).length()
    }

    /// Contribution to the potential at `p`. Zero beyond `cutoff`.
    #[inline]
    pub fn contribution(&self, p: DVec2, cutoff: f64) -> f64 {
        let distance = self.distance(p);
        if distance > cutoff {
            return 0.0;
        }
        self.strength / self.falloff.divisor(distance, cutoff)
    }
}
