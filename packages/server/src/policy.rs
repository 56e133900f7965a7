use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Raised when an intensity string is not one of the five known levels.
///
/// The request boundary rejects unknown intensities before they are stored,
/// but the policy still fails closed on its own so it can be relied on (and
/// tested) in isolation — it never silently matches zero songs.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown workout intensity '{0}'")]
pub struct UnknownIntensity(pub String);

/// Categorical workout difficulty. Drives genre selection during playlist
/// assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Slow,
    Mild,
    Intermediate,
    Fast,
    Extreme,
}

impl Intensity {
    pub const ALL: [Intensity; 5] = [
        Intensity::Slow,
        Intensity::Mild,
        Intensity::Intermediate,
        Intensity::Fast,
        Intensity::Extreme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Slow => "slow",
            Intensity::Mild => "mild",
            Intensity::Intermediate => "intermediate",
            Intensity::Fast => "fast",
            Intensity::Extreme => "extreme",
        }
    }

    /// Acceptable music genres for this intensity, in priority order.
    pub fn genres(self) -> &'static [&'static str] {
        match self {
            Intensity::Slow => &["Ambient", "Classical", "Jazz"],
            Intensity::Mild => &["Pop", "R&B", "Indie"],
            Intensity::Intermediate => &["Rock", "Hip-hop", "EDM"],
            Intensity::Fast => &["Techno", "Dance", "House"],
            Intensity::Extreme => &["Metal", "Hardcore", "Dubstep"],
        }
    }
}

impl FromStr for Intensity {
    type Err = UnknownIntensity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(Intensity::Slow),
            "mild" => Ok(Intensity::Mild),
            "intermediate" => Ok(Intensity::Intermediate),
            "fast" => Ok(Intensity::Fast),
            "extreme" => Ok(Intensity::Extreme),
            other => Err(UnknownIntensity(other.to_string())),
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
