//! Playable races and the race-specific structure roles.

use std::fmt;

use crate::UnitType;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Race {
    Protoss,
    Terran,
    Zerg,
    /// Random or not yet scouted.
    Unknown,
}

impl Race {
    /// The gas-harvesting structure this race builds on a geyser.
    pub fn refinery(self) -> Option<UnitType> {
        match self {
            Race::Protoss => Some(UnitType::Assimilator),
            Race::Terran  => Some(UnitType::Refinery),
            Race::Zerg    => Some(UnitType::Extractor),
            Race::Unknown => None,
        }
    }

    /// The base-founding resource depot.
    pub fn center(self) -> Option<UnitType> {
        match self {
            Race::Protoss => Some(UnitType::Nexus),
            Race::Terran  => Some(UnitType::CommandCenter),
            Race::Zerg    => Some(UnitType::Hatchery),
            Race::Unknown => None,
        }
    }

    /// The structure that provides power to psi-dependent buildings, if any.
    pub fn power_provider(self) -> Option<UnitType> {
        match self {
            Race::Protoss => Some(UnitType::Pylon),
            _             => None,
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Race::Protoss => "Protoss",
            Race::Terran  => "Terran",
            Race::Zerg    => "Zerg",
            Race::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
