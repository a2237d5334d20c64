//! Unit-type capability and build metadata.
//!
//! Only the types the decision core reasons about are modelled.  Build times
//! are engine frames; costs are `(minerals, gas)`.

use std::fmt;

use crate::Race;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitType {
    // ── Protoss ───────────────────────────────────────────────────────────
    Probe,
    Zealot,
    Dragoon,
    HighTemplar,
    Archon,
    DarkArchon,
    Reaver,
    Observer,
    Corsair,
    Arbiter,
    Nexus,
    Pylon,
    Assimilator,
    Forge,
    PhotonCannon,

    // ── Terran ────────────────────────────────────────────────────────────
    Scv,
    Marine,
    Vulture,
    SpiderMine,
    SiegeTankTankMode,
    SiegeTankSiegeMode,
    ScienceVessel,
    CommandCenter,
    SupplyDepot,
    Refinery,
    EngineeringBay,
    MissileTurret,

    // ── Zerg ──────────────────────────────────────────────────────────────
    Drone,
    Zergling,
    Hydralisk,
    Lurker,
    Scourge,
    Queen,
    Defiler,
    Overlord,
    Hatchery,
    Extractor,
    EvolutionChamber,
    CreepColony,
    SunkenColony,
    SporeColony,
}

impl UnitType {
    pub fn race(self) -> Race {
        use UnitType::*;
        match self {
            Probe | Zealot | Dragoon | HighTemplar | Archon | DarkArchon | Reaver | Observer
            | Corsair | Arbiter | Nexus | Pylon | Assimilator | Forge | PhotonCannon => {
                Race::Protoss
            }

            Scv | Marine | Vulture | SpiderMine | SiegeTankTankMode | SiegeTankSiegeMode
            | ScienceVessel | CommandCenter | SupplyDepot | Refinery | EngineeringBay
            | MissileTurret => Race::Terran,

            Drone | Zergling | Hydralisk | Lurker | Scourge | Queen | Defiler | Overlord
            | Hatchery | Extractor | EvolutionChamber | CreepColony | SunkenColony
            | SporeColony => Race::Zerg,
        }
    }

    pub fn is_building(self) -> bool {
        use UnitType::*;
        matches!(
            self,
            Nexus | Pylon | Assimilator | Forge | PhotonCannon
                | CommandCenter | SupplyDepot | Refinery | EngineeringBay | MissileTurret
                | Hatchery | Extractor | EvolutionChamber | CreepColony | SunkenColony
                | SporeColony
        )
    }

    /// Can reveal cloaked and burrowed units.
    pub fn is_detector(self) -> bool {
        use UnitType::*;
        matches!(
            self,
            Observer | Overlord | ScienceVessel | PhotonCannon | MissileTurret | SporeColony
        )
    }

    pub fn is_burrowable(self) -> bool {
        use UnitType::*;
        matches!(self, Drone | Zergling | Hydralisk | Lurker | Defiler)
    }

    /// Needs to sit in a power field to operate.
    pub fn requires_psi(self) -> bool {
        use UnitType::*;
        matches!(self, Forge | PhotonCannon)
    }

    /// The structure this type is morphed from, for types built in two steps.
    pub fn intermediate(self) -> Option<UnitType> {
        match self {
            UnitType::SunkenColony | UnitType::SporeColony => Some(UnitType::CreepColony),
            _ => None,
        }
    }

    /// Build duration in ticks.
    pub fn build_time(self) -> u64 {
        use UnitType::*;
        match self {
            SpiderMine => 1,
            Probe | Scv | Drone | CreepColony | SunkenColony | SporeColony => 300,
            Archon | DarkArchon => 300,
            Marine => 360,
            Zergling | Hydralisk => 420,
            Pylon | MissileTurret | Vulture | Scourge => 450,
            Zealot | Observer | Corsair | Lurker | Overlord | SupplyDepot | Assimilator
            | Refinery | Extractor | Forge | EvolutionChamber => 600,
            Dragoon | HighTemplar | PhotonCannon | SiegeTankTankMode | SiegeTankSiegeMode
            | Queen | Defiler => 750,
            EngineeringBay => 900,
            Reaver => 1050,
            ScienceVessel => 1200,
            Nexus | CommandCenter | Hatchery => 1800,
            Arbiter => 2400,
        }
    }

    /// `(minerals, gas)` cost.
    pub fn cost(self) -> (u32, u32) {
        use UnitType::*;
        match self {
            SpiderMine => (0, 0),
            Probe | Scv | Drone | Marine | Zergling | SunkenColony | SporeColony
            | Extractor => (50, 0),
            Zealot | Pylon | SupplyDepot | Assimilator | Refinery | Overlord => (100, 0),
            Dragoon => (125, 50),
            HighTemplar => (50, 150),
            Archon => (100, 300),
            DarkArchon => (250, 200),
            Reaver => (200, 100),
            Observer | Scourge => (25, 75),
            Corsair => (150, 100),
            Arbiter => (100, 350),
            Nexus | CommandCenter => (400, 0),
            Hatchery => (300, 0),
            Forge | PhotonCannon => (150, 0),
            Vulture | MissileTurret | CreepColony | EvolutionChamber => (75, 0),
            SiegeTankTankMode | SiegeTankSiegeMode => (150, 100),
            ScienceVessel => (100, 225),
            EngineeringBay => (125, 0),
            Hydralisk => (75, 25),
            Lurker => (50, 100),
            Queen => (100, 100),
            Defiler => (50, 150),
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
