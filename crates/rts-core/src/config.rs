//! Tunable constants of the decision core.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! the agent builder.  `Default` reproduces the tuned values.

use crate::{RtsError, RtsResult};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// Refinery orders may only be issued on ticks that are a multiple of
    /// this interval.  Must be non-zero.
    pub refinery_throttle_ticks: u64,

    /// Supply total (engine units, i.e. doubled) above which an unpowered
    /// base gets its own power structure.
    pub psi_supply_threshold: u32,

    /// Static defenses per base for Protoss and Terran.
    pub defense_per_base: i32,

    /// Same, when any opponent is Zerg.
    pub defense_per_base_vs_zerg: i32,

    /// Zerg ground-defense colonies per base.
    pub zerg_sunken_per_base: i32,

    /// Zerg anti-air colonies per base.
    pub zerg_spore_per_base: i32,

    /// Defense is only provisioned once this many bases are active.
    pub min_bases_for_defense: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            refinery_throttle_ticks:  50,
            psi_supply_threshold:     380,
            defense_per_base:         2,
            defense_per_base_vs_zerg: 4,
            zerg_sunken_per_base:     3,
            zerg_spore_per_base:      1,
            min_bases_for_defense:    2,
        }
    }
}

impl AgentConfig {
    /// Reject values that would make the reconciliation loop misbehave.
    pub fn validate(&self) -> RtsResult<()> {
        if self.refinery_throttle_ticks == 0 {
            return Err(RtsError::Config("refinery_throttle_ticks must be non-zero".into()));
        }
        let targets = [
            self.defense_per_base,
            self.defense_per_base_vs_zerg,
            self.zerg_sunken_per_base,
            self.zerg_spore_per_base,
        ];
        if targets.iter().any(|&t| t < 0) {
            return Err(RtsError::Config("per-base defense targets must not be negative".into()));
        }
        Ok(())
    }
}
