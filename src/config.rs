//! Configuration types for the solver, detector, and matcher.
//!
//! Every struct implements `Default` and deserializes with
//! `#[serde(default)]`, so a partial JSON document is a valid config.

use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_MAX_PERIODS_PER_DAY, DEFAULT_MAX_PERIODS_PER_WEEK};

/// Scheduling engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverConfig {
    /// Weekly sessions per subject when a class has no curriculum.
    pub default_hours_per_week: u32,
    /// Try days that do not yet hold the (class, subject) before days that do.
    pub spread_across_days: bool,
    /// Post-pass that relocates blocking lessons to place unmet sessions.
    pub repair: RepairConfig,
}

/// Repair pass configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepairConfig {
    pub enabled: bool,
    /// Upper bound on lesson relocations across the whole pass.
    pub max_moves: usize,
    /// Seed for the slot scan order.
    pub seed: u64,
}

/// Conflict detector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectorConfig {
    /// Daily cap for lessons without a teacher snapshot.
    pub default_max_per_day: u32,
    /// Weekly cap for lessons without a teacher snapshot.
    pub default_max_per_week: u32,
}

/// Substitute matcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatcherConfig {
    /// Maximum matches returned.
    pub max_results: usize,
    /// Matches must score strictly above this.
    pub min_score: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            default_hours_per_week: 1,
            spread_across_days: false,
            repair: RepairConfig::default(),
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_moves: 64,
            seed: 42,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            default_max_per_day: DEFAULT_MAX_PERIODS_PER_DAY,
            default_max_per_week: DEFAULT_MAX_PERIODS_PER_WEEK,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            min_score: 30,
        }
    }
}

impl SolverConfig {
    /// Enables the repair pass with the given seed.
    pub fn with_repair(mut self, seed: u64) -> Self {
        self.repair.enabled = true;
        self.repair.seed = seed;
        self
    }

    /// Enables day spreading.
    pub fn with_spread_across_days(mut self) -> Self {
        self.spread_across_days = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SolverConfig::default();
        assert_eq!(s.default_hours_per_week, 1);
        assert!(!s.repair.enabled);

        let d = DetectorConfig::default();
        assert_eq!(d.default_max_per_day, 6);
        assert_eq!(d.default_max_per_week, 24);

        let m = MatcherConfig::default();
        assert_eq!(m.max_results, 5);
        assert_eq!(m.min_score, 30);
    }

    #[test]
    fn test_partial_document() {
        let s: SolverConfig =
            serde_json::from_str(r#"{"repair":{"enabled":true},"defaultHoursPerWeek":2}"#).unwrap();
        assert_eq!(s.default_hours_per_week, 2);
        assert!(s.repair.enabled);
        assert_eq!(s.repair.max_moves, 64);
        assert_eq!(s.repair.seed, 42);
    }
}
