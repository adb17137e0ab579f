use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Lookup tables behind every heuristic in the engine
///
/// Defaults reproduce the built-in 2025 tables. A season's tables can be
/// swapped by loading a TOML file instead of changing code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringTables {
    pub players: PlayerTables,
    pub roster: RosterTables,
}

/// Scalar fields come before the maps so the struct serializes to valid TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTables {
    pub default_base_points: f64,
    pub default_peak_age: u32,

    /// Projection lost per year away from the peak age
    pub age_curve_step: f64,
    /// Lowest age multiplier, however far from the peak
    pub age_curve_floor: f64,

    /// Projection multiplier for a player with any injury status
    pub injury_multiplier: f64,

    pub default_consistency: f64,
    pub experience_bonus_per_year: f64,
    pub experience_bonus_cap: f64,

    /// Age used when neither `age` nor `birth_date` is known
    pub default_age: u32,
    /// Rank assigned to players without a search rank
    pub unranked: u32,
    /// Projected points that count as full production in the value score
    pub production_scale: f64,
    pub season_games: u32,

    pub strength_of_schedule: f64,
    pub recent_performance: Vec<f64>,

    /// Season projection baseline per position
    pub base_points: HashMap<String, f64>,

    /// Age at which each position is assumed to produce the most
    pub peak_ages: HashMap<String, u32>,

    /// Consistency score before the experience bonus
    pub consistency_base: HashMap<String, f64>,

    /// Team abbreviation to bye week
    pub bye_weeks: HashMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterTables {
    /// Roster slots each position should fill; also the "depth" weakness
    /// thresholds
    pub required_depth: BTreeMap<String, u32>,

    /// Suggested trade targets per weakness tag
    pub trade_targets: BTreeMap<String, Vec<String>>,
}

fn table<V: Copy>(entries: &[(&str, V)]) -> HashMap<String, V> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Default for PlayerTables {
    fn default() -> Self {
        Self {
            base_points: table(&[
                ("QB", 280.0),
                ("RB", 180.0),
                ("WR", 160.0),
                ("TE", 120.0),
                ("K", 100.0),
                ("DEF", 90.0),
            ]),
            default_base_points: 100.0,
            peak_ages: table(&[("QB", 28), ("RB", 26), ("WR", 27), ("TE", 28), ("K", 30), ("DEF", 25)]),
            default_peak_age: 27,
            age_curve_step: 0.03,
            age_curve_floor: 0.7,
            injury_multiplier: 0.8,
            consistency_base: table(&[
                ("QB", 0.85),
                ("RB", 0.65),
                ("WR", 0.70),
                ("TE", 0.75),
                ("K", 0.60),
                ("DEF", 0.55),
            ]),
            default_consistency: 0.65,
            experience_bonus_per_year: 0.02,
            experience_bonus_cap: 0.15,
            bye_weeks: table(&[
                ("DET", 5), ("LAC", 5), ("PHI", 5), ("TEN", 5),
                ("MIA", 6), ("KC", 6), ("LAR", 6), ("MIN", 6),
                ("CHI", 7), ("DAL", 7),
                ("SF", 9), ("PIT", 9),
                ("LV", 10), ("SEA", 10), ("CLE", 10), ("GB", 10),
                ("CAR", 11), ("NYG", 11), ("ARI", 11), ("TB", 11),
                ("ATL", 12), ("BUF", 12), ("CIN", 12), ("JAX", 12), ("NO", 12), ("NYJ", 12),
                ("HOU", 14), ("IND", 14), ("NE", 14), ("WAS", 14), ("BAL", 14), ("DEN", 14),
            ]),
            default_age: 25,
            unranked: 999,
            production_scale: 300.0,
            season_games: 17,
            strength_of_schedule: 0.5,
            recent_performance: vec![15.2, 8.7, 22.1, 12.4, 18.9],
        }
    }
}

impl Default for RosterTables {
    fn default() -> Self {
        let required_depth = [("QB", 2), ("RB", 4), ("WR", 5), ("TE", 2), ("K", 1), ("DEF", 1)]
            .into_iter()
            .map(|(pos, n)| (pos.to_string(), n))
            .collect();

        let trade_targets = [
            ("RB depth", ["Mid-tier RB2", "Handcuff RBs"]),
            ("WR depth", ["WR2/3 with upside", "Target share risers"]),
            ("TE depth", ["Streaming TE options", "TE with red zone usage"]),
            ("QB depth", ["Streaming QB options", "QB with rushing upside"]),
        ]
        .into_iter()
        .map(|(tag, targets)| (tag.to_string(), targets.iter().map(|t| t.to_string()).collect()))
        .collect();

        Self { required_depth, trade_targets }
    }
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self { players: PlayerTables::default(), roster: RosterTables::default() }
    }
}

impl ScoringTables {
    /// Load tables from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tables: ScoringTables = toml::from_str(&content)?;
        Ok(tables)
    }

    /// Save tables to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Tables from `SCORING_TABLES_PATH` if set, otherwise the defaults
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var("SCORING_TABLES_PATH") {
            Ok(path) => Self::load_from_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load scoring tables from {path}: {e}")),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl PlayerTables {
    pub fn base_points_for(&self, position: &str) -> f64 {
        self.base_points.get(position).copied().unwrap_or(self.default_base_points)
    }

    pub fn peak_age_for(&self, position: &str) -> u32 {
        self.peak_ages.get(position).copied().unwrap_or(self.default_peak_age)
    }

    pub fn consistency_base_for(&self, position: &str) -> f64 {
        self.consistency_base.get(position).copied().unwrap_or(self.default_consistency)
    }

    /// Bye week for a team, 0 when the team is not listed
    pub fn bye_week_for(&self, team: &str) -> u32 {
        self.bye_weeks.get(team).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_position_uses_defaults() {
        let tables = PlayerTables::default();
        assert_eq!(tables.base_points_for("LB"), 100.0);
        assert_eq!(tables.peak_age_for("LB"), 27);
        assert_eq!(tables.consistency_base_for("LB"), 0.65);
        assert_eq!(tables.bye_week_for("FA"), 0);
    }

    #[test]
    fn test_bye_weeks() {
        let tables = PlayerTables::default();
        assert_eq!(tables.bye_week_for("DET"), 5);
        assert_eq!(tables.bye_week_for("KC"), 6);
        assert_eq!(tables.bye_week_for("DEN"), 14);
        assert_eq!(tables.bye_weeks.len(), 32);
    }

    #[test]
    fn test_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.toml");

        let mut tables = ScoringTables::default();
        tables.players.bye_weeks.insert("KC".to_string(), 10);
        tables.save_to_file(&path).unwrap();

        let loaded = ScoringTables::load_from_file(&path).unwrap();
        assert_eq!(loaded.players.bye_week_for("KC"), 10);
        assert_eq!(loaded.roster.required_depth.get("WR"), Some(&5));
        assert_eq!(loaded.roster.trade_targets["QB depth"].len(), 2);
    }
}
