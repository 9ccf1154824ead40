use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

/// One team's normalized stat record. Every field carries a defined value after
/// normalization (missing source columns are replaced by fixed baselines), so
/// downstream consumers never null-check.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStats {
    pub name: String,
    /// Adjusted offensive efficiency, points scored per 100 possessions.
    pub adj_o: f64,
    /// Adjusted defensive efficiency, points allowed per 100 possessions.
    pub adj_d: f64,
    /// Adjusted pace, possessions per 40 minutes.
    pub adj_tempo: f64,
    pub efg_off: f64,
    pub to_off: f64,
    pub orb_off: f64,
    pub orb_def: f64,
    pub ftr_off: f64,
    pub ftr_def: f64,
    pub three_off: f64,
    pub three_def: f64,
    /// Interior (two-point) scoring percentages; the provider files these under
    /// its 2P%/post-play columns.
    pub post_off: f64,
    pub post_def: f64,
    /// Average roster height in inches.
    pub height: f64,
    /// Average roster experience in years.
    pub experience: f64,
    /// Point penalty when playing on the road.
    pub road_adj: f64,
    /// Tournament seed, 0 when unseeded.
    pub seed: u32,
}

struct FieldSpec {
    name: &'static str,
    /// Source columns tried in priority order; the first numeric, non-missing
    /// value wins.
    sources: &'static [&'static str],
    fallback: f64,
}

const ADJ_O: FieldSpec = FieldSpec {
    name: "AdjO",
    sources: &["AdjO", "AdjOE"],
    fallback: 115.0,
};
const ADJ_D: FieldSpec = FieldSpec {
    name: "AdjD",
    sources: &["AdjD", "AdjDE"],
    fallback: 95.0,
};
const ADJ_TEMPO: FieldSpec = FieldSpec {
    name: "AdjTempo",
    sources: &["AdjTempo", "AdjT"],
    fallback: 70.0,
};
const EFG_OFF: FieldSpec = FieldSpec {
    name: "eFG_off",
    sources: &["Off-eFG%_ff", "Off-eFG%_eff", "Off_eFG%"],
    fallback: 50.0,
};
const TO_OFF: FieldSpec = FieldSpec {
    name: "TO_off",
    sources: &["Off-TO%_ff", "Off-TO%_eff", "Off_TO%"],
    fallback: 15.0,
};
const ORB_OFF: FieldSpec = FieldSpec {
    name: "ORB_off",
    sources: &["Off-OR%_ff", "ORB"],
    fallback: 30.0,
};
const ORB_DEF: FieldSpec = FieldSpec {
    name: "ORB_def",
    sources: &["Def-OR%_ff", "ORB_def"],
    fallback: 30.0,
};
const FTR_OFF: FieldSpec = FieldSpec {
    name: "FTR_off",
    sources: &["Off-FTRate_eff", "Off-FTRate"],
    fallback: 0.0,
};
const FTR_DEF: FieldSpec = FieldSpec {
    name: "FTR_def",
    sources: &["Def-FTRate_eff", "Def-FTRate"],
    fallback: 0.0,
};
const THREE_OFF: FieldSpec = FieldSpec {
    name: "3P_off",
    sources: &["3P_off_dist", "Off_3P%", "3P_off"],
    fallback: 30.0,
};
const THREE_DEF: FieldSpec = FieldSpec {
    name: "3P_def",
    sources: &["3P_def_dist", "Def_3P%", "3P_def"],
    fallback: 30.0,
};
const POST_OFF: FieldSpec = FieldSpec {
    name: "PostOff",
    sources: &["PostOff_dist", "Off_2P%", "PostOff"],
    fallback: 50.0,
};
const POST_DEF: FieldSpec = FieldSpec {
    name: "PostDef",
    sources: &["PostDef_dist", "Def_2P%", "PostDef"],
    fallback: 50.0,
};
const HEIGHT: FieldSpec = FieldSpec {
    name: "Height",
    sources: &["Height", "AvgHeight"],
    fallback: 75.0,
};
const EXPERIENCE: FieldSpec = FieldSpec {
    name: "Experience",
    sources: &["Experience"],
    fallback: 2.0,
};
const ROAD_ADJ: FieldSpec = FieldSpec {
    name: "RoadAdj",
    sources: &["RoadAdj", "RoadAdj_eff"],
    fallback: 0.0,
};
const SEED: FieldSpec = FieldSpec {
    name: "Seed",
    sources: &["Seed", "Seed_eff", "Seed_ff"],
    fallback: 0.0,
};

impl TeamStats {
    /// Adjusted efficiency margin, the base quality signal.
    pub fn adj_em(&self) -> f64 {
        self.adj_o - self.adj_d
    }

    /// A record with every field at its fallback baseline.
    pub fn baseline(name: &str) -> Self {
        Self {
            name: name.to_string(),
            adj_o: ADJ_O.fallback,
            adj_d: ADJ_D.fallback,
            adj_tempo: ADJ_TEMPO.fallback,
            efg_off: EFG_OFF.fallback,
            to_off: TO_OFF.fallback,
            orb_off: ORB_OFF.fallback,
            orb_def: ORB_DEF.fallback,
            ftr_off: FTR_OFF.fallback,
            ftr_def: FTR_DEF.fallback,
            three_off: THREE_OFF.fallback,
            three_def: THREE_DEF.fallback,
            post_off: POST_OFF.fallback,
            post_def: POST_DEF.fallback,
            height: HEIGHT.fallback,
            experience: EXPERIENCE.fallback,
            road_adj: ROAD_ADJ.fallback,
            seed: 0,
        }
    }

    /// Builds a record from a merged provider row (column name -> raw value).
    pub fn from_merged_row(name: &str, row: &HashMap<String, Value>) -> Self {
        Self {
            name: name.to_string(),
            adj_o: resolve(row, name, &ADJ_O),
            adj_d: resolve(row, name, &ADJ_D),
            adj_tempo: resolve(row, name, &ADJ_TEMPO),
            efg_off: resolve(row, name, &EFG_OFF),
            to_off: resolve(row, name, &TO_OFF),
            orb_off: resolve(row, name, &ORB_OFF),
            orb_def: resolve(row, name, &ORB_DEF),
            ftr_off: resolve(row, name, &FTR_OFF),
            ftr_def: resolve(row, name, &FTR_DEF),
            three_off: resolve(row, name, &THREE_OFF),
            three_def: resolve(row, name, &THREE_DEF),
            post_off: resolve(row, name, &POST_OFF),
            post_def: resolve(row, name, &POST_DEF),
            height: resolve(row, name, &HEIGHT),
            experience: resolve(row, name, &EXPERIENCE),
            road_adj: resolve(row, name, &ROAD_ADJ),
            seed: resolve_seed(row, name),
        }
    }
}

fn resolve(row: &HashMap<String, Value>, team: &str, spec: &FieldSpec) -> f64 {
    for source in spec.sources {
        if let Some(value) = row.get(*source).and_then(numeric_value) {
            return value;
        }
    }
    warn!(
        team,
        field = spec.name,
        fallback = spec.fallback,
        "stat missing, using baseline"
    );
    spec.fallback
}

fn resolve_seed(row: &HashMap<String, Value>, team: &str) -> u32 {
    for source in SEED.sources {
        if let Some(raw) = row.get(*source).and_then(numeric_value) {
            return if raw.is_finite() && raw > 0.0 {
                raw.trunc() as u32
            } else {
                0
            };
        }
    }
    // Unseeded is the norm outside March; the sentinel is not a data gap, so
    // this stays quieter than the stat fallbacks.
    debug!(team, field = SEED.name, "no seed column, treating as unseeded");
    0
}

/// Accepts JSON numbers as well as numeric strings (the provider renders some
/// cells as "34.5" or "58%").
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s == "-" {
                return None;
            }
            s.trim_end_matches('%').replace(',', "").parse::<f64>().ok()
        }
        _ => None,
    }
}
