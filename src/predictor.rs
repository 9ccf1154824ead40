use std::collections::HashMap;

use crate::error::PredictError;
use crate::experience::apply_experience_bonus;
use crate::home_court::apply_home_court;
use crate::team_stats::TeamStats;
use crate::upset::adjust_for_upset_trends;

const BASE_SCALE: f64 = 5.8;
const VOLATILITY_WEIGHT: f64 = 0.5;
/// Reference three-point rate (percent) and tempo at which volatility is zero.
const THREE_PCT_BASELINE: f64 = 30.0;
const TEMPO_BASELINE: f64 = 70.0;

const PROB_FLOOR: f64 = 0.01;
const PROB_CEIL: f64 = 0.99;

/// Venue, relative to team A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Home,
    Away,
    Neutral,
}

impl Location {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("home") {
            Some(Self::Home)
        } else if raw.eq_ignore_ascii_case("away") {
            Some(Self::Away)
        } else if raw.eq_ignore_ascii_case("neutral") {
            Some(Self::Neutral)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Away => "Away",
            Self::Neutral => "Neutral",
        }
    }
}

/// Tournament round. `Regular` means no upset adjustment runs at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    Regular,
    Round1,
    Round2,
    Sweet16,
    Elite8,
    Final4,
    Championship,
}

impl Round {
    pub const ALL: [Round; 7] = [
        Self::Regular,
        Self::Round1,
        Self::Round2,
        Self::Sweet16,
        Self::Elite8,
        Self::Final4,
        Self::Championship,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|round| raw.eq_ignore_ascii_case(round.label()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Round1 => "Round1",
            Self::Round2 => "Round2",
            Self::Sweet16 => "Sweet16",
            Self::Elite8 => "Elite8",
            Self::Final4 => "Final4",
            Self::Championship => "Championship",
        }
    }
}

/// Tunable coefficients for the extra matchup factors plus the empirical
/// calibration scalar. Passed in explicitly so tests can inject alternate
/// tunings without touching shared state.
#[derive(Debug, Clone, Copy)]
pub struct MarginWeights {
    /// Points per inch of average-height difference.
    pub height: f64,
    /// Weight on offensive 3P% against the opponent's 3P defense.
    pub three_p: f64,
    /// Weight on offensive rebounding against the opponent's defensive glass.
    pub orb: f64,
    /// Weight on the turnover differential.
    pub to: f64,
    /// Weight on interior scoring against the opponent's interior defense.
    pub two_p: f64,
    /// Multiplier on the road penalty, applied only when team A travels.
    pub road: f64,
    /// Scales the raw margin to historically realistic point margins.
    pub calibration: f64,
}

impl Default for MarginWeights {
    fn default() -> Self {
        Self {
            height: 0.1,
            three_p: 5.0,
            orb: 3.0,
            to: 2.7,
            two_p: 4.0,
            road: 2.0,
            calibration: 0.88,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupResult {
    pub winner: String,
    /// Winning side's probability, in [0.5, 0.99].
    pub winner_prob: f64,
    pub win_prob_a: f64,
    pub win_prob_b: f64,
    /// Predicted point differential, team A minus team B.
    pub spread: f64,
}

/// Runs the full prediction pipeline for one matchup:
/// home-court -> margin -> spread -> volatility logistic -> experience ->
/// (round gate) upset trends -> winner.
///
/// The stats table is read-only; both records are copied before any
/// adjustment, so repeated calls are idempotent.
pub fn predict_matchup(
    team_a: &str,
    team_b: &str,
    teams: &HashMap<String, TeamStats>,
    location: Location,
    round: Round,
    weights: &MarginWeights,
) -> Result<MatchupResult, PredictError> {
    let a = teams
        .get(team_a)
        .ok_or_else(|| PredictError::UnknownTeam(team_a.to_string()))?;
    let b = teams
        .get(team_b)
        .ok_or_else(|| PredictError::UnknownTeam(team_b.to_string()))?;

    let mut a = a.clone();
    let mut b = b.clone();
    apply_home_court(&mut a, &mut b, location);

    let spread = point_spread(&a, &b, location, weights);
    let (mut win_prob_a, mut win_prob_b) = spread_to_probs(spread, &a, &b);

    (win_prob_a, win_prob_b) = apply_experience_bonus(&a, &b, win_prob_a, win_prob_b);
    if round != Round::Regular {
        (win_prob_a, win_prob_b) = adjust_for_upset_trends(&a, &b, win_prob_a, win_prob_b, round);
    }

    let (winner, winner_prob) = if win_prob_a >= win_prob_b {
        (a.name.clone(), win_prob_a)
    } else {
        (b.name.clone(), win_prob_b)
    };

    Ok(MatchupResult {
        winner,
        winner_prob,
        win_prob_a,
        win_prob_b,
        spread,
    })
}

/// Expected point spread for the matchup, positive favoring team A. Inputs are
/// post-home-court copies; the margin is computed per 100 possessions and then
/// rescaled to the expected possession count of this specific pairing.
fn point_spread(a: &TeamStats, b: &TeamStats, location: Location, w: &MarginWeights) -> f64 {
    let base_margin = a.adj_em() - b.adj_em();

    let height_diff = a.height - b.height;
    let three_diff = a.three_off - b.three_def;
    let orb_diff = a.orb_off - b.orb_def;
    // B minus A: the turnover edge belongs to A when B coughs it up more.
    let to_diff = b.to_off - a.to_off;
    let two_diff = a.post_off - b.post_def;
    let road_adj = if location == Location::Away {
        a.road_adj
    } else {
        0.0
    };

    let extra_margin = w.height * height_diff
        + w.three_p * three_diff
        + w.orb * orb_diff
        + w.to * to_diff
        + w.two_p * two_diff
        - w.road * road_adj;

    let calibrated = (base_margin + extra_margin) * w.calibration;
    calibrated * (avg_tempo(a, b) / 100.0)
}

/// Logistic scale for the spread-to-probability conversion. Three-point-heavy,
/// fast-paced matchups are noisier, so the curve widens with volatility; it
/// never narrows below the base scale.
pub fn volatility_scale(avg_three_pct: f64, avg_tempo: f64) -> f64 {
    let volatility =
        (avg_three_pct / THREE_PCT_BASELINE) * (avg_tempo / TEMPO_BASELINE) - 1.0;
    (BASE_SCALE * (1.0 + VOLATILITY_WEIGHT * volatility)).max(BASE_SCALE)
}

fn spread_to_probs(spread: f64, a: &TeamStats, b: &TeamStats) -> (f64, f64) {
    let avg_three = (a.three_off + b.three_off) / 2.0;
    let scale = volatility_scale(avg_three, avg_tempo(a, b));
    let win_prob_a = (1.0 / (1.0 + (-spread / scale).exp())).clamp(PROB_FLOOR, PROB_CEIL);
    (win_prob_a, 1.0 - win_prob_a)
}

fn avg_tempo(a: &TeamStats, b: &TeamStats) -> f64 {
    (a.adj_tempo + b.adj_tempo) / 2.0
}
