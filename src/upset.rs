use crate::predictor::Round;
use crate::team_stats::TeamStats;

/// Largest seed gap a bracket can produce (1 vs 16).
const MAX_SEED_GAP: f64 = 15.0;

/// Share of the favorite's edge historically given back per round. Early
/// rounds see the most chaos, the title game the least.
fn round_upset_rate(round: Round) -> f64 {
    match round {
        Round::Regular => 0.0,
        Round::Round1 => 0.12,
        Round::Round2 => 0.09,
        Round::Sweet16 => 0.07,
        Round::Elite8 => 0.05,
        Round::Final4 => 0.04,
        Round::Championship => 0.03,
    }
}

/// Tournament upset correction: moves probability from the better-seeded
/// favorite toward the underdog, proportional to the seed gap and the round's
/// historical upset rate. Pure function of its inputs; the pair keeps summing
/// to 1 and never leaves (0, 1).
///
/// Skipped when either team is unseeded, when the seeds tie, or when the model
/// already likes the worse seed (history has nothing extra to say then).
pub fn adjust_for_upset_trends(
    team_a: &TeamStats,
    team_b: &TeamStats,
    win_prob_a: f64,
    win_prob_b: f64,
    round: Round,
) -> (f64, f64) {
    let rate = round_upset_rate(round);
    if rate == 0.0 || team_a.seed == 0 || team_b.seed == 0 || team_a.seed == team_b.seed {
        return (win_prob_a, win_prob_b);
    }

    let a_is_favorite = team_a.seed < team_b.seed;
    let favorite_prob = if a_is_favorite { win_prob_a } else { win_prob_b };
    if favorite_prob <= 0.5 {
        return (win_prob_a, win_prob_b);
    }

    let gap_weight = (team_a.seed.abs_diff(team_b.seed) as f64 / MAX_SEED_GAP).min(1.0);
    let shifted = favorite_prob - rate * gap_weight * (favorite_prob - 0.5);

    if a_is_favorite {
        (shifted, 1.0 - shifted)
    } else {
        (1.0 - shifted, shifted)
    }
}
