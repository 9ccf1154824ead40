use crate::team_stats::TeamStats;

/// Probability shift per year of roster-experience differential.
const SHIFT_PER_YEAR: f64 = 0.01;
/// Hard cap on how far experience can move a win probability.
const MAX_SHIFT: f64 = 0.05;

const PROB_FLOOR: f64 = 0.01;
const PROB_CEIL: f64 = 0.99;

/// Veteran rosters close out tight games more often than the efficiency
/// numbers alone suggest. The shift scales with how close the game already is,
/// so a blowout probability barely moves while a coin-flip gets the full
/// experience edge. The returned pair still sums to 1 and stays inside (0, 1).
pub fn apply_experience_bonus(
    team_a: &TeamStats,
    team_b: &TeamStats,
    win_prob_a: f64,
    win_prob_b: f64,
) -> (f64, f64) {
    debug_assert!((win_prob_a + win_prob_b - 1.0).abs() < 1e-9);

    let closeness = 1.0 - 2.0 * (win_prob_a - 0.5).abs();
    let shift = (SHIFT_PER_YEAR * (team_a.experience - team_b.experience) * closeness)
        .clamp(-MAX_SHIFT, MAX_SHIFT);

    let adjusted_a = (win_prob_a + shift).clamp(PROB_FLOOR, PROB_CEIL);
    (adjusted_a, 1.0 - adjusted_a)
}
