use crate::predictor::Location;
use crate::team_stats::TeamStats;

/// What hosting is worth, in points per 100 possessions, split evenly between
/// the offensive and defensive ends.
const HOME_EDGE_PER_100: f64 = 3.5;

/// Shifts the hosting side's efficiencies before any margin computation.
/// Neutral sites are untouched. Operates on the per-request copies, so the
/// shared table never sees the adjustment.
pub fn apply_home_court(team_a: &mut TeamStats, team_b: &mut TeamStats, location: Location) {
    let half = HOME_EDGE_PER_100 / 2.0;
    match location {
        Location::Home => {
            team_a.adj_o += half;
            team_a.adj_d -= half;
        }
        Location::Away => {
            team_b.adj_o += half;
            team_b.adj_d -= half;
        }
        Location::Neutral => {}
    }
}
