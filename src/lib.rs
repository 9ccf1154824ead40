pub mod error;
pub mod experience;
pub mod home_court;
pub mod http_cache;
pub mod http_client;
pub mod predictor;
pub mod stats_fetch;
pub mod team_stats;
pub mod upset;
