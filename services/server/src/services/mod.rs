pub mod dashboard_feed;
pub mod stats;
