pub mod bet_types;
pub mod dashboard_types;
