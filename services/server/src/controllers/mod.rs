pub mod bet_controller;
pub mod dashboard_controller;
