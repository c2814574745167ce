//! Business logic services

pub mod duty_log;
pub mod geo;
pub mod geocoding;
pub mod hos_scheduler;
pub mod log_graph;
pub mod openroute;
pub mod routing;
pub mod trip_planner;
