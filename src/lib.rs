pub mod chart;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod roles;
pub mod session;
pub mod store;
