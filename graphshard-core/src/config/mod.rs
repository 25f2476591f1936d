pub mod aggregation_config;
pub mod app_config;
pub mod log_config;
