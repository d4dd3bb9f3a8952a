pub mod apr;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pool_view;
pub mod provider;
pub mod service;
pub mod time;
