pub mod config;
pub mod credentials;
pub mod league;
pub mod output;
pub mod scoring;
pub mod store;
