pub mod auth;
pub mod config;
pub mod formatter;
pub mod models;
pub mod paths;
pub mod providers;
pub mod report;
pub mod store;
pub mod summary;
