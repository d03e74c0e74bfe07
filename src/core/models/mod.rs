pub mod billing;
pub mod cost;
