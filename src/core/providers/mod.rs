pub mod digitalocean;
pub mod fetch;

pub use fetch::FetchError;
