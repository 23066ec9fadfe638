//! Axum extractors for request handling

mod caller;
mod params;

pub use caller::Caller;
pub use params::Params;
