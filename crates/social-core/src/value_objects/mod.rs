//! Value objects - immutable domain primitives

mod feed_filter;
mod geo_point;
mod id;

pub use feed_filter::{FeedFilter, DEFAULT_FEED_DISTANCE_KM};
pub use geo_point::{GeoPoint, GeoPointParseError};
pub use id::{Id, IdParseError};
