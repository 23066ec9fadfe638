//! Feed filter - which posts a feed request selects

use crate::value_objects::{GeoPoint, Id};

/// Default search radius for location feeds, in kilometres
pub const DEFAULT_FEED_DISTANCE_KM: f64 = 10.0;

/// Selection criteria for `load_feed`
///
/// Every variant carries the viewer, used to decide which private groups'
/// posts are visible. A viewer of `None` sees public groups only.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedFilter {
    /// Newest posts first
    Time { viewer: Option<Id> },
    /// Posts within `distance_km` of `origin`
    Location {
        viewer: Option<Id>,
        origin: GeoPoint,
        distance_km: f64,
    },
    /// Posts tagged with a category
    Category { viewer: Option<Id>, category: String },
    /// Posts written by the named user
    User { viewer: Option<Id>, username: String },
    /// Posts in one group
    Group { viewer: Option<Id>, group_id: Id },
}

impl FeedFilter {
    /// The user the feed is being built for
    pub fn viewer(&self) -> Option<Id> {
        match self {
            Self::Time { viewer }
            | Self::Location { viewer, .. }
            | Self::Category { viewer, .. }
            | Self::User { viewer, .. }
            | Self::Group { viewer, .. } => *viewer,
        }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Time { .. } => "Time",
            Self::Location { .. } => "Location",
            Self::Category { .. } => "Category",
            Self::User { .. } => "User",
            Self::Group { .. } => "Group",
        }
    }
}
