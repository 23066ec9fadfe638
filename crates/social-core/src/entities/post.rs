//! Post entity - content published into a group

use chrono::{DateTime, Utc};

use crate::value_objects::{GeoPoint, Id};

/// A post inside a group
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Id,
    pub group_id: Id,
    pub author_id: Id,
    pub title: String,
    pub content: String,
    pub location: String,
    pub category: String,
    pub liked_by: Vec<Id>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Coordinates, if the location text is a `"lat,lng"` pair
    pub fn geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::parse(&self.location).ok()
    }

    #[inline]
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    #[inline]
    pub fn is_liked_by(&self, user_id: Id) -> bool {
        self.liked_by.contains(&user_id)
    }

    #[inline]
    pub fn is_author(&self, user_id: Id) -> bool {
        self.author_id == user_id
    }

    /// Replace title and body
    pub fn edit(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(location: &str) -> Post {
        let now = Utc::now();
        Post {
            id: Id::new(1),
            group_id: Id::new(2),
            author_id: Id::new(3),
            title: "t".to_string(),
            content: "c".to_string(),
            location: location.to_string(),
            category: "misc".to_string(),
            liked_by: vec![Id::new(4), Id::new(5)],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_geo_point() {
        assert!(post("10.0,20.0").geo_point().is_some());
        assert!(post("Berlin").geo_point().is_none());
    }

    #[test]
    fn test_likes_and_author() {
        let p = post("");
        assert_eq!(p.like_count(), 2);
        assert!(p.is_liked_by(Id::new(4)));
        assert!(!p.is_liked_by(Id::new(3)));
        assert!(p.is_author(Id::new(3)));
    }
}
