//! Feed categories and request descriptions

use serde::{Deserialize, Serialize};

/// Closed set of feed categories.
///
/// Each category maps to a query-parameter template in the search crate;
/// adding one is a data-table edit there, not new branching logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Broadly popular content (the unauthenticated default)
    Trending,

    /// Comedy clips
    Funny,

    /// Music clips
    Music,

    /// Gaming clips
    Gaming,

    /// Cooking and food clips
    Food,

    /// Content personalized to the signed-in account
    Personalized,

    /// Free-text search; the query string lives on the `FeedRequest`
    Search,
}

impl Category {
    /// Categories eligible for rotating background refills.
    ///
    /// `Personalized` needs a session and `Search` needs a query string, so
    /// neither belongs in the rotation.
    pub const ROTATION: [Category; 5] = [
        Category::Trending,
        Category::Funny,
        Category::Music,
        Category::Gaming,
        Category::Food,
    ];
}

/// A stateless description of one content query.
///
/// Constructed on demand by the feed controller and executed by the search
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRequest {
    /// Which category template to query with
    pub category: Category,

    /// Free-text query, only meaningful for `Category::Search`
    pub query: Option<String>,
}

impl FeedRequest {
    /// Request for a plain category
    pub fn category(category: Category) -> Self {
        Self {
            category,
            query: None,
        }
    }

    /// Request for a free-text search
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            category: Category::Search,
            query: Some(query.into()),
        }
    }
}
