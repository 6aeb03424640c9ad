//! WordPress post as returned by `/wp-json/wp/v2/posts`.

use serde::{Deserialize, Serialize};

/// A `{ "rendered": "..." }` wrapper used by the REST API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RenderedField {
    #[serde(default)]
    pub rendered: String,
}

/// The subset of a post this toolkit reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: u64,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub link: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub title: RenderedField,

    #[serde(default)]
    pub content: RenderedField,

    #[serde(default)]
    pub categories: Vec<u64>,
}
