//! Service layer for the extraction toolkit.
//!
//! This module contains the business logic for:
//! - Block mapping (`BlockMapper`)
//! - GenerateBlocks element resolution (`ElementResolver`)
//! - CSS rule extraction (`CssExtractor`)
//! - WordPress REST access (`WordPressClient`)

pub mod blocks;
pub mod css;
pub mod elements;
pub mod wordpress;

pub use blocks::BlockMapper;
pub use css::CssExtractor;
pub use elements::{ElementResolver, ElementSource, ResolveOutcome, ResolvedElements};
pub use wordpress::WordPressClient;
