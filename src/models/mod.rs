// src/models/mod.rs

//! Domain models for the extraction toolkit.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod block;
mod config;
mod element;
mod post;
mod styles;

// Re-export all public types
pub use block::{
    Alignment, BlockContent, BlockType, ColumnsContent, ContainerContent, ContentBlock,
    CtaContent, CtaGroupContent, DividerContent, HeadingContent, ImageContent, ListContent,
    MappedBlock, ParagraphContent, QuoteContent, SectionContent, TableContent,
};
pub use config::{Config, FetchConfig, MappingConfig, OutputConfig, WordPressConfig};
pub use element::{GenerateBlocksConfig, derive_css};
pub use post::{Post, RenderedField};
pub use styles::{ExtractedElementStyles, PageCssData, StyleRegistry};
