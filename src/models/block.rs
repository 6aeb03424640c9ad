// src/models/block.rs

//! Content block data structures.
//!
//! A post is stored as an ordered list of [`ContentBlock`] rows. Each row
//! carries its payload as JSON text; [`BlockContent`] is the typed view of
//! that payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Kind of a content block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Heading,
    Paragraph,
    Image,
    Figure,
    Quote,
    List,
    Table,
    Divider,
    Container,
    Columns,
    Cta,
    CtaGroup,
    Section,
}

/// Horizontal alignment derived from WordPress class tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeadingContent {
    pub level: u8,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphContent {
    /// Inner HTML, formatting preserved
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

/// Payload shared by `image` and `figure` blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub url: String,
    pub alt: String,
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// WordPress size keyword (`large`, `full`, `medium`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteContent {
    /// Inner HTML with any `<cite>` removed
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListContent {
    pub ordered: bool,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableContent {
    pub caption: String,
    pub has_header: bool,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DividerContent {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerContent {
    pub element_id: String,
    /// Resolved element configuration, `{}` when nothing resolved
    pub style: Map<String, Value>,
    /// CSS declarations derived from `style`
    pub css: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsContent {
    pub count: usize,
    pub html: String,
}

/// A single call-to-action button.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CtaContent {
    pub text: String,
    pub url: String,
    /// Style variant (`primary`, `secondary`, `outline`)
    pub variant: String,
    pub external: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CtaGroupContent {
    pub buttons: Vec<CtaContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionContent {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub html: String,
}

/// Typed payload of a content block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Heading(HeadingContent),
    Paragraph(ParagraphContent),
    Image(ImageContent),
    Figure(ImageContent),
    Quote(QuoteContent),
    List(ListContent),
    Table(TableContent),
    Divider(DividerContent),
    Container(ContainerContent),
    Columns(ColumnsContent),
    Cta(CtaContent),
    CtaGroup(CtaGroupContent),
    Section(SectionContent),
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Heading(_) => BlockType::Heading,
            BlockContent::Paragraph(_) => BlockType::Paragraph,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Figure(_) => BlockType::Figure,
            BlockContent::Quote(_) => BlockType::Quote,
            BlockContent::List(_) => BlockType::List,
            BlockContent::Table(_) => BlockType::Table,
            BlockContent::Divider(_) => BlockType::Divider,
            BlockContent::Container(_) => BlockType::Container,
            BlockContent::Columns(_) => BlockType::Columns,
            BlockContent::Cta(_) => BlockType::Cta,
            BlockContent::CtaGroup(_) => BlockType::CtaGroup,
            BlockContent::Section(_) => BlockType::Section,
        }
    }

    /// Serialize the payload alone (without its kind) to JSON text.
    pub fn to_json(&self) -> Result<String> {
        let text = match self {
            BlockContent::Heading(c) => serde_json::to_string(c)?,
            BlockContent::Paragraph(c) => serde_json::to_string(c)?,
            BlockContent::Image(c) | BlockContent::Figure(c) => serde_json::to_string(c)?,
            BlockContent::Quote(c) => serde_json::to_string(c)?,
            BlockContent::List(c) => serde_json::to_string(c)?,
            BlockContent::Table(c) => serde_json::to_string(c)?,
            BlockContent::Divider(c) => serde_json::to_string(c)?,
            BlockContent::Container(c) => serde_json::to_string(c)?,
            BlockContent::Columns(c) => serde_json::to_string(c)?,
            BlockContent::Cta(c) => serde_json::to_string(c)?,
            BlockContent::CtaGroup(c) => serde_json::to_string(c)?,
            BlockContent::Section(c) => serde_json::to_string(c)?,
        };
        Ok(text)
    }

    /// Parse payload JSON text for a known block kind.
    pub fn from_json(block_type: BlockType, text: &str) -> Result<Self> {
        let content = match block_type {
            BlockType::Heading => BlockContent::Heading(serde_json::from_str(text)?),
            BlockType::Paragraph => BlockContent::Paragraph(serde_json::from_str(text)?),
            BlockType::Image => BlockContent::Image(serde_json::from_str(text)?),
            BlockType::Figure => BlockContent::Figure(serde_json::from_str(text)?),
            BlockType::Quote => BlockContent::Quote(serde_json::from_str(text)?),
            BlockType::List => BlockContent::List(serde_json::from_str(text)?),
            BlockType::Table => BlockContent::Table(serde_json::from_str(text)?),
            BlockType::Divider => BlockContent::Divider(serde_json::from_str(text)?),
            BlockType::Container => BlockContent::Container(serde_json::from_str(text)?),
            BlockType::Columns => BlockContent::Columns(serde_json::from_str(text)?),
            BlockType::Cta => BlockContent::Cta(serde_json::from_str(text)?),
            BlockType::CtaGroup => BlockContent::CtaGroup(serde_json::from_str(text)?),
            BlockType::Section => BlockContent::Section(serde_json::from_str(text)?),
        };
        Ok(content)
    }
}

/// A classified fragment together with its position in the post.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedBlock {
    pub order: u32,
    pub content: BlockContent,
}

/// One stored block of a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentBlock {
    /// Stable id derived from post id and position
    pub id: String,

    pub post_id: u64,

    pub block_type: BlockType,

    /// 0-based position within the post; gaps mark skipped fragments
    pub block_order: u32,

    /// Payload as JSON text
    pub content: String,

    pub created_at: DateTime<Utc>,
}

impl ContentBlock {
    /// Build a stored block from a mapped one.
    pub fn from_mapped(post_id: u64, mapped: &MappedBlock, created_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: Self::block_id(post_id, mapped.order),
            post_id,
            block_type: mapped.content.block_type(),
            block_order: mapped.order,
            content: mapped.content.to_json()?,
            created_at,
        })
    }

    /// Typed view of the stored payload.
    pub fn payload(&self) -> Result<BlockContent> {
        BlockContent::from_json(self.block_type, &self.content)
    }

    fn block_id(post_id: u64, order: u32) -> String {
        let digest = Sha256::digest(format!("{post_id}:{order}").as_bytes());
        hex::encode(&digest[..8])
    }
}
