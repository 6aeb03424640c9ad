// src/services/blocks.rs

//! Element-to-block mapping.
//!
//! Splits rendered post HTML into block-level fragments and classifies each
//! one into a [`BlockContent`] using tag names and class markers from
//! [`MappingConfig`]. Plain wrapper `div`s (groups, inner containers) are
//! not blocks themselves; their block-level children are mapped instead.

use std::collections::HashSet;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Map;

use crate::error::Result;
use crate::models::{
    BlockContent, ColumnsContent, ContainerContent, CtaContent, CtaGroupContent, DividerContent,
    HeadingContent, ImageContent, ListContent, MappedBlock, MappingConfig, ParagraphContent,
    QuoteContent, SectionContent, TableContent,
};
use crate::services::elements::{ResolvedElements, element_id_from_class};
use crate::utils::html::{
    alignment_from_classes, class_tokens, contains_class, element_text, has_any_class,
    parse_selector, select_first, style_property, top_level_elements,
};

const BLOCK_CLASS_PREFIX: &str = "wp-block-";

/// Tags that open a new fragment.
const BLOCK_LEVEL_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "div", "figure", "blockquote", "ul", "ol", "table",
    "hr",
];

/// Selectors used while extracting payloads.
struct PayloadSelectors {
    anchor: Selector,
    image: Selector,
    figcaption: Selector,
    cite: Selector,
    heading: Selector,
    table: Selector,
    blockquote: Selector,
    table_row: Selector,
    table_cell: Selector,
    table_header: Selector,
    table_caption: Selector,
}

impl PayloadSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            anchor: parse_selector("a")?,
            image: parse_selector("img")?,
            figcaption: parse_selector("figcaption")?,
            cite: parse_selector("cite")?,
            heading: parse_selector("h1, h2, h3, h4, h5, h6")?,
            table: parse_selector("table")?,
            blockquote: parse_selector("blockquote")?,
            table_row: parse_selector("tr")?,
            table_cell: parse_selector("th, td")?,
            table_header: parse_selector("th")?,
            table_caption: parse_selector("caption")?,
        })
    }
}

/// Service classifying HTML fragments into content blocks.
pub struct BlockMapper {
    mapping: MappingConfig,
    site_host: Option<String>,
    selectors: PayloadSelectors,
    cite_pattern: Regex,
}

impl BlockMapper {
    /// Create a mapper. `site_host` decides which button links count as external.
    pub fn new(mapping: &MappingConfig, site_host: Option<String>) -> Result<Self> {
        Ok(Self {
            mapping: mapping.clone(),
            site_host,
            selectors: PayloadSelectors::new()?,
            cite_pattern: Regex::new(r"(?is)<cite\b[^>]*>.*?</cite>")?,
        })
    }

    /// Map a whole content document.
    ///
    /// Every fragment takes one order slot; fragments that are not recognized
    /// are dropped and leave a gap.
    pub fn map_document(&self, html: &str, elements: &ResolvedElements) -> Vec<MappedBlock> {
        let document = Html::parse_fragment(html);
        let mut fragments = Vec::new();
        for el in top_level_elements(&document) {
            self.collect_fragments(el, &mut fragments);
        }

        let blocks: Vec<MappedBlock> = fragments
            .into_iter()
            .enumerate()
            .filter_map(|(position, el)| self.map_at(position, &el, elements))
            .collect();
        log::debug!("Mapped {} blocks", blocks.len());
        blocks
    }

    /// Map pre-split fragments, one order slot per fragment.
    pub fn map_fragments<S: AsRef<str>>(
        &self,
        fragments: &[S],
        elements: &ResolvedElements,
    ) -> Vec<MappedBlock> {
        fragments
            .iter()
            .enumerate()
            .filter_map(|(position, fragment)| {
                let document = Html::parse_fragment(fragment.as_ref());
                let el = top_level_elements(&document).next();
                match el {
                    Some(el) => self.map_at(position, &el, elements),
                    None => {
                        log::warn!("Skipping fragment {position} without an element");
                        None
                    }
                }
            })
            .collect()
    }

    /// Push `el`, or the fragments inside it when it is a plain wrapper.
    fn collect_fragments<'a>(&self, el: ElementRef<'a>, out: &mut Vec<ElementRef<'a>>) {
        if self.is_wrapper(&el) {
            for child in el.children().filter_map(ElementRef::wrap) {
                self.collect_fragments(child, out);
            }
        } else {
            out.push(el);
        }
    }

    /// A `div` with no block marker of its own that holds block-level children.
    fn is_wrapper(&self, el: &ElementRef<'_>) -> bool {
        let m = &self.mapping;
        el.value().name() == "div"
            && !has_any_class(el, &m.section_markers)
            && !has_any_class(el, &m.columns_markers)
            && !has_any_class(el, &m.button_group_markers)
            && el.value().classes().find_map(element_id_from_class).is_none()
            && el
                .children()
                .filter_map(ElementRef::wrap)
                .any(|child| BLOCK_LEVEL_TAGS.contains(&child.value().name()))
    }

    fn map_at(
        &self,
        position: usize,
        el: &ElementRef<'_>,
        elements: &ResolvedElements,
    ) -> Option<MappedBlock> {
        match self.classify(el, elements) {
            Some(content) => Some(MappedBlock {
                order: position as u32,
                content,
            }),
            None => {
                log::warn!(
                    "Skipping unrecognized <{}> fragment at position {position}",
                    el.value().name()
                );
                None
            }
        }
    }

    /// Classify one element. `None` means the element is not a known block.
    pub fn classify(&self, el: &ElementRef<'_>, elements: &ResolvedElements) -> Option<BlockContent> {
        let tag = el.value().name();
        let content = match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.heading(el, tag),
            "p" if contains_class(el, &self.mapping.button_markers) => {
                BlockContent::Cta(self.paragraph_cta(el))
            }
            "p" => BlockContent::Paragraph(ParagraphContent {
                text: el.inner_html().trim().to_string(),
                alignment: alignment_from_classes(class_tokens(el)),
            }),
            "figure" if has_any_class(el, &self.mapping.image_markers) => {
                BlockContent::Image(self.image(el))
            }
            "figure" => self.figure(el),
            "div" => self.div(el, elements),
            "blockquote" => BlockContent::Quote(self.quote(el)),
            "ul" | "ol" => BlockContent::List(ListContent {
                ordered: tag == "ol",
                items: el
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|child| child.value().name() == "li")
                    .map(|li| element_text(&li))
                    .collect(),
            }),
            "table" => BlockContent::Table(self.table(el)),
            "hr" => BlockContent::Divider(DividerContent::default()),
            _ => return None,
        };
        Some(content)
    }

    /// `wp-block-*` types present in `html` that the mapper does not cover.
    ///
    /// Names are de-duplicated and returned in first-seen order.
    pub fn unmapped_block_types(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut unmapped = Vec::new();

        for el in document.root_element().descendants().filter_map(ElementRef::wrap) {
            for class in el.value().classes() {
                let Some(rest) = class.strip_prefix(BLOCK_CLASS_PREFIX) else {
                    continue;
                };
                let name = rest.split("__").next().unwrap_or(rest);
                if name.is_empty() || self.mapping.handled_block_types.iter().any(|h| h == name) {
                    continue;
                }
                if seen.insert(name.to_string()) {
                    unmapped.push(name.to_string());
                }
            }
        }
        unmapped
    }

    fn heading(&self, el: &ElementRef<'_>, tag: &str) -> BlockContent {
        let level = tag.as_bytes()[1] - b'0';
        BlockContent::Heading(HeadingContent {
            level,
            text: element_text(el),
            anchor: el
                .value()
                .id()
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        })
    }

    fn image(&self, el: &ElementRef<'_>) -> ImageContent {
        let img = select_first(el, &self.selectors.image);
        let attr = |name: &str| {
            img.and_then(|i| i.value().attr(name))
                .unwrap_or_default()
                .to_string()
        };
        let mut url = attr("src");
        if url.is_empty() {
            url = attr("data-src");
        }
        let tokens = class_tokens(el);

        ImageContent {
            url,
            alt: attr("alt"),
            caption: select_first(el, &self.selectors.figcaption)
                .map(|c| element_text(&c))
                .unwrap_or_default(),
            alignment: alignment_from_classes(tokens.iter().copied()),
            size: tokens
                .iter()
                .find_map(|t| t.strip_prefix("size-"))
                .map(str::to_string),
        }
    }

    /// Figures without an image marker: tables and pullquotes are unwrapped,
    /// anything else is a generic figure.
    fn figure(&self, el: &ElementRef<'_>) -> BlockContent {
        let caption = || {
            select_first(el, &self.selectors.figcaption)
                .map(|c| element_text(&c))
                .filter(|c| !c.is_empty())
        };

        if select_first(el, &self.selectors.image).is_none() {
            if let Some(table) = select_first(el, &self.selectors.table) {
                let mut content = self.table(&table);
                if content.caption.is_empty() {
                    content.caption = caption().unwrap_or_default();
                }
                return BlockContent::Table(content);
            }
            if let Some(blockquote) = select_first(el, &self.selectors.blockquote) {
                let mut content = self.quote(&blockquote);
                content.citation = content.citation.or_else(caption);
                content.alignment = content
                    .alignment
                    .or_else(|| alignment_from_classes(class_tokens(el)));
                return BlockContent::Quote(content);
            }
        }
        BlockContent::Figure(self.image(el))
    }

    fn quote(&self, el: &ElementRef<'_>) -> QuoteContent {
        let inner = el.inner_html();
        QuoteContent {
            text: self.cite_pattern.replace_all(&inner, "").trim().to_string(),
            citation: select_first(el, &self.selectors.cite)
                .map(|c| element_text(&c))
                .filter(|c| !c.is_empty()),
            alignment: alignment_from_classes(class_tokens(el)),
        }
    }

    fn table(&self, el: &ElementRef<'_>) -> TableContent {
        TableContent {
            caption: select_first(el, &self.selectors.table_caption)
                .map(|c| element_text(&c))
                .unwrap_or_default(),
            has_header: select_first(el, &self.selectors.table_header).is_some(),
            rows: el
                .select(&self.selectors.table_row)
                .map(|row| {
                    row.select(&self.selectors.table_cell)
                        .map(|cell| element_text(&cell))
                        .collect()
                })
                .collect(),
        }
    }

    fn div(&self, el: &ElementRef<'_>, elements: &ResolvedElements) -> BlockContent {
        let m = &self.mapping;

        if has_any_class(el, &m.section_markers) {
            return BlockContent::Section(SectionContent {
                headline: select_first(el, &self.selectors.heading)
                    .map(|h| element_text(&h))
                    .unwrap_or_default(),
                background_color: el
                    .value()
                    .attr("style")
                    .and_then(|style| style_property(style, "background-color")),
                html: el.inner_html().trim().to_string(),
            });
        }

        if let Some(element_id) = el.value().classes().find_map(element_id_from_class) {
            let resolved = elements.get(element_id);
            return BlockContent::Container(ContainerContent {
                element_id: element_id.to_string(),
                style: resolved
                    .map(|config| config.configuration.clone())
                    .unwrap_or_else(Map::new),
                css: resolved.map(|config| config.styles.clone()).unwrap_or_default(),
                html: el.inner_html().trim().to_string(),
            });
        }

        if has_any_class(el, &m.columns_markers) {
            return BlockContent::Columns(ColumnsContent {
                count: el
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|child| has_any_class(child, &m.column_markers))
                    .count(),
                html: el.inner_html().trim().to_string(),
            });
        }

        if has_any_class(el, &m.button_group_markers) {
            return BlockContent::CtaGroup(CtaGroupContent {
                buttons: el
                    .select(&self.selectors.anchor)
                    .map(|a| self.cta_from_anchor(&a))
                    .collect(),
            });
        }

        BlockContent::Paragraph(ParagraphContent {
            text: el.inner_html().trim().to_string(),
            alignment: alignment_from_classes(class_tokens(el)),
        })
    }

    fn paragraph_cta(&self, el: &ElementRef<'_>) -> CtaContent {
        let anchors: Vec<ElementRef<'_>> = el.select(&self.selectors.anchor).collect();
        let button = anchors
            .iter()
            .find(|a| has_any_class(a, &self.mapping.button_markers))
            .or_else(|| anchors.first());

        match button {
            Some(a) => self.cta_from_anchor(a),
            None => CtaContent {
                text: element_text(el),
                url: String::new(),
                variant: variant_from_classes(class_tokens(el)),
                external: false,
            },
        }
    }

    fn cta_from_anchor(&self, a: &ElementRef<'_>) -> CtaContent {
        let url = a.value().attr("href").unwrap_or_default().to_string();
        let mut tokens = class_tokens(a);
        if let Some(parent) = a.parent().and_then(ElementRef::wrap) {
            if has_any_class(&parent, &self.mapping.button_markers) {
                tokens.extend(class_tokens(&parent));
            }
        }

        CtaContent {
            text: element_text(a),
            external: a.value().attr("target") == Some("_blank") || self.is_external(&url),
            variant: variant_from_classes(tokens),
            url,
        }
    }

    fn is_external(&self, href: &str) -> bool {
        let Some(site_host) = &self.site_host else {
            return false;
        };
        match url::Url::parse(href) {
            Ok(url) => url
                .host_str()
                .map(|host| host.trim_start_matches("www.") != site_host)
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}

/// Style variant named by button class tokens.
fn variant_from_classes<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let tokens: Vec<&str> = tokens.into_iter().collect();
    if tokens.iter().any(|t| t.contains("outline")) {
        "outline".to_string()
    } else if tokens.iter().any(|t| t.contains("secondary")) {
        "secondary".to_string()
    } else {
        "primary".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alignment, BlockType, GenerateBlocksConfig};
    use serde_json::json;

    fn mapper() -> BlockMapper {
        BlockMapper::new(&MappingConfig::default(), Some("cruisemadeeasy.com".to_string())).unwrap()
    }

    fn map(html: &str) -> Vec<MappedBlock> {
        mapper().map_document(html, &ResolvedElements::new())
    }

    fn single(html: &str) -> BlockContent {
        let blocks = map(html);
        assert_eq!(blocks.len(), 1, "expected one block for {html}");
        blocks.into_iter().next().unwrap().content
    }

    #[test]
    fn test_heading_with_anchor() {
        match single(r#"<h3 id="x">Title</h3>"#) {
            BlockContent::Heading(h) => {
                assert_eq!(h.level, 3);
                assert_eq!(h.text, "Title");
                assert_eq!(h.anchor.as_deref(), Some("x"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_heading_strips_inner_tags() {
        match single("<h2>Best <em>Alaska</em> cruises</h2>") {
            BlockContent::Heading(h) => {
                assert_eq!(h.text, "Best Alaska cruises");
                assert!(h.anchor.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_paragraph_keeps_markup() {
        match single(r#"<p class="has-text-align-center">Go <strong>early</strong></p>"#) {
            BlockContent::Paragraph(p) => {
                assert_eq!(p.text, "Go <strong>early</strong>");
                assert_eq!(p.alignment, Some(Alignment::Center));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_paragraph_with_button_becomes_cta() {
        let html = r#"<p><a class="button is-style-outline" href="https://partner.example.com/book" target="_blank">Book now</a></p>"#;
        match single(html) {
            BlockContent::Cta(cta) => {
                assert_eq!(cta.text, "Book now");
                assert_eq!(cta.url, "https://partner.example.com/book");
                assert_eq!(cta.variant, "outline");
                assert!(cta.external);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_internal_cta_is_not_external() {
        let html = r#"<p><a class="gb-button" href="https://www.cruisemadeeasy.com/contact/">Ask us</a></p>"#;
        match single(html) {
            BlockContent::Cta(cta) => {
                assert!(!cta.external);
                assert_eq!(cta.variant, "primary");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_image_figure() {
        let html = r#"<figure class="wp-block-image size-large aligncenter"><img src="/wp-content/uploads/deck.jpg" alt="Pool deck"><figcaption>The <b>pool</b> deck</figcaption></figure>"#;
        match single(html) {
            BlockContent::Image(img) => {
                assert_eq!(img.url, "/wp-content/uploads/deck.jpg");
                assert_eq!(img.alt, "Pool deck");
                assert_eq!(img.caption, "The pool deck");
                assert_eq!(img.alignment, Some(Alignment::Center));
                assert_eq!(img.size.as_deref(), Some("large"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_generic_figure_without_img_defaults_empty() {
        match single("<figure><figcaption>Map</figcaption></figure>") {
            BlockContent::Figure(fig) => {
                assert_eq!(fig.url, "");
                assert_eq!(fig.alt, "");
                assert_eq!(fig.caption, "Map");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_quote_strips_cite() {
        let html = r#"<blockquote class="wp-block-quote"><p>Best trip ever.</p><cite>A. Traveler</cite></blockquote>"#;
        match single(html) {
            BlockContent::Quote(q) => {
                assert_eq!(q.text, "<p>Best trip ever.</p>");
                assert_eq!(q.citation.as_deref(), Some("A. Traveler"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_lists_ordered_and_unordered() {
        for (html, ordered) in [
            ("<ul><li>One</li><li>Two</li><li>Three</li></ul>", false),
            ("<ol><li>One</li><li>Two</li><li>Three</li></ol>", true),
        ] {
            match single(html) {
                BlockContent::List(list) => {
                    assert_eq!(list.ordered, ordered);
                    assert_eq!(list.items, vec!["One", "Two", "Three"]);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_table() {
        let html = "<table><caption>Fares</caption><tr><th>Cabin</th><th>Price</th></tr>\
                    <tr><td>Inside</td><td>$899</td></tr></table>";
        match single(html) {
            BlockContent::Table(t) => {
                assert_eq!(t.caption, "Fares");
                assert!(t.has_header);
                assert_eq!(
                    t.rows,
                    vec![vec!["Cabin", "Price"], vec!["Inside", "$899"]]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_table_without_header() {
        match single("<table><tr><td>a</td></tr></table>") {
            BlockContent::Table(t) => {
                assert!(!t.has_header);
                assert_eq!(t.caption, "");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_divider() {
        assert_eq!(single("<hr>").block_type(), BlockType::Divider);
    }

    #[test]
    fn test_section_div() {
        let html = r##"<div class="gb-section" style="background-color: #0a2540; padding: 2rem"><h2>Why cruise?</h2><p>Because.</p></div>"##;
        match single(html) {
            BlockContent::Section(s) => {
                assert_eq!(s.headline, "Why cruise?");
                assert_eq!(s.background_color.as_deref(), Some("#0a2540"));
                assert!(s.html.contains("<p>Because.</p>"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_container_has_empty_style() {
        match single(r#"<div class="gb-element-deadbeef other-class"><p>x</p></div>"#) {
            BlockContent::Container(c) => {
                assert_eq!(c.element_id, "deadbeef");
                assert!(c.style.is_empty());
                assert_eq!(c.css, "");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_resolved_container_carries_style() {
        let config = GenerateBlocksConfig::new(
            "abc123",
            "container",
            json!({ "backgroundColor": "#fff" }).as_object().cloned().unwrap(),
        );
        let elements = ResolvedElements::from([("abc123".to_string(), config)]);
        let blocks = mapper().map_document(r#"<div class="gb-element-abc123">x</div>"#, &elements);

        match &blocks[0].content {
            BlockContent::Container(c) => {
                assert_eq!(c.style["backgroundColor"], "#fff");
                assert_eq!(c.css, "background-color: #fff;");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_columns_count_direct_columns() {
        let html = r#"<div class="wp-block-columns"><div class="wp-block-column">a</div><div class="wp-block-column">b</div><div class="wp-block-column">c</div></div>"#;
        match single(html) {
            BlockContent::Columns(c) => assert_eq!(c.count, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_button_group() {
        let html = r#"<div class="wp-block-buttons">
            <div class="wp-block-button"><a class="wp-block-button__link" href="/deals/">Deals</a></div>
            <div class="wp-block-button is-style-outline"><a class="wp-block-button__link" href="https://lines.example.org/" target="_blank">Cruise lines</a></div>
        </div>"#;
        match single(html) {
            BlockContent::CtaGroup(group) => {
                assert_eq!(group.buttons.len(), 2);
                assert_eq!(group.buttons[0].text, "Deals");
                assert_eq!(group.buttons[0].variant, "primary");
                assert!(!group.buttons[0].external);
                assert_eq!(group.buttons[1].variant, "outline");
                assert!(group.buttons[1].external);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_plain_div_falls_back_to_paragraph() {
        match single(r#"<div class="entry-note"><em>Note</em></div>"#) {
            BlockContent::Paragraph(p) => assert_eq!(p.text, "<em>Note</em>"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_fragment_keeps_its_slot() {
        let blocks = map("<p>first</p>\n<span>stray</span>\n<h2>third</h2>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].order, 0);
        assert_eq!(blocks[1].order, 2);
        assert_eq!(blocks[1].content.block_type(), BlockType::Heading);
    }

    #[test]
    fn test_orders_are_sequential_for_known_fragments() {
        let blocks = map("<h1>A</h1><p>B</p><hr><ul><li>C</li></ul>");
        let orders: Vec<u32> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_map_fragments() {
        let fragments = ["<h4>Tips</h4>", "", "<p>Pack light</p>"];
        let blocks = mapper().map_fragments(&fragments, &ResolvedElements::new());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].order, 2);
    }

    #[test]
    fn test_table_figure_maps_to_table() {
        let html = r#"<figure class="wp-block-table"><table><thead><tr><th>Cabin</th></tr></thead><tbody><tr><td>Inside</td></tr></tbody></table><figcaption>Fares</figcaption></figure>"#;
        match single(html) {
            BlockContent::Table(t) => {
                assert_eq!(t.caption, "Fares");
                assert!(t.has_header);
                assert_eq!(t.rows, vec![vec!["Cabin"], vec!["Inside"]]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(mapper().unmapped_block_types(html).is_empty());
    }

    #[test]
    fn test_pullquote_figure_maps_to_quote() {
        let html = r#"<figure class="wp-block-pullquote has-text-align-center"><blockquote><p>Sea days are the best days.</p><cite>Captain Lee</cite></blockquote></figure>"#;
        match single(html) {
            BlockContent::Quote(q) => {
                assert_eq!(q.text, "<p>Sea days are the best days.</p>");
                assert_eq!(q.citation.as_deref(), Some("Captain Lee"));
                assert_eq!(q.alignment, Some(Alignment::Center));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_group_wrapper_children_get_own_slots() {
        let html = r#"<h1>Top</h1><div class="wp-block-group"><div class="wp-block-group__inner-container"><h2>Inside</h2><p>Body</p><span>stray</span><ul><li>x</li></ul></div></div><hr>"#;
        let blocks = map(html);
        let kinds: Vec<(u32, BlockType)> = blocks
            .iter()
            .map(|b| (b.order, b.content.block_type()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (0, BlockType::Heading),
                (1, BlockType::Heading),
                (2, BlockType::Paragraph),
                (4, BlockType::List),
                (5, BlockType::Divider),
            ]
        );
    }

    #[test]
    fn test_marked_divs_are_not_unwrapped() {
        let html = r#"<div class="gb-element-abc123"><h2>Deals</h2><p>x</p></div>"#;
        assert_eq!(single(html).block_type(), BlockType::Container);
    }

    #[test]
    fn test_unmapped_block_types() {
        let html = r#"
            <div class="wp-block-group"><div class="wp-block-group__inner-container">
              <figure class="wp-block-image"><img src="a.jpg"></figure>
              <figure class="wp-block-embed is-type-video"></figure>
              <div class="wp-block-group"></div>
              <div class="wp-block-columns"><div class="wp-block-column"></div></div>
            </div></div>"#;
        assert_eq!(mapper().unmapped_block_types(html), vec!["group", "embed"]);
    }
}
