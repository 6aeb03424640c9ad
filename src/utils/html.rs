// src/utils/html.rs

//! Tag, class, and attribute helpers over parsed HTML fragments.
//!
//! Absence is never an error: missing tags, classes, and text come back as
//! empty strings, missing attributes as `None`.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::Alignment;

/// A parsed HTML fragment whose first element is the subject.
pub struct Fragment {
    html: Html,
}

impl Fragment {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_fragment(source),
        }
    }

    /// First element of the fragment, if any survived parsing.
    pub fn element(&self) -> Option<ElementRef<'_>> {
        top_level_elements(&self.html).next()
    }

    /// Lower-cased tag name, or an empty string.
    pub fn tag_name(&self) -> String {
        self.element()
            .map(|el| el.value().name().to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Raw `class` attribute, or an empty string.
    pub fn class(&self) -> String {
        self.attr("class").unwrap_or_default()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.element()
            .and_then(|el| el.value().attr(name))
            .map(str::to_string)
    }

    /// Text with all markup removed, trimmed.
    pub fn text(&self) -> String {
        let text: String = self.html.root_element().text().collect();
        text.trim().to_string()
    }
}

/// Lower-cased tag name of the first element in `source`.
pub fn tag_name(source: &str) -> String {
    Fragment::parse(source).tag_name()
}

/// `class` attribute of the first element in `source`.
pub fn class_attr(source: &str) -> String {
    Fragment::parse(source).class()
}

/// Named attribute of the first element in `source`.
pub fn attribute(source: &str, name: &str) -> Option<String> {
    Fragment::parse(source).attr(name)
}

/// `source` with all tags removed and whitespace trimmed.
pub fn strip_tags(source: &str) -> String {
    Fragment::parse(source).text()
}

/// Element children of the document or fragment root, in document order.
pub fn top_level_elements(html: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    html.root_element().children().filter_map(ElementRef::wrap)
}

/// Descendant text of an element, trimmed.
pub fn element_text(el: &ElementRef<'_>) -> String {
    let text: String = el.text().collect();
    text.trim().to_string()
}

/// Class tokens of an element.
pub fn class_tokens<'a>(el: &ElementRef<'a>) -> Vec<&'a str> {
    el.value().classes().collect()
}

/// Whether any class token equals one of `markers`.
pub fn has_any_class(el: &ElementRef<'_>, markers: &[String]) -> bool {
    el.value()
        .classes()
        .any(|class| markers.iter().any(|m| m == class))
}

/// Whether the element or any descendant carries one of `markers`.
pub fn contains_class(el: &ElementRef<'_>, markers: &[String]) -> bool {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .any(|child| has_any_class(&child, markers))
}

/// First descendant matching a selector.
pub fn select_first<'a>(el: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    el.select(selector).next()
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Alignment implied by WordPress/GenerateBlocks class tokens.
pub fn alignment_from_classes<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Option<Alignment> {
    tokens.into_iter().find_map(|token| match token {
        "alignleft" | "has-text-align-left" | "is-content-justification-left" => {
            Some(Alignment::Left)
        }
        "alignright" | "has-text-align-right" | "is-content-justification-right" => {
            Some(Alignment::Right)
        }
        "aligncenter" | "has-text-align-center" | "is-content-justification-center" => {
            Some(Alignment::Center)
        }
        "has-text-align-justify" | "is-content-justification-space-between" => {
            Some(Alignment::Justify)
        }
        _ => None,
    })
}

/// Value of one property inside an inline `style` attribute.
pub fn style_property(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_lowercased() {
        assert_eq!(tag_name("<H2 class=\"x\">Hi</H2>"), "h2");
        assert_eq!(tag_name("<blockquote><p>q</p></blockquote>"), "blockquote");
    }

    #[test]
    fn test_tag_name_empty_without_tag() {
        assert_eq!(tag_name("just text"), "");
        assert_eq!(tag_name(""), "");
    }

    #[test]
    fn test_class_attr_quote_styles() {
        assert_eq!(class_attr(r#"<div class="a b">x</div>"#), "a b");
        assert_eq!(class_attr("<div class='c d'>x</div>"), "c d");
        assert_eq!(class_attr("<div>x</div>"), "");
    }

    #[test]
    fn test_attribute_lookup() {
        let html = r#"<img src="/a.jpg" alt="Ship deck">"#;
        assert_eq!(attribute(html, "src").as_deref(), Some("/a.jpg"));
        assert_eq!(attribute(html, "alt").as_deref(), Some("Ship deck"));
        assert_eq!(attribute(html, "title"), None);
    }

    #[test]
    fn test_attribute_with_nested_quotes() {
        // Handled by the tokenizer rather than a quote-delimited match.
        let html = r#"<img alt='The "Lido" deck' src="/lido.jpg">"#;
        assert_eq!(attribute(html, "alt").as_deref(), Some(r#"The "Lido" deck"#));
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("  <p>Go <strong>now</strong></p>  "), "Go now");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_malformed_first_element_wins() {
        let fragment = Fragment::parse(r#"<p class="first">one<p class="second">two"#);
        assert_eq!(fragment.tag_name(), "p");
        assert_eq!(fragment.class(), "first");
    }

    #[test]
    fn test_alignment_tokens() {
        assert_eq!(
            alignment_from_classes(["wp-block-image", "aligncenter"]),
            Some(Alignment::Center)
        );
        assert_eq!(
            alignment_from_classes(["has-text-align-justify"]),
            Some(Alignment::Justify)
        );
        assert_eq!(alignment_from_classes(["alignwide"]), None);
    }

    #[test]
    fn test_style_property() {
        let style = "padding: 4px; Background-Color : #0a2540 ;color:#fff";
        assert_eq!(style_property(style, "background-color").as_deref(), Some("#0a2540"));
        assert_eq!(style_property(style, "color").as_deref(), Some("#fff"));
        assert_eq!(style_property(style, "margin"), None);
    }

    #[test]
    fn test_contains_class_checks_descendants() {
        let fragment = Fragment::parse(r#"<p>Book <a class="button" href="/go">now</a></p>"#);
        let el = fragment.element().unwrap();
        let markers = vec!["button".to_string()];
        assert!(!has_any_class(&el, &markers));
        assert!(contains_class(&el, &markers));
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
        assert!(parse_selector("figcaption").is_ok());
    }
}
