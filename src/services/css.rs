// src/services/css.rs

//! CSS rule extraction from rendered pages.
//!
//! Works on the text of inline `<style>` blocks. Rules are located with a
//! brace-matching scan that skips comments and quoted strings; anything it
//! cannot balance is skipped rather than reported.

use std::collections::BTreeMap;

use chrono::Utc;
use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::models::{ExtractedElementStyles, PageCssData};
use crate::utils::html::parse_selector;

/// One `prelude { body }` pair at a single nesting level.
#[derive(Debug, Clone, PartialEq)]
struct RawRule<'a> {
    prelude: String,
    body: &'a str,
}

/// Extracts custom properties and element-scoped rules from CSS text.
pub struct CssExtractor {
    variable_pattern: Regex,
}

impl CssExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            variable_pattern: Regex::new(r"(--[A-Za-z0-9_-]+)\s*:\s*([^;{}]+);")?,
        })
    }

    /// Contents of every `<style>` element, in document order.
    pub fn style_text(&self, html: &str) -> Result<String> {
        let document = Html::parse_document(html);
        let selector = parse_selector("style")?;
        let blocks: Vec<String> = document
            .select(&selector)
            .map(|style| style.text().collect::<String>())
            .collect();
        Ok(blocks.join("\n"))
    }

    /// Every `--name: value;` in `css`; a later declaration replaces an earlier one.
    pub fn custom_properties(&self, css: &str) -> BTreeMap<String, String> {
        self.variable_pattern
            .captures_iter(css)
            .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
            .collect()
    }

    /// Rules targeting `.class_name`, split into top-level and `@media` bodies.
    pub fn extract_element_styles(&self, css: &str, class_name: &str) -> Result<ExtractedElementStyles> {
        let target = Regex::new(&format!(r"\.{}$", regex::escape(class_name)))?;
        let matches = |prelude: &str| prelude.split(',').any(|s| target.is_match(s.trim()));

        let mut styles = ExtractedElementStyles::new(class_name);

        for rule in scan_rules(css) {
            if let Some(condition) = media_condition(&rule.prelude) {
                for inner in scan_rules(rule.body) {
                    let body = inner.body.trim();
                    if matches(&inner.prelude) && !body.is_empty() {
                        styles
                            .media_queries
                            .entry(condition.to_string())
                            .or_default()
                            .push(body.to_string());
                    }
                }
            } else if !rule.prelude.starts_with('@') {
                let body = rule.body.trim();
                if matches(&rule.prelude) && !body.is_empty() {
                    styles.css_rules.push(body.to_string());
                }
            }
        }

        let bodies = styles
            .css_rules
            .iter()
            .chain(styles.media_queries.values().flatten())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        let variables = self.custom_properties(&bodies);
        if !variables.is_empty() {
            styles.css_variables = Some(variables);
        }

        Ok(styles)
    }

    /// Extract everything a page holds for the given element classes.
    ///
    /// Classes without any matching rule are left out of `element_styles`.
    pub fn extract_page(&self, url: &str, html: &str, class_names: &[String]) -> Result<PageCssData> {
        let css = self.style_text(html)?;
        let mut element_styles = Vec::new();
        for class_name in class_names {
            let styles = self.extract_element_styles(&css, class_name)?;
            if styles.is_empty() {
                log::debug!("No rules for .{class_name} on {url}");
            } else {
                element_styles.push(styles);
            }
        }

        Ok(PageCssData {
            url: url.to_string(),
            element_styles,
            global_css_variables: self.custom_properties(&css),
            extracted_at: Utc::now(),
        })
    }
}

/// Condition text of an `@media` prelude.
fn media_condition(prelude: &str) -> Option<&str> {
    let head = prelude.get(..6)?;
    if !head.eq_ignore_ascii_case("@media") {
        return None;
    }
    let condition = prelude[6..].trim();
    (!condition.is_empty()).then_some(condition)
}

/// Split one nesting level of CSS into `prelude { body }` pairs.
fn scan_rules(css: &str) -> Vec<RawRule<'_>> {
    let bytes = css.as_bytes();
    let mut rules = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_comment(bytes, i),
            b'"' | b'\'' => i = skip_string(bytes, i),
            b';' | b'}' => {
                i += 1;
                start = i;
            }
            b'{' => match matching_brace(bytes, i) {
                Some(close) => {
                    rules.push(RawRule {
                        prelude: strip_comments(&css[start..i]),
                        body: &css[i + 1..close],
                    });
                    i = close + 1;
                    start = i;
                }
                None => break,
            },
            _ => i += 1,
        }
    }
    rules
}

/// Index of the `}` closing the `{` at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_comment(bytes, i);
                continue;
            }
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index just past the comment starting at `start`.
fn skip_comment(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

/// Index just past the quoted string starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            b'\n' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut last = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            out.push_str(&text[last..i]);
            i = skip_comment(bytes, i);
            last = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[last.min(text.len())..]);
    out.trim().to_string()
}
