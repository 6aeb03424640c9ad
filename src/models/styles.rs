//! Extracted CSS data per element and per page.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CSS collected for one element class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedElementStyles {
    /// Class name the rules target, e.g. `gb-element-abc123`
    pub element_id: String,

    /// Declaration bodies of top-level rules, in source order
    #[serde(default)]
    pub css_rules: Vec<String>,

    /// Declaration bodies of rules nested in `@media`, keyed by condition
    #[serde(default)]
    pub media_queries: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_variables: Option<BTreeMap<String, String>>,
}

impl ExtractedElementStyles {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            ..Self::default()
        }
    }

    /// True when no rule (base or media) was found.
    pub fn is_empty(&self) -> bool {
        self.css_rules.is_empty() && self.media_queries.values().all(Vec::is_empty)
    }

    /// Fold another extraction of the same element into this one.
    ///
    /// Rules are appended without deduplication; media conditions and
    /// variables are merged key by key with `other` winning.
    pub fn merge(&mut self, other: ExtractedElementStyles) {
        self.css_rules.extend(other.css_rules);
        self.media_queries.extend(other.media_queries);
        if let Some(vars) = other.css_variables {
            self.css_variables.get_or_insert_with(BTreeMap::new).extend(vars);
        }
    }

    /// Render the element's rules back into a stylesheet fragment.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        if !self.css_rules.is_empty() {
            out.push_str(&rule_block(&self.element_id, &self.css_rules, ""));
        }
        for (condition, bodies) in &self.media_queries {
            out.push_str(&format!("@media {condition} {{\n"));
            out.push_str(&rule_block(&self.element_id, bodies, "  "));
            out.push_str("}\n");
        }
        out
    }
}

fn rule_block(class_name: &str, bodies: &[String], indent: &str) -> String {
    let mut out = format!("{indent}.{class_name} {{\n");
    for body in bodies {
        out.push_str(&format!("{indent}  {}\n", body.trim()));
    }
    out.push_str(&format!("{indent}}}\n"));
    out
}

/// Styles scraped from one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageCssData {
    pub url: String,
    pub element_styles: Vec<ExtractedElementStyles>,
    #[serde(rename = "globalCSSVariables")]
    pub global_css_variables: BTreeMap<String, String>,
    pub extracted_at: DateTime<Utc>,
}

/// Site-wide accumulation of page styles keyed by element id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StyleRegistry {
    pub elements: BTreeMap<String, ExtractedElementStyles>,
    #[serde(rename = "globalCSSVariables")]
    pub global_css_variables: BTreeMap<String, String>,
    pub page_count: usize,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one element's styles; later calls append to earlier ones.
    pub fn add_element(&mut self, styles: ExtractedElementStyles) {
        match self.elements.get_mut(&styles.element_id) {
            Some(existing) => existing.merge(styles),
            None => {
                self.elements.insert(styles.element_id.clone(), styles);
            }
        }
    }

    /// Merge everything one page produced.
    pub fn add_page(&mut self, page: PageCssData) {
        for styles in page.element_styles {
            self.add_element(styles);
        }
        self.global_css_variables.extend(page.global_css_variables);
        self.page_count += 1;
    }

    /// Builder-style variant of [`StyleRegistry::add_page`].
    pub fn with_page(mut self, page: PageCssData) -> Self {
        self.add_page(page);
        self
    }

    /// Build one stylesheet: a `:root` block for variables, then every element.
    pub fn to_stylesheet(&self) -> String {
        let mut out = String::new();
        if !self.global_css_variables.is_empty() {
            out.push_str(":root {\n");
            for (name, value) in &self.global_css_variables {
                out.push_str(&format!("  {name}: {value};\n"));
            }
            out.push_str("}\n");
        }
        for styles in self.elements.values() {
            out.push_str(&styles.to_css());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(id: &str, rules: &[&str]) -> ExtractedElementStyles {
        ExtractedElementStyles {
            element_id: id.to_string(),
            css_rules: rules.iter().map(|s| s.to_string()).collect(),
            ..ExtractedElementStyles::default()
        }
    }

    #[test]
    fn test_merge_keeps_duplicates() {
        let mut a = styles("gb-element-abc", &["color: red;", "margin: 0;"]);
        let b = styles("gb-element-abc", &["color: red;"]);
        a.merge(b);
        assert_eq!(a.css_rules.len(), 3);
        assert_eq!(a.css_rules[2], "color: red;");
    }

    #[test]
    fn test_merge_media_queries_later_wins_per_condition() {
        let mut a = styles("gb-element-abc", &[]);
        a.media_queries
            .insert("(max-width: 768px)".to_string(), vec!["gap: 1rem;".to_string()]);
        a.media_queries
            .insert("print".to_string(), vec!["display: none;".to_string()]);

        let mut b = styles("gb-element-abc", &[]);
        b.media_queries
            .insert("(max-width: 768px)".to_string(), vec!["gap: 0;".to_string()]);

        a.merge(b);
        assert_eq!(a.media_queries["(max-width: 768px)"], vec!["gap: 0;"]);
        assert_eq!(a.media_queries["print"], vec!["display: none;"]);
    }

    #[test]
    fn test_merge_variables_later_wins() {
        let mut a = styles("x", &[]);
        a.css_variables = Some(BTreeMap::from([
            ("--accent".to_string(), "red".to_string()),
            ("--base".to_string(), "#fff".to_string()),
        ]));
        let mut b = styles("x", &[]);
        b.css_variables = Some(BTreeMap::from([("--accent".to_string(), "blue".to_string())]));

        a.merge(b);
        let vars = a.css_variables.unwrap();
        assert_eq!(vars["--accent"], "blue");
        assert_eq!(vars["--base"], "#fff");
    }

    #[test]
    fn test_to_css_layout() {
        let mut s = styles("gb-element-abc123", &["color: red;"]);
        s.media_queries.insert(
            "(max-width: 600px)".to_string(),
            vec!["color: blue;".to_string()],
        );
        assert_eq!(
            s.to_css(),
            ".gb-element-abc123 {\n  color: red;\n}\n\
             @media (max-width: 600px) {\n  .gb-element-abc123 {\n    color: blue;\n  }\n}\n"
        );
    }

    #[test]
    fn test_to_css_without_base_rules() {
        let mut s = styles("gb-element-abc123", &[]);
        s.media_queries
            .insert("print".to_string(), vec!["display: none;".to_string()]);
        assert!(s.to_css().starts_with("@media print {"));
    }

    #[test]
    fn test_registry_accumulates_pages() {
        let page = |rules: &[&str], var: &str| PageCssData {
            url: "https://example.com/".to_string(),
            element_styles: vec![styles("gb-element-abc", rules)],
            global_css_variables: BTreeMap::from([("--accent".to_string(), var.to_string())]),
            extracted_at: Utc::now(),
        };

        let registry = StyleRegistry::new()
            .with_page(page(&["color: red;"], "red"))
            .with_page(page(&["color: red;", "padding: 0;"], "blue"));

        assert_eq!(registry.page_count, 2);
        assert_eq!(registry.elements["gb-element-abc"].css_rules.len(), 3);
        assert_eq!(registry.global_css_variables["--accent"], "blue");
        assert!(registry.to_stylesheet().starts_with(":root {\n  --accent: blue;\n}\n"));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(styles("gb-element-abc", &["a: b;"])).unwrap();
        assert!(json.get("elementId").is_some());
        assert!(json.get("cssRules").is_some());
        assert!(json.get("mediaQueries").is_some());
        assert!(json.get("cssVariables").is_none());
    }
}
