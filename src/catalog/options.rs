use serde::{Deserialize, Serialize};

pub const DEFAULT_PRODUCT_TYPE: &str = "AI Tool";
pub const DEFAULT_FALLBACK_CATEGORY: &str = "AI Tool";

/// Picks `category` when `keyword` occurs in the short description or the
/// introduction. Matching is a case-sensitive substring test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }

    /// Parses the `KEYWORD=CATEGORY` form used on the command line.
    pub fn parse(text: &str) -> Option<Self> {
        let (keyword, category) = text.split_once('=')?;
        let keyword = keyword.trim();
        let category = category.trim();
        if keyword.is_empty() || category.is_empty() {
            return None;
        }
        Some(Self::new(keyword, category))
    }
}

/// Post-processing defaults. Rules are checked in order; the first hit wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub default_product_type: String,
    pub category_rules: Vec<CategoryRule>,
    pub fallback_category: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_product_type: DEFAULT_PRODUCT_TYPE.to_string(),
            category_rules: vec![
                CategoryRule::new("Writing", "AI Writing Assistant"),
                CategoryRule::new("Image", "AI Image Generation Tool"),
            ],
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_string(),
        }
    }
}

impl ParseOptions {
    pub fn product_type(&self) -> &str {
        if self.default_product_type.trim().is_empty() {
            DEFAULT_PRODUCT_TYPE
        } else {
            &self.default_product_type
        }
    }

    /// Never blank: rules with an empty keyword or category are skipped and a
    /// blank fallback falls back to [`DEFAULT_FALLBACK_CATEGORY`].
    pub fn pick_category(&self, short_description: &str, introduction: &str) -> String {
        self.category_rules
            .iter()
            .filter(|rule| !rule.keyword.is_empty() && !rule.category.trim().is_empty())
            .find(|rule| {
                short_description.contains(&rule.keyword) || introduction.contains(&rule.keyword)
            })
            .map(|rule| rule.category.clone())
            .unwrap_or_else(|| {
                if self.fallback_category.trim().is_empty() {
                    DEFAULT_FALLBACK_CATEGORY.to_string()
                } else {
                    self.fallback_category.clone()
                }
            })
    }
}
