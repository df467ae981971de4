use serde::{Deserialize, Serialize};

/// Top-level slots of a tool record, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ToolName,
    WebsiteLink,
    Logo,
    Screenshots,
    ShortDescription,
    FullDescription,
    Slug,
    MetaTitle,
    MetaDescription,
    Category,
    ProductType,
    Tags,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::ToolName,
        Field::WebsiteLink,
        Field::Logo,
        Field::Screenshots,
        Field::ShortDescription,
        Field::FullDescription,
        Field::Slug,
        Field::MetaTitle,
        Field::MetaDescription,
        Field::Category,
        Field::ProductType,
        Field::Tags,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::ToolName => "Tool Name",
            Field::WebsiteLink => "Website Link",
            Field::Logo => "Logo",
            Field::Screenshots => "Screenshots",
            Field::ShortDescription => "Short Description",
            Field::FullDescription => "Full Description",
            Field::Slug => "Slug",
            Field::MetaTitle => "Meta Title",
            Field::MetaDescription => "Meta Description",
            Field::Category => "Category",
            Field::ProductType => "Product Type",
            Field::Tags => "Tags",
        }
    }

    /// Case-insensitive exact match against the field labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }

    pub fn is_list(self) -> bool {
        matches!(self, Field::Category | Field::Tags | Field::Screenshots)
    }

    pub fn is_url(self) -> bool {
        matches!(self, Field::WebsiteLink | Field::Logo | Field::Screenshots)
    }
}

/// Named sections of the long-form description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsection {
    Introduction,
    KeyFeatures,
    UseCases,
    HowItWorks,
    WhyChoose,
    FutureVision,
    Conclusion,
}

impl Subsection {
    pub const ALL: [Subsection; 7] = [
        Subsection::Introduction,
        Subsection::KeyFeatures,
        Subsection::UseCases,
        Subsection::HowItWorks,
        Subsection::WhyChoose,
        Subsection::FutureVision,
        Subsection::Conclusion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Subsection::Introduction => "Introduction",
            Subsection::KeyFeatures => "Key Features",
            Subsection::UseCases => "Use Cases",
            Subsection::HowItWorks => "How It Works",
            Subsection::WhyChoose => "Why Choose",
            Subsection::FutureVision => "Future Vision",
            Subsection::Conclusion => "Conclusion",
        }
    }

    /// Case-insensitive prefix match, so "Why Choose Acme?" resolves to `WhyChoose`.
    pub fn from_label_prefix(label: &str) -> Option<Self> {
        let lowered = label.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|subsection| lowered.starts_with(&subsection.label().to_lowercase()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullDescription {
    #[serde(rename = "Introduction", default)]
    pub introduction: String,
    #[serde(rename = "Key Features", default)]
    pub key_features: String,
    #[serde(rename = "Use Cases", default)]
    pub use_cases: String,
    #[serde(rename = "How It Works", default)]
    pub how_it_works: String,
    #[serde(rename = "Why Choose", default)]
    pub why_choose: String,
    #[serde(rename = "Future Vision", default)]
    pub future_vision: String,
    #[serde(rename = "Conclusion", default)]
    pub conclusion: String,
}

impl FullDescription {
    pub fn get(&self, subsection: Subsection) -> &str {
        match subsection {
            Subsection::Introduction => &self.introduction,
            Subsection::KeyFeatures => &self.key_features,
            Subsection::UseCases => &self.use_cases,
            Subsection::HowItWorks => &self.how_it_works,
            Subsection::WhyChoose => &self.why_choose,
            Subsection::FutureVision => &self.future_vision,
            Subsection::Conclusion => &self.conclusion,
        }
    }

    pub fn get_mut(&mut self, subsection: Subsection) -> &mut String {
        match subsection {
            Subsection::Introduction => &mut self.introduction,
            Subsection::KeyFeatures => &mut self.key_features,
            Subsection::UseCases => &mut self.use_cases,
            Subsection::HowItWorks => &mut self.how_it_works,
            Subsection::WhyChoose => &mut self.why_choose,
            Subsection::FutureVision => &mut self.future_vision,
            Subsection::Conclusion => &mut self.conclusion,
        }
    }
}

/// One structured entry assembled from the paragraphs between two
/// `Tool Name:` markers. Field order and keys are part of the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    #[serde(rename = "Tool Name", default)]
    pub tool_name: String,
    #[serde(rename = "Website Link", default)]
    pub website_link: String,
    #[serde(rename = "Logo", default)]
    pub logo: String,
    #[serde(rename = "Screenshots", default)]
    pub screenshots: Vec<String>,
    #[serde(rename = "Short Description", default)]
    pub short_description: String,
    #[serde(rename = "Full Description", default)]
    pub full_description: FullDescription,
    #[serde(rename = "Slug", default)]
    pub slug: String,
    #[serde(rename = "Meta Title", default)]
    pub meta_title: String,
    #[serde(rename = "Meta Description", default)]
    pub meta_description: String,
    #[serde(rename = "Category", default)]
    pub category: Vec<String>,
    #[serde(rename = "Product Type", default)]
    pub product_type: String,
    #[serde(rename = "Tags", default)]
    pub tags: Vec<String>,
}

/// Mutable view of a single field's storage.
pub enum Slot<'a> {
    Text(&'a mut String),
    List(&'a mut Vec<String>),
    Description(&'a mut FullDescription),
}

impl ToolRecord {
    pub fn slot_mut(&mut self, field: Field) -> Slot<'_> {
        match field {
            Field::ToolName => Slot::Text(&mut self.tool_name),
            Field::WebsiteLink => Slot::Text(&mut self.website_link),
            Field::Logo => Slot::Text(&mut self.logo),
            Field::Screenshots => Slot::List(&mut self.screenshots),
            Field::ShortDescription => Slot::Text(&mut self.short_description),
            Field::FullDescription => Slot::Description(&mut self.full_description),
            Field::Slug => Slot::Text(&mut self.slug),
            Field::MetaTitle => Slot::Text(&mut self.meta_title),
            Field::MetaDescription => Slot::Text(&mut self.meta_description),
            Field::Category => Slot::List(&mut self.category),
            Field::ProductType => Slot::Text(&mut self.product_type),
            Field::Tags => Slot::List(&mut self.tags),
        }
    }

    /// Scalar text of a field; `None` for list and nested fields.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::ToolName => Some(&self.tool_name),
            Field::WebsiteLink => Some(&self.website_link),
            Field::Logo => Some(&self.logo),
            Field::ShortDescription => Some(&self.short_description),
            Field::Slug => Some(&self.slug),
            Field::MetaTitle => Some(&self.meta_title),
            Field::MetaDescription => Some(&self.meta_description),
            Field::ProductType => Some(&self.product_type),
            Field::Screenshots | Field::FullDescription | Field::Category | Field::Tags => None,
        }
    }

    pub fn is_empty(&self, field: Field) -> bool {
        match field {
            Field::Screenshots => self.screenshots.is_empty(),
            Field::Category => self.category.is_empty(),
            Field::Tags => self.tags.is_empty(),
            Field::FullDescription => Subsection::ALL
                .into_iter()
                .all(|subsection| self.full_description.get(subsection).is_empty()),
            _ => self.text(field).is_none_or(str::is_empty),
        }
    }

    /// Stores a resolved URL: list fields append, scalar fields overwrite.
    pub fn commit_url(&mut self, field: Field, url: String) {
        match self.slot_mut(field) {
            Slot::Text(text) => *text = url,
            Slot::List(list) => list.push(url),
            Slot::Description(_) => {}
        }
    }

    /// Renders the record back into the "Field: value" line convention.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec!["Tool Name:".to_string(), self.tool_name.clone()];
        for field in Field::ALL {
            match field {
                Field::ToolName => {}
                Field::FullDescription => {
                    lines.push(format!("{}:", field.label()));
                    for subsection in Subsection::ALL {
                        let text = self.full_description.get(subsection);
                        if !text.is_empty() {
                            lines.push(format!("#### {}: {text}", subsection.label()));
                        }
                    }
                }
                Field::Screenshots => {
                    lines.push(format!("{}:", field.label()));
                    lines.extend(self.screenshots.iter().cloned());
                }
                Field::Category => lines.push(format!("{}: {}", field.label(), self.category.join(", "))),
                Field::Tags => lines.push(format!("{}: {}", field.label(), self.tags.join(", "))),
                _ => {
                    let text = self.text(field).unwrap_or("");
                    if !text.is_empty() {
                        lines.push(format!("{}: {text}", field.label()));
                    }
                }
            }
        }
        lines
    }
}
