use std::collections::HashSet;

use super::normalize::{normalize, resolve_url};
use super::options::ParseOptions;
use super::record::{Subsection, ToolRecord};

/// Normalizes one emitted record in place. Running it twice is a no-op.
pub fn finalize(record: &mut ToolRecord, options: &ParseOptions) {
    record.screenshots = record
        .screenshots
        .iter()
        .map(|url| resolve_url(url))
        .collect();
    for url in [&mut record.website_link, &mut record.logo] {
        if !url.is_empty() {
            let resolved = resolve_url(url);
            *url = resolved;
        }
    }

    dedup(&mut record.screenshots);
    dedup(&mut record.category);
    dedup(&mut record.tags);

    for subsection in Subsection::ALL {
        let text = record.full_description.get_mut(subsection);
        let cleaned = normalize(text);
        *text = cleaned;
    }

    if record.product_type.trim().is_empty() {
        record.product_type = options.product_type().to_string();
    }

    if record.category.is_empty() {
        record.category = vec![options.pick_category(
            &record.short_description,
            &record.full_description.introduction,
        )];
    }
}

pub fn finalize_all(records: &mut [ToolRecord], options: &ParseOptions) {
    for record in records {
        finalize(record, options);
    }
}

// Keeps the first occurrence of each entry and drops blank ones.
fn dedup(values: &mut Vec<String>) {
    let mut seen = HashSet::new();
    values.retain(|value| !value.trim().is_empty() && seen.insert(value.clone()));
}
