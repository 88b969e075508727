//! Static resource library with search and filters.

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, Localized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Article,
    Guide,
    Video,
    Podcast,
    Worksheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: Localized<String>,
    pub content: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Resource {
    pub fn title(&self, locale: Locale) -> &str {
        self.title.get(locale)
    }
}

/// Search box plus the category and type dropdowns. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub search: String,
    pub category: Option<String>,
    pub kind: Option<ResourceType>,
}

impl ResourceFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || resource
                .title
                .get(Locale::English)
                .to_lowercase()
                .contains(&needle)
            || resource.content.to_lowercase().contains(&needle);
        let matches_category = self
            .category
            .as_deref()
            .map_or(true, |category| resource.category == category);
        let matches_kind = self.kind.map_or(true, |kind| resource.kind == kind);

        matches_search && matches_category && matches_kind
    }

    pub fn apply<'a>(&self, resources: &'a [Resource]) -> Vec<&'a Resource> {
        resources.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct categories in first-seen order.
pub fn categories(resources: &[Resource]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for resource in resources {
        if !seen.contains(&resource.category.as_str()) {
            seen.push(&resource.category);
        }
    }
    seen
}
