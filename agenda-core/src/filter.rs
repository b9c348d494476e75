//! Derived, filtered views over the store's collections.

use serde::{Deserialize, Serialize};

use crate::item::{Category, EventType, ItemRef};
use crate::store::Collections;

/// User-supplied criteria for the visible item list.
///
/// Category and event type only constrain events; tasks and birthdays pass
/// those two checks unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    /// ISO date prefix, e.g. "2030-03-20" (or "2030-03" for a whole month)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ItemFilter {
    pub fn search(text: impl Into<String>) -> Self {
        ItemFilter {
            search: text.into(),
            ..Default::default()
        }
    }

    pub fn matches(&self, item: &ItemRef<'_>) -> bool {
        self.matches_search(item)
            && self.matches_event_fields(item)
            && self.matches_date(item)
    }

    fn matches_search(&self, item: &ItemRef<'_>) -> bool {
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        item.title().to_lowercase().contains(&needle)
            || item
                .description()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    fn matches_event_fields(&self, item: &ItemRef<'_>) -> bool {
        match item {
            ItemRef::Event(event) => {
                self.category.is_none_or(|c| event.category == c)
                    && self.event_type.is_none_or(|t| event.event_type == t)
            }
            ItemRef::Task(_) | ItemRef::Birthday(_) => true,
        }
    }

    fn matches_date(&self, item: &ItemRef<'_>) -> bool {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(date) => item.anchor_iso().starts_with(date),
        }
    }
}

fn sorted_by_anchor(mut items: Vec<ItemRef<'_>>) -> Vec<ItemRef<'_>> {
    items.sort_by_key(|item| item.anchor());
    items
}

/// Every item matching `filter`, as one list sorted by anchor.
pub fn visible_items<'a>(collections: &'a Collections, filter: &ItemFilter) -> Vec<ItemRef<'a>> {
    sorted_by_anchor(collections.iter().filter(|item| filter.matches(item)).collect())
}

pub fn favorite_items(collections: &Collections) -> Vec<ItemRef<'_>> {
    sorted_by_anchor(collections.iter().filter(|item| item.is_favorite()).collect())
}
