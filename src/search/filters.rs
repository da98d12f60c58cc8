use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Filters that can be applied to a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilterKey {
    Tags,
    Locations,
    Kind,
    Name,
    Extension,
    Hidden,
}

impl SearchFilterKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchFilterKey::Tags => "tags",
            SearchFilterKey::Locations => "locations",
            SearchFilterKey::Kind => "kind",
            SearchFilterKey::Name => "name",
            SearchFilterKey::Extension => "extension",
            SearchFilterKey::Hidden => "hidden",
        }
    }

    /// Key with its first letter upper-cased, as shown on a chip.
    pub fn title(&self) -> String {
        let key = self.as_str();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn icon(&self) -> FilterIcon {
        match self {
            SearchFilterKey::Tags => FilterIcon::CircleDashed,
            SearchFilterKey::Kind => FilterIcon::Cube,
            SearchFilterKey::Name | SearchFilterKey::Extension => FilterIcon::Textbox,
            SearchFilterKey::Hidden => FilterIcon::SelectionSlash,
            SearchFilterKey::Locations => FilterIcon::Folder,
        }
    }
}

impl fmt::Display for SearchFilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterIcon {
    CircleDashed,
    Cube,
    Textbox,
    SelectionSlash,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagItem {
    pub id: i64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationItem {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindItem {
    pub id: i64,
    pub name: String,
    pub icon: String,
}

/// An applied filter together with its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter", content = "value", rename_all = "lowercase")]
pub enum AppliedFilter {
    Tags(Vec<TagItem>),
    Locations(Vec<LocationItem>),
    Kind(Vec<KindItem>),
    Name(Vec<String>),
    Extension(Vec<String>),
    Hidden(bool),
}

impl AppliedFilter {
    pub fn key(&self) -> SearchFilterKey {
        match self {
            AppliedFilter::Tags(_) => SearchFilterKey::Tags,
            AppliedFilter::Locations(_) => SearchFilterKey::Locations,
            AppliedFilter::Kind(_) => SearchFilterKey::Kind,
            AppliedFilter::Name(_) => SearchFilterKey::Name,
            AppliedFilter::Extension(_) => SearchFilterKey::Extension,
            AppliedFilter::Hidden(_) => SearchFilterKey::Hidden,
        }
    }

    /// What the chip shows for this value.
    pub fn chip_value(&self) -> ChipValue {
        match self {
            AppliedFilter::Tags(tags) => {
                ChipValue::Swatches(tags.iter().map(|tag| tag.color.clone()).collect())
            }
            AppliedFilter::Locations(locations) => {
                ChipValue::Label(count_or_single(locations, "locations", |l| &l.name))
            }
            AppliedFilter::Kind(kinds) => ChipValue::Kinds {
                icons: kinds.iter().map(|kind| kind.icon.clone()).collect(),
                label: count_or_single(kinds, "kinds", |k| &k.name),
            },
            AppliedFilter::Name(names) => ChipValue::Label(count_or_single(names, "names", |n| n)),
            AppliedFilter::Extension(extensions) => {
                ChipValue::Label(count_or_single(extensions, "extensions", |e| e))
            }
            AppliedFilter::Hidden(true) => ChipValue::Label(Some("Hidden".to_string())),
            AppliedFilter::Hidden(false) => ChipValue::Label(None),
        }
    }
}

fn count_or_single<T>(items: &[T], noun: &str, label: impl Fn(&T) -> &String) -> Option<String> {
    match items {
        [] => None,
        [single] => Some(label(single).clone()),
        many => Some(format!("{} {}", many.len(), noun)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipValue {
    /// Tag colors
    Swatches(Vec<String>),
    Kinds { icons: Vec<String>, label: Option<String> },
    Label(Option<String>),
}

/// Read-only view of one applied filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub key: SearchFilterKey,
    pub title: String,
    pub icon: FilterIcon,
    pub value: ChipValue,
}

/// The search state the filter bar reads from and resets through.
pub trait SearchStore {
    fn applied_filters(&self) -> &BTreeMap<SearchFilterKey, AppliedFilter>;

    /// Clear `key`; `cascade` also clears the pending (unapplied) value.
    fn reset_filter(&mut self, key: SearchFilterKey, cascade: bool);
}

/// One chip per applied filter, ordered by key.
pub fn filter_chips<S: SearchStore + ?Sized>(store: &S) -> Vec<FilterChip> {
    store
        .applied_filters()
        .iter()
        .map(|(key, filter)| FilterChip {
            key: *key,
            title: key.title(),
            icon: key.icon(),
            value: filter.chip_value(),
        })
        .collect()
}

/// Dismiss a chip.
pub fn dismiss_chip<S: SearchStore + ?Sized>(store: &mut S, key: SearchFilterKey) {
    store.reset_filter(key, true);
}
