// File: src/tree/manifest.rs
// Purpose: Ordered manifest of virtual file keys fed to the tree builder

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::route::LoaderRef;

/// Static settings a layout declares for its navigator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route_name: Option<String>,

    /// Group name → initial route used when the layout is mounted under that group
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub groups: HashMap<String, String>,
}

impl LayoutSettings {
    pub fn with_initial_route(mut self, route: impl Into<String>) -> Self {
        self.initial_route_name = Some(route.into());
        self
    }

    pub fn with_group_initial_route(
        mut self,
        group: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        self.groups.insert(group.into(), route.into());
        self
    }
}

/// One manifest value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub loader: LoaderRef,
    pub settings: Option<LayoutSettings>,
}

impl ManifestEntry {
    pub fn new(loader: LoaderRef) -> Self {
        Self {
            loader,
            settings: None,
        }
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Insertion-ordered mapping from virtual file key to [`ManifestEntry`]
///
/// Keys are stored with a leading `./`. Re-inserting a key replaces its
/// entry in place.
///
/// ```
/// use rhtmx_route_tree::Manifest;
///
/// let manifest: Manifest = ["index.tsx", "./about.tsx"].into_iter().collect();
/// let keys: Vec<&str> = manifest.keys().collect();
/// assert_eq!(keys, vec!["./index.tsx", "./about.tsx"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, ManifestEntry)>,
    /// Key → position in `entries`
    positions: HashMap<String, usize>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, entry: ManifestEntry) {
        let key = normalize_key(key);
        match self.positions.get(&key) {
            Some(&position) => self.entries[position].1 = entry,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, entry));
            }
        }
    }

    /// Adds a file whose loader reference is its own key
    pub fn with_file(mut self, key: &str) -> Self {
        let entry = ManifestEntry::new(LoaderRef::new(normalize_key(key)));
        self.insert(key, entry);
        self
    }

    pub fn with_entry(mut self, key: &str, entry: ManifestEntry) -> Self {
        self.insert(key, entry);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.positions
            .get(&normalize_key(key))
            .map(|&position| &self.entries[position].1)
    }

    pub fn settings(&self, key: &str) -> Option<&LayoutSettings> {
        self.get(key).and_then(|entry| entry.settings.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for Manifest {
    fn from_iter<I: IntoIterator<Item = &'a str>>(keys: I) -> Self {
        keys.into_iter()
            .fold(Manifest::new(), |manifest, key| manifest.with_file(key))
    }
}

fn normalize_key(key: &str) -> String {
    if key.starts_with("./") {
        key.to_string()
    } else {
        format!("./{}", key.trim_start_matches('/'))
    }
}
