//! The category catalog: which moods exist and what each one says.
//!
//! Structure:
//! - Constants: built-in content and default locations
//! - Type: `Catalog`, an ordered key -> `Category` table
//! - Pure functions: lookup, validation, JSON decoding
//! - Effect functions: file loading, source resolution

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;
use crate::types::{Category, CategorySummary};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Category shown first when nothing else was requested.
pub const DEFAULT_CATEGORY: &str = "happy";

/// Catalog filename inside the per-user config directory.
pub const CATALOG_FILENAME: &str = "catalog.json";

/// Application directory name under the platform config dir.
pub const APP_DIR: &str = "enchanted-moods";

/// (key, icon, name, button icon, variants)
type BuiltinEntry = (&'static str, &'static str, &'static str, &'static str, &'static [&'static str]);

const BUILTIN: &[BuiltinEntry] = &[
    (
        "happy",
        "🦄",
        "Unicorn",
        "😊",
        &[
            "\"Joy is a little spell — may it sparkle around you today.\"",
            "\"Laughter is the loudest kind of magic.\"",
            "\"Carry your light lightly; it travels farther that way.\"",
            "\"Today the meadow hums your name.\"",
            "\"Share the glow, it grows when given away.\"",
        ],
    ),
    (
        "sad",
        "🦉",
        "Wise Owl",
        "😔",
        &[
            "\"It is okay to be still — soft nights bring new mornings.\"",
            "\"Even the moon has quiet phases.\"",
            "\"Tears water the seeds you cannot see yet.\"",
            "\"Rest your wings. The branch will hold you.\"",
            "\"Heavy hearts are brave hearts too.\"",
        ],
    ),
    (
        "anxious",
        "🔥",
        "Phoenix",
        "😰",
        &[
            "\"Breathe like a slow tide. Each small breath is a quiet spell.\"",
            "\"One ember at a time is still a fire.\"",
            "\"You have risen before. The ashes remember.\"",
            "\"Name five things you can see. The world is still here.\"",
            "\"Worry is a storm cloud, not the whole sky.\"",
        ],
    ),
    (
        "excited",
        "🐲",
        "Dragon",
        "🤩",
        &[
            "\"Carry this ember of excitement — let it brighten new doors.\"",
            "\"Spread your wings; the sky was made for this.\"",
            "\"Big adventures start with a single roar.\"",
            "\"Let the spark lead, and follow it gladly.\"",
            "\"Treasure is found by those who go looking.\"",
        ],
    ),
    (
        "calm",
        "🦅",
        "Forest Hawk",
        "😌",
        &[
            "\"Stillness holds gentle power. You are steady and enough.\"",
            "\"From high above, every path looks kind.\"",
            "\"The forest does not hurry, yet everything grows.\"",
            "\"Glide on the quiet wind of this moment.\"",
            "\"Calm water shows the clearest sky.\"",
        ],
    ),
];

// ============================================================================
// TYPE
// ============================================================================

/// Ordered mapping from category key to [`Category`].
///
/// Order is the display order (picker, dock, `list`). Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, Category)>,
}

impl Catalog {
    /// The five built-in moods.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(key, icon, name, button, variants)| {
                let category = Category {
                    icon: icon.to_string(),
                    name: name.to_string(),
                    variants: variants.iter().map(|v| v.to_string()).collect(),
                    accent: key.to_string(),
                    button_icon: button.to_string(),
                };
                (key.to_string(), category)
            })
            .collect();
        Catalog { entries }
    }

    /// Build a catalog from ordered entries, validating them.
    pub fn from_entries(entries: Vec<(String, Category)>) -> Result<Self, CatalogError> {
        let catalog = Catalog { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Decode and validate a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, decode and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        tracing::info!(
            "loaded {} categories from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Check structural rules: non-empty, unique non-blank keys, named categories.
    ///
    /// Empty variant lists are allowed (the rotation yields empty strings)
    /// but are logged.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, (key, category)) in self.entries.iter().enumerate() {
            if key.trim().is_empty() {
                return Err(CatalogError::BlankKey);
            }
            if self.entries[..i].iter().any(|(k, _)| k == key) {
                return Err(CatalogError::DuplicateKey(key.clone()));
            }
            if category.name.trim().is_empty() {
                return Err(CatalogError::BlankName(key.clone()));
            }
            if category.variants.is_empty() {
                tracing::warn!("category '{}' has no variants", key);
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Display index of a key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Key at a display index.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// [`DEFAULT_CATEGORY`] when present, otherwise the first key.
    pub fn default_key(&self) -> Option<&str> {
        if self.get(DEFAULT_CATEGORY).is_some() {
            Some(DEFAULT_CATEGORY)
        } else {
            self.key_at(0)
        }
    }

    /// One summary row per category, for listing.
    pub fn summaries(&self) -> Vec<CategorySummary> {
        self.iter()
            .map(|(key, c)| CategorySummary {
                key: key.to_string(),
                icon: c.icon.clone(),
                name: c.name.clone(),
                accent: c.accent.clone(),
                variant_count: c.variants.len(),
            })
            .collect()
    }
}

// ============================================================================
// SERDE (JSON object, document order preserved)
// ============================================================================

impl Serialize for Catalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, category) in &self.entries {
            map.serialize_entry(key, category)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping category keys to category records")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, category)) = access.next_entry::<String, Category>()? {
            entries.push((key, category));
        }
        Ok(Catalog { entries })
    }
}

// ============================================================================
// SOURCE RESOLUTION
// ============================================================================

/// Default catalog location: `<config dir>/enchanted-moods/catalog.json`.
pub fn default_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CATALOG_FILENAME))
}

/// Pick the catalog to use.
///
/// An explicit path must load. Otherwise the default location is used if
/// the file exists, falling back to the built-in catalog.
pub fn resolve_catalog(explicit: Option<&Path>) -> Result<Catalog, CatalogError> {
    if let Some(path) = explicit {
        return Catalog::load(path);
    }

    match default_catalog_path() {
        Some(path) if path.is_file() => Catalog::load(&path),
        _ => {
            tracing::debug!("using built-in catalog");
            Ok(Catalog::builtin())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
