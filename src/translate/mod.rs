//! Maven coordinate → Soong module name translation.
//!
//! A coordinate `group:artifact` becomes the raw name `group_artifact`. The
//! alias table renames raw names that AOSP already ships under another name
//! (e.g. `com.google.guava_listenablefuture` → `guava`), and the ignore set
//! drops raw names that must never be linked (e.g. `kotlin-stdlib-common`).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ─── Coordinate ────────────────────────────────────────────────────

/// A version-less Maven coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// `group_artifact`, the name before any alias is applied.
    pub fn raw_name(&self) -> String {
        format!("{}_{}", self.group, self.artifact)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

// ─── Tables ────────────────────────────────────────────────────────

/// Raw name → module name already available in the platform tree.
#[derive(Clone, Debug, Default)]
pub struct AliasTable(BTreeMap<String, String>);

impl AliasTable {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.0.get(raw).map(String::as_str)
    }

    /// The aliased name, or `raw` itself when there is no entry.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.get(raw).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw names that are never emitted as links.
#[derive(Clone, Debug, Default)]
pub struct IgnoreSet(BTreeSet<String>);

impl IgnoreSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.0.contains(raw)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ─── Translator ────────────────────────────────────────────────────

/// Pure coordinate translation over an alias table and an ignore set.
#[derive(Clone, Debug, Default)]
pub struct Translator {
    aliases: AliasTable,
    ignore: IgnoreSet,
}

impl Translator {
    pub fn new(aliases: AliasTable, ignore: IgnoreSet) -> Self {
        Self { aliases, ignore }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Translate a coordinate to a module name. `None` means the dependency
    /// is ignored and must be left out entirely.
    pub fn translate(&self, coordinate: &Coordinate) -> Option<String> {
        let raw = coordinate.raw_name();
        if self.ignore.contains(&raw) {
            return None;
        }
        Some(self.aliases.resolve(&raw).to_string())
    }
}
