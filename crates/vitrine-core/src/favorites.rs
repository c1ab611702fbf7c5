//! Favorite product ids and the badge derived from them.

use tracing::warn;

use crate::config::BadgeStyle;

/// What a [`FavoriteSet::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Insertion-ordered set of favorite product ids.
///
/// Removing an id remembers where it sat; toggling the same id straight back
/// puts it there again, so a double toggle leaves the set (and its stored
/// form) exactly as it was. The position lives in memory only: a set decoded
/// from storage has none, and a re-added id goes to the end.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: Vec<String>,
    last_removed: Option<(String, usize)>,
}

impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for FavoriteSet {}

impl FavoriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ids, dropping repeats after the first occurrence.
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Decode the persisted form (a JSON array of strings).
    ///
    /// Anything else decodes to the empty set.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(ids) => Self::from_ids(ids),
            Err(err) => {
                warn!(error = %err, "ignoring malformed favorites");
                Self::new()
            }
        }
    }

    /// Encode as a JSON array of strings.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.ids.clone()).to_string()
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &str) -> Toggled {
        match self.ids.iter().position(|f| f == id) {
            Some(idx) => {
                let removed = self.ids.remove(idx);
                self.last_removed = Some((removed, idx));
                Toggled::Removed
            }
            None => {
                match self.last_removed.take() {
                    Some((last, idx)) if last == id => {
                        self.ids.insert(idx.min(self.ids.len()), last);
                    }
                    _ => self.ids.push(id.to_string()),
                }
                Toggled::Added
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Counter text, accessible label, and color for the favorites badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeState {
    pub count: usize,
    pub label: String,
    pub color: String,
}

impl BadgeState {
    #[must_use]
    pub fn from_count(count: usize, style: &BadgeStyle) -> Self {
        let color = if count > 0 {
            &style.active_color
        } else {
            &style.idle_color
        };
        Self {
            count,
            label: style.label_template.replace("{count}", &count.to_string()),
            color: color.clone(),
        }
    }
}
