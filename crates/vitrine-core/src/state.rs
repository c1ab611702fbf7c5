//! View state: active page, sort mode, category filter, search text.

use core::fmt;

/// Filter value meaning "no category exclusion".
pub const FILTER_ALL: &str = "all";

/// Card ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    /// Registry order after filtering.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    /// Value used in markup (`data-sort`) and in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Parse a stored or clicked value. Unknown values mean [`SortMode::Default`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Default,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category filter: everything, or one exact category id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a stored or clicked value. Empty text means [`CategoryFilter::All`],
    /// since an empty stored value reads back as absent.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == FILTER_ALL {
            Self::All
        } else {
            Self::Category(raw.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Category(c) => c,
        }
    }

    /// Whether a card of `category` passes the filter. Matching is exact.
    #[must_use]
    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the shopper chose about what to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub page: String,
    pub sort: SortMode,
    pub filter: CategoryFilter,
    /// Raw search text as typed; trimming happens when filtering.
    pub search: String,
}

impl ViewState {
    /// Startup defaults: home page, registry order, no filter, no search.
    #[must_use]
    pub fn new(home_page: impl Into<String>) -> Self {
        Self {
            page: home_page.into(),
            sort: SortMode::Default,
            filter: CategoryFilter::All,
            search: String::new(),
        }
    }

    /// Normalized query, `None` when the search text is blank.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}
