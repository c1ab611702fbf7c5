//! Product cards and the registry captured at startup.
//!
//! Cards are plain data. The host keeps the presentation element for each
//! card and addresses it by [`CardSlot`], the card's position in document
//! order at capture time.

use core::cmp::Ordering;

/// Position of a card in the registry (document order at capture time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardSlot(pub usize);

/// Price parsed from the card's decimal price attribute.
///
/// Parsing is lenient like `parseFloat`: surrounding whitespace is ignored
/// and the longest numeric prefix wins (`"12.50 ₽"` reads as `12.5`,
/// `"-Infinity"` as negative infinity). Anything without a numeric prefix
/// is unparsable and stored as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// Parse a decimal price string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(parse_decimal_prefix(raw.trim()).unwrap_or(f64::NAN))
    }

    /// Wrap an already numeric price.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        !self.0.is_nan()
    }

    /// Ascending order with unparsable prices after every valid one.
    #[must_use]
    pub fn cmp_ascending(self, other: Self) -> Ordering {
        match (self.is_valid(), other.is_valid()) {
            (true, true) => self.0.total_cmp(&other.0),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    }

    /// Descending order; unparsable prices still come last.
    #[must_use]
    pub fn cmp_descending(self, other: Self) -> Ordering {
        match (self.is_valid(), other.is_valid()) {
            (true, true) => other.0.total_cmp(&self.0),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    }
}

fn parse_decimal_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let inf = if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(inf);
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    // Optional exponent, only taken when it is complete.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// One product card.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: Price,
}

impl ProductCard {
    /// Build a card from the raw attribute values found in markup.
    #[must_use]
    pub fn from_markup(id: &str, title: &str, category: &str, raw_price: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            price: Price::parse(raw_price),
        }
    }
}

/// Immutable snapshot of every card discovered at startup.
///
/// Cards added to the page later are never seen here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardRegistry {
    cards: Vec<ProductCard>,
}

impl CardRegistry {
    #[must_use]
    pub fn new(cards: Vec<ProductCard>) -> Self {
        Self { cards }
    }

    /// All cards in capture order.
    #[must_use]
    pub fn all(&self) -> &[ProductCard] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, slot: CardSlot) -> Option<&ProductCard> {
        self.cards.get(slot.0)
    }

    /// Slot of the first card carrying `id`.
    #[must_use]
    pub fn slot_of(&self, id: &str) -> Option<CardSlot> {
        self.cards.iter().position(|c| c.id == id).map(CardSlot)
    }

    /// Every slot in capture order.
    pub fn slots(&self) -> impl Iterator<Item = CardSlot> + '_ {
        (0..self.cards.len()).map(CardSlot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
