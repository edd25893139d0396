use serde::{Deserialize, Serialize};

/// One purchasable item as it appears in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,
    pub category: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<String>,
    pub link: String,
}

impl ProductRecord {
    /// Discounted price when one is set, otherwise the list price.
    /// An empty discounted price counts as no discount.
    pub fn effective_price_label(&self) -> &str {
        match self.discounted_price.as_deref() {
            Some(discounted) if !discounted.is_empty() => discounted,
            _ => &self.price,
        }
    }

    pub fn effective_price(&self) -> f64 {
        parse_price(self.effective_price_label())
    }

    pub fn has_discount(&self) -> bool {
        matches!(
            self.discounted_price.as_deref(),
            Some(discounted) if !discounted.is_empty() && discounted != self.price
        )
    }
}

/// Reads a currency-formatted price such as `"Rs 1,250"`.
///
/// Everything except digits and `.` is dropped, then the leading numeric
/// run is parsed. Anything unreadable counts as `0`.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    // "1.2.3" reads as 1.2
    let end = cleaned
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map_or(cleaned.len(), |(i, _)| i);

    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}
