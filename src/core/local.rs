use super::category::resolve_category;
use super::message::{BotReply, ChatMessage, ReplySource};
use crate::catalog::{Catalog, ProductRecord};

/// Products whose category overlaps `label` in either direction, or equals
/// the category the label resolves to. Deliberately loose: a short label can
/// pull in other categories.
pub fn products_for_category(catalog: &Catalog, label: &str) -> Vec<ProductRecord> {
    let lower_label = label.to_lowercase();
    let resolved = resolve_category(label);

    catalog
        .get_all()
        .iter()
        .filter(|product| {
            let lower_category = product.category.to_lowercase();
            lower_category.contains(&lower_label)
                || lower_label.contains(&lower_category)
                || resolved.is_some_and(|name| product.category == name)
        })
        .cloned()
        .collect()
}

/// Stable ascending sort by effective price, so ties keep catalog order.
pub fn sort_by_price(products: &mut [ProductRecord]) {
    products.sort_by(|a, b| a.effective_price().total_cmp(&b.effective_price()));
}

/// Product-list reply for a tapped category, or `None` when nothing matches.
pub fn build_category_reply(catalog: &Catalog, label: &str) -> Option<BotReply> {
    let mut products = products_for_category(catalog, label);
    if products.is_empty() {
        return None;
    }
    sort_by_price(&mut products);

    let summary = format!(
        "I found {} premium products in the {} category for you:",
        products.len(),
        label
    );
    log::debug!("🛍️ {} products listed for {}", products.len(), label);

    Some(BotReply {
        message: ChatMessage::product_list(summary, products),
        source: ReplySource::Local,
    })
}

/// Short tip shown above a product list, keyed off the first product.
pub fn category_tip(products: &[ProductRecord]) -> String {
    let Some(first) = products.first() else {
        return "Here are some products you might like!".to_string();
    };

    let category = first.category.to_lowercase();
    if category.contains("hair") {
        "Tip: For strong, healthy hair, our 18 Herbs collection is highly recommended.".to_string()
    } else if category.contains("skin") {
        "Tip: For glowing results, combine our face wash with a specialized serum.".to_string()
    } else if category.contains("oral") || category.contains("mouth") {
        "Tip: Our mouth solutions are designed for complete oral hygiene.".to_string()
    } else {
        format!("Explore these premium options from our {} collection!", first.category)
    }
}
