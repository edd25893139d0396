//! Plain-text rendering of chat messages for the terminal.

use crate::catalog::ProductRecord;
use crate::core::local::category_tip;
use crate::core::{ChatMessage, Sender};

pub const THINKING_LINE: &str = "⏳ Thinking...";
const SEPARATOR: &str = "  ────────────────";

pub fn render_message(message: &ChatMessage, assistant_name: &str) -> String {
    match message.sender {
        Sender::User => format!("You: {}", message.text),
        Sender::Bot if message.is_product_message => {
            format!("{}: {}\n{}", assistant_name, message.text, render_products(&message.products))
        }
        Sender::Bot => format!("{}: {}", assistant_name, message.text),
    }
}

/// Tip line followed by one block per product.
pub fn render_products(products: &[ProductRecord]) -> String {
    let mut out = format!("  {}\n", category_tip(products));

    for (i, product) in products.iter().enumerate() {
        out.push_str(&format!("  • {}\n", product.title));
        out.push_str(&format!("    {}\n", render_price(product)));
        out.push_str(&format!("    {}\n", product.link));
        if i + 1 < products.len() {
            out.push_str(SEPARATOR);
            out.push('\n');
        }
    }

    out
}

fn render_price(product: &ProductRecord) -> String {
    match product.discounted_price.as_deref() {
        Some(discounted) if product.has_discount() => {
            format!("{} (was {})", discounted, strike(&product.price))
        }
        _ => product.price.clone(),
    }
}

/// Combining long stroke overlay, the terminal stand-in for a struck price.
fn strike(text: &str) -> String {
    text.chars().flat_map(|c| [c, '\u{0336}']).collect()
}

pub fn render_options(options: &[&str]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("  /{} {}", i + 1, option))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(discounted: Option<&str>) -> ProductRecord {
        ProductRecord {
            title: "Hair Oil".into(),
            category: "Hair Care".into(),
            price: "Rs 500".into(),
            discounted_price: discounted.map(Into::into),
            link: "https://pakeezaproducts.store/products/hair-oil".into(),
        }
    }

    #[test]
    fn discounted_products_show_both_prices() {
        let rendered = render_products(&[product(Some("Rs 400"))]);
        assert!(rendered.contains("Rs 400 (was "));
        assert!(rendered.contains("18 Herbs"));
        assert!(rendered.contains("https://pakeezaproducts.store/products/hair-oil"));
    }

    #[test]
    fn undiscounted_products_show_list_price() {
        let rendered = render_products(&[product(None), product(Some("Rs 500"))]);
        assert_eq!(rendered.matches("    Rs 500\n").count(), 2);
        assert_eq!(rendered.matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn messages_are_prefixed_by_speaker() {
        assert_eq!(render_message(&ChatMessage::user("hi"), "Bot"), "You: hi");
        assert_eq!(render_message(&ChatMessage::bot("hello"), "Bot"), "Bot: hello");
    }

    #[test]
    fn options_are_numbered_from_one() {
        assert_eq!(render_options(&["A", "B"]), "  /1 A\n  /2 B");
    }
}
