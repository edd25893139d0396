//! Canned answers used whenever the completion service can't answer.

pub const GENERIC_FALLBACK: &str = "Sorry, I'm having trouble reaching the assistant right now. \
Meanwhile, you can browse categories or visit: https://pakeezaproducts.store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRule {
    /// Lower-case substrings; any one of them selects the rule.
    pub triggers: &'static [&'static str],
    pub response: &'static str,
}

/// Checked top to bottom, first hit wins.
pub const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        triggers: &["hi", "hello", "hey", "salaam", "assalam"],
        response: "Hello! Welcome to Pakeeza Products. How can I help you today? \
You can browse categories or ask about a product.",
    },
    FallbackRule {
        triggers: &["price", "how much", "cost", "price of"],
        response: "You can check product prices by asking for a category like \"Hair Care\" \
or visit: https://pakeezaproducts.store",
    },
    FallbackRule {
        triggers: &["products", "what do you have", "catalog", "show products"],
        response: "We offer Hair Care, Skin Care, Anti-Aging, Serums and more. \
Choose a category above to see products.",
    },
    FallbackRule {
        triggers: &["order", "buy", "purchase"],
        response: "To purchase, open the product link after selecting a category \
or visit: https://pakeezaproducts.store",
    },
    FallbackRule {
        triggers: &["contact", "support", "help", "address", "email", "phone", "call"],
        response: "📍 Address: G-15 Ground Floor, Heaven Mall Zarrar Shaheed Road Lahore Cantt.\n\
📞 Call: 03006333999\n\
✉️ Email: info@pakeezaproducts.store",
    },
    FallbackRule {
        triggers: &["thanks", "thank you", "thx"],
        response: "You're welcome! Explore our Hair Care, Skin Care, and Oral Care collections.",
    },
    FallbackRule {
        triggers: &["bye", "goodbye", "see you"],
        response: "Goodbye! Feel free to come back if you need more help.",
    },
    FallbackRule {
        triggers: &["what can you do", "help me", "default"],
        response: "I can help you find products. Try selecting a category like \"Skin Care\" \
or ask \"show me serums\".",
    },
];

pub fn fallback(user_text: &str) -> &'static str {
    if user_text.is_empty() {
        return GENERIC_FALLBACK;
    }

    let lower = user_text.to_lowercase();
    FALLBACK_RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|trigger| lower.contains(trigger)))
        .map_or(GENERIC_FALLBACK, |rule| rule.response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unknown_text_get_generic_message() {
        assert_eq!(fallback(""), GENERIC_FALLBACK);
        assert_eq!(fallback("zzrandomgarbage"), GENERIC_FALLBACK);
    }

    #[test]
    fn greeting() {
        assert_eq!(fallback("hello"), FALLBACK_RULES[0].response);
        assert_eq!(fallback("Assalam o alaikum"), FALLBACK_RULES[0].response);
    }

    #[test]
    fn address_question_gets_contact_info() {
        let reply = fallback("what is your address");
        assert_eq!(reply, FALLBACK_RULES[4].response);
        assert!(reply.contains("03006333999"));
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // "help me" is also a contact trigger ("help"), which is declared first
        assert_eq!(fallback("help me"), FALLBACK_RULES[4].response);
        // "this" contains "hi"
        assert_eq!(fallback("how much is this"), FALLBACK_RULES[0].response);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(fallback("THANK YOU"), FALLBACK_RULES[5].response);
        assert_eq!(fallback("Goodbye"), FALLBACK_RULES[6].response);
    }
}
