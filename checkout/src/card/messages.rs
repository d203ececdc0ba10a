use std::collections::HashMap;

use super::RejectionReason;

/// Renders the payer-facing text for a rejection.
pub trait MessageCatalog: Send + Sync {
    fn message(&self, locale: &str, reason: RejectionReason, brand: Option<&str>) -> String;
}

/// Templates for one locale. `%s` is replaced by the display brand.
#[derive(Debug, Clone)]
pub struct Templates {
    pub number_incorrect_length: &'static str,
    pub number_invalid: &'static str,
    pub unsupported_brand: &'static str,
    pub unsupported_debit_card: &'static str,
    pub unsupported_credit_card: &'static str,
    pub card_not_supported: &'static str,
}

impl Templates {
    pub const ENGLISH: Templates = Templates {
        number_incorrect_length: "Card number is not the correct length",
        number_invalid: "Enter a valid card number",
        unsupported_brand: "%s is not supported",
        unsupported_debit_card: "%s debit cards are not supported",
        unsupported_credit_card: "%s credit cards are not supported",
        card_not_supported: "Your card is not supported",
    };

    fn template(&self, reason: RejectionReason) -> &'static str {
        match reason {
            RejectionReason::NumberLengthInvalid => self.number_incorrect_length,
            RejectionReason::LuhnInvalid => self.number_invalid,
            RejectionReason::BrandUnsupported => self.unsupported_brand,
            RejectionReason::UnsupportedForDebit => self.unsupported_debit_card,
            RejectionReason::UnsupportedForCredit => self.unsupported_credit_card,
            RejectionReason::CardNotSupported => self.card_not_supported,
        }
    }
}

/// In-memory catalog keyed by locale. Unknown locales fall back to English.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    locales: HashMap<String, Templates>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl StaticCatalog {
    pub fn english() -> Self {
        let mut locales = HashMap::new();
        locales.insert("en".to_string(), Templates::ENGLISH);
        Self { locales }
    }

    pub fn with_locale(mut self, locale: impl Into<String>, templates: Templates) -> Self {
        self.locales.insert(locale.into(), templates);
        self
    }
}

impl MessageCatalog for StaticCatalog {
    fn message(&self, locale: &str, reason: RejectionReason, brand: Option<&str>) -> String {
        let templates = self.locales.get(locale).unwrap_or(&Templates::ENGLISH);
        let template = templates.template(reason);
        match brand {
            Some(brand) => template.replace("%s", brand),
            None => template.to_string(),
        }
    }
}
