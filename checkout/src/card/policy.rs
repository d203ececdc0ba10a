use serde::{Deserialize, Serialize};

use super::descriptor::{CardDescriptor, CardType};

/// One brand a merchant accepts, and for which withdrawal types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedCardRule {
    pub brand: String,
    pub debit: bool,
    pub credit: bool,
}

impl AllowedCardRule {
    pub fn new(brand: impl Into<String>, debit: bool, credit: bool) -> Self {
        Self {
            brand: brand.into(),
            debit,
            credit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalType {
    Debit,
    Credit,
}

/// A merchant's accepted card matrix. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedCards {
    rules: Vec<AllowedCardRule>,
}

impl AllowedCards {
    pub fn new(rules: Vec<AllowedCardRule>) -> Self {
        Self { rules }
    }

    /// Folds per-type entries (`visa`/DEBIT, `visa`/CREDIT, ...) into one rule per brand.
    pub fn from_card_types<'a>(entries: impl IntoIterator<Item = (&'a str, CardType)>) -> Self {
        let mut rules: Vec<AllowedCardRule> = Vec::new();
        for (brand, card_type) in entries {
            let index = match rules.iter().position(|rule| rule.brand == brand) {
                Some(index) => index,
                None => {
                    rules.push(AllowedCardRule::new(brand, false, false));
                    rules.len() - 1
                }
            };
            let rule = &mut rules[index];
            match card_type {
                CardType::Debit => rule.debit = true,
                CardType::Credit => rule.credit = true,
                CardType::CreditOrDebit => {
                    rule.debit = true;
                    rule.credit = true;
                }
                CardType::Unknown => {}
            }
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[AllowedCardRule] {
        &self.rules
    }

    /// Brands with at least one withdrawal type enabled.
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|rule| rule.debit || rule.credit)
            .map(|rule| rule.brand.as_str())
    }

    /// Withdrawal types offered by at least one rule, debit first.
    pub fn withdrawal_types(&self) -> Vec<WithdrawalType> {
        let mut types = Vec::with_capacity(2);
        if self.rules.iter().any(|rule| rule.debit) {
            types.push(WithdrawalType::Debit);
        }
        if self.rules.iter().any(|rule| rule.credit) {
            types.push(WithdrawalType::Credit);
        }
        types
    }

    pub fn accepts_brand(&self, card: &CardDescriptor) -> bool {
        self.rules.iter().any(|rule| matches_brand(rule, card))
    }

    pub fn accepts_brand_and_type(&self, card: &CardDescriptor) -> bool {
        self.rules.iter().any(|rule| matches_brand_and_type(rule, card))
    }
}

pub fn matches_brand(rule: &AllowedCardRule, card: &CardDescriptor) -> bool {
    rule.brand == card.brand
}

/// `Unknown` never matches on type.
pub fn matches_brand_and_type(rule: &AllowedCardRule, card: &CardDescriptor) -> bool {
    matches_brand(rule, card)
        && match card.card_type {
            CardType::Debit => rule.debit,
            CardType::Credit => rule.credit,
            CardType::CreditOrDebit => rule.debit || rule.credit,
            CardType::Unknown => false,
        }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(brand: &str, card_type: CardType) -> CardDescriptor {
        CardDescriptor {
            brand: brand.to_string(),
            card_type,
            corporate: false,
            prepaid: false,
        }
    }

    #[test]
    fn test_withdrawal_types_debit_then_credit() {
        let allowed = AllowedCards::new(vec![
            AllowedCardRule::new("visa", false, true),
            AllowedCardRule::new("master-card", true, false),
        ]);
        assert_eq!(
            allowed.withdrawal_types(),
            vec![WithdrawalType::Debit, WithdrawalType::Credit]
        );
    }

    #[test]
    fn test_withdrawal_types_credit_only() {
        let allowed = AllowedCards::new(vec![AllowedCardRule::new("visa", false, true)]);
        assert_eq!(allowed.withdrawal_types(), vec![WithdrawalType::Credit]);
        assert!(AllowedCards::default().withdrawal_types().is_empty());
    }

    #[test]
    fn test_from_card_types_merges_per_brand() {
        let allowed = AllowedCards::from_card_types([
            ("visa", CardType::Debit),
            ("master-card", CardType::Credit),
            ("visa", CardType::Credit),
        ]);
        assert_eq!(
            allowed.rules(),
            &[
                AllowedCardRule::new("visa", true, true),
                AllowedCardRule::new("master-card", false, true),
            ]
        );
    }

    #[test]
    fn test_brand_and_type_predicates() {
        let rule = AllowedCardRule::new("visa", true, false);
        assert!(matches_brand(&rule, &card("visa", CardType::Credit)));
        assert!(!matches_brand(&rule, &card("master-card", CardType::Debit)));
        assert!(matches_brand_and_type(&rule, &card("visa", CardType::Debit)));
        assert!(!matches_brand_and_type(&rule, &card("visa", CardType::Credit)));
        assert!(matches_brand_and_type(&rule, &card("visa", CardType::CreditOrDebit)));
        assert!(!matches_brand_and_type(&rule, &card("visa", CardType::Unknown)));
    }

    #[test]
    fn test_deserializes_from_rule_list() {
        let allowed: AllowedCards = serde_json::from_str(
            r#"[{"brand":"american-express","debit":false,"credit":true}]"#,
        )
        .unwrap();
        assert_eq!(allowed.brands().collect::<Vec<_>>(), vec!["american-express"]);
    }

    #[test]
    fn test_brands_skip_rules_with_no_withdrawal_type() {
        let allowed = AllowedCards::new(vec![
            AllowedCardRule::new("visa", false, false),
            AllowedCardRule::new("jcb", true, false),
        ]);
        assert_eq!(allowed.brands().collect::<Vec<_>>(), vec!["jcb"]);
    }
}
