use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Debit,
    Credit,
    CreditOrDebit,
    Unknown,
}

impl CardType {
    /// Maps the card-identification short code.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("D") => CardType::Debit,
            Some("C") => CardType::Credit,
            Some("CD") => CardType::CreditOrDebit,
            _ => CardType::Unknown,
        }
    }
}

/// Card attributes as reported by the card-identification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDescriptor {
    /// Lowercase, hyphenated (`american-express`).
    pub brand: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub corporate: bool,
    pub prepaid: bool,
}

impl CardDescriptor {
    /// Brand as shown to the payer, e.g. `American Express`.
    pub fn display_brand(&self) -> String {
        self.brand.to_case(Case::Title)
    }
}

/// Body of a 200 from the card-identification service.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CardIdResponse {
    pub brand: String,
    #[serde(rename = "type", default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub corporate: bool,
    #[serde(default)]
    pub prepaid: bool,
}

impl From<CardIdResponse> for CardDescriptor {
    fn from(response: CardIdResponse) -> Self {
        CardDescriptor {
            brand: normalize_brand(&response.brand),
            card_type: CardType::from_code(response.card_type.as_deref()),
            corporate: response.corporate,
            prepaid: response.prepaid,
        }
    }
}

pub fn normalize_brand(brand: &str) -> String {
    brand.to_case(Case::Kebab)
}
