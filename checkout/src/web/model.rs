use checkout::card::{AllowedCards, CardDescriptor, CardType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCardRequest {
    pub card_no: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckCardResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The slice of a connector charge needed to know which cards the merchant takes.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeResponse {
    pub gateway_account: GatewayAccount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayAccount {
    #[serde(default)]
    pub card_types: Vec<GatewayCardType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayCardType {
    pub brand: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
}

impl GatewayAccount {
    pub fn allowed_cards(&self) -> AllowedCards {
        AllowedCards::from_card_types(
            self.card_types
                .iter()
                .map(|entry| (entry.brand.as_str(), entry.card_type)),
        )
    }
}
