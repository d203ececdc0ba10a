use http::StatusCode;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::{sync::Arc, time::Instant};

use super::{
    AllowedCards, CardDescriptor, CardType, MessageCatalog, RejectionReason,
    descriptor::CardIdResponse,
};
use crate::{clients::CardIdClient, transport::TraceContext};

/// Why a card was turned away, with the text to show the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub reason: RejectionReason,
    /// Display form, e.g. `Visa`.
    pub brand: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptanceOutcome {
    Accepted(CardDescriptor),
    Rejected(Rejection),
    /// The card-identification service gave no usable answer; checkout may proceed.
    Indeterminate,
}

/// Decides whether a card number may be used against a merchant's accepted cards.
pub struct CardChecker {
    card_id: CardIdClient,
    catalog: Arc<dyn MessageCatalog>,
}

impl CardChecker {
    pub fn new(card_id: CardIdClient, catalog: Arc<dyn MessageCatalog>) -> Self {
        Self { card_id, catalog }
    }

    /// Never fails: a card-identification outage or an unexpected status yields
    /// [`AcceptanceOutcome::Indeterminate`].
    pub async fn check_card(
        &self,
        card_number: &str,
        allowed: &AllowedCards,
        locale: &str,
        trace: &TraceContext,
    ) -> AcceptanceOutcome {
        // Empty input still goes to the lookup.
        let length = card_number.chars().count();
        if length > 0 && length < 11 {
            return self.reject(locale, RejectionReason::NumberLengthInvalid, None);
        }

        let start = Instant::now();
        let result = self.card_id.lookup_card(card_number, trace).await;
        let elapsed = start.elapsed().as_millis();

        let response = match result {
            Ok(response) => {
                info!("Card check ended - total time {}ms", elapsed);
                response
            }
            Err(e) => {
                error!("Error calling card id to check card: {}", e);
                info!("Card check ended - total time {}ms", elapsed);
                return AcceptanceOutcome::Indeterminate;
            }
        };

        match response.status {
            StatusCode::NOT_FOUND => {
                return self.reject(locale, RejectionReason::CardNotSupported, None);
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                return self.reject(locale, RejectionReason::LuhnInvalid, None);
            }
            StatusCode::OK => {}
            status => {
                warn!(
                    "Card id returned unexpected status {}; continuing without card check",
                    status
                );
                return AcceptanceOutcome::Indeterminate;
            }
        }

        let body = response.body.unwrap_or_default();
        let card: CardDescriptor = match serde_json::from_value::<CardIdResponse>(body) {
            Ok(parsed) => parsed.into(),
            Err(e) => {
                error!("Failed to parse card id response: {}", e);
                return AcceptanceOutcome::Indeterminate;
            }
        };

        debug!(
            "Checking card brand: card_brand={} card_type={:?}",
            card.brand, card.card_type
        );

        self.apply_policy(card, allowed, locale)
    }

    fn apply_policy(
        &self,
        card: CardDescriptor,
        allowed: &AllowedCards,
        locale: &str,
    ) -> AcceptanceOutcome {
        if !allowed.accepts_brand(&card) {
            let brand = card.display_brand();
            return self.reject(locale, RejectionReason::BrandUnsupported, Some(brand));
        }

        if !allowed.accepts_brand_and_type(&card) {
            // CREDIT_OR_DEBIT and UNKNOWN fall through to accepted.
            let reason = match card.card_type {
                CardType::Debit => Some(RejectionReason::UnsupportedForDebit),
                CardType::Credit => Some(RejectionReason::UnsupportedForCredit),
                CardType::CreditOrDebit | CardType::Unknown => None,
            };
            if let Some(reason) = reason {
                let brand = card.display_brand();
                return self.reject(locale, reason, Some(brand));
            }
        }

        AcceptanceOutcome::Accepted(card)
    }

    fn reject(
        &self,
        locale: &str,
        reason: RejectionReason,
        brand: Option<String>,
    ) -> AcceptanceOutcome {
        let message = self.catalog.message(locale, reason, brand.as_deref());
        AcceptanceOutcome::Rejected(Rejection {
            reason,
            brand,
            message,
        })
    }
}
