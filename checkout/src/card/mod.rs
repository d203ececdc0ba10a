use serde::Serialize;

mod checker;
mod descriptor;
mod messages;
mod policy;

pub use checker::{AcceptanceOutcome, CardChecker, Rejection};
pub use descriptor::{CardDescriptor, CardType, normalize_brand};
pub use messages::{MessageCatalog, StaticCatalog, Templates};
pub use policy::{
    AllowedCardRule, AllowedCards, WithdrawalType, matches_brand, matches_brand_and_type,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    NumberLengthInvalid,
    /// Also covers a 422 from card-identification.
    LuhnInvalid,
    BrandUnsupported,
    UnsupportedForDebit,
    UnsupportedForCredit,
    CardNotSupported,
}
