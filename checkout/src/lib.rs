pub mod card;
pub mod clients;
pub mod config;
pub mod error;
pub mod transport;
pub mod validation;

pub use card::{AcceptanceOutcome, AllowedCardRule, AllowedCards, CardChecker, CardDescriptor};
pub use error::ClientError;
pub use transport::{ServiceResponse, TraceContext, Transport, TransportError};
