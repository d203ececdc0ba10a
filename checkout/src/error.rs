use thiserror::Error;

use crate::transport::TransportError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Base URL cannot carry a path: {0}")]
    CannotBeABase(url::Url),

    #[error("Missing path parameter {name} for {template}")]
    MissingPathParam {
        template: &'static str,
        name: String,
    },

    #[error("Path parameter {name} for {template} is not a single segment: {value:?}")]
    InvalidPathParam {
        template: &'static str,
        name: String,
        value: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}
