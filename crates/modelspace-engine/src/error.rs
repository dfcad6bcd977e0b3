use modelspace_contracts::catalog::CatalogParseError;
use modelspace_contracts::schema::MissingRequiredFields;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    #[error("catalog fetch failed: {message}")]
    CatalogFetch {
        status: Option<u16>,
        message: String,
    },

    #[error("could not encode file for '{field}': {message}")]
    Encoding { field: String, message: String },

    #[error(transparent)]
    Validation(#[from] MissingRequiredFields),

    #[error("predict failed: {message}")]
    Predict {
        status: Option<u16>,
        message: String,
    },

    #[error("a prediction is already in flight")]
    SubmitInFlight,

    #[error("'{0}' is not an input of this model")]
    UnknownField(String),

    #[error("invocation was abandoned before it completed")]
    Abandoned,
}

impl SpaceError {
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::CatalogFetch {
            status: None,
            message: message.into(),
        }
    }

    pub fn predict(message: impl Into<String>) -> Self {
        Self::Predict {
            status: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::CatalogFetch { status, .. } | Self::Predict { status, .. } => *status,
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Encoding { field, .. } => Some(field.as_str()),
            Self::UnknownField(field) => Some(field.as_str()),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::CatalogFetch { .. } => "catalog_fetch",
            Self::Encoding { .. } => "encoding",
            Self::Validation(_) => "validation",
            Self::Predict { .. } => "predict",
            Self::SubmitInFlight => "submit_in_flight",
            Self::UnknownField(_) => "unknown_field",
            Self::Abandoned => "abandoned",
        }
    }
}

impl From<CatalogParseError> for SpaceError {
    fn from(err: CatalogParseError) -> Self {
        Self::catalog(format!("malformed catalog payload: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, SpaceError>;
