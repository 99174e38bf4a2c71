use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the rollfolio workspace.
///
/// This covers calendar range violations, broken series invariants, argument
/// validation, provider-tagged failures, not-found conditions, and an
/// aggregate for multi-provider attempts.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RollfolioError {
    /// A date fell outside the range covered by the calendar index.
    #[error("date {date} outside calendar range [{min}, {max}]")]
    DateOutOfRange {
        /// The offending date (`YYYY-MM-DD`).
        date: String,
        /// First supported date (the calendar epoch).
        min: String,
        /// Last supported date ("today" as pinned by the calendar).
        max: String,
    },

    /// A price expected in an aligned series was absent.
    ///
    /// This is an invariant violation: aligned series are forward-filled end to
    /// end, so a gap means the alignment step was skipped or is broken.
    #[error("price missing for {date} in aligned series")]
    MissingPrice {
        /// Date whose price was looked up (`YYYY-MM-DD`).
        date: String,
    },

    /// The requested capability is not implemented by any eligible connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "price-history/index").
        capability: String,
    },

    /// Issues with the returned or expected data.
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual provider returned an error.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A fund could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "price history for 119551".
        what: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<RollfolioError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
        /// Capability label (e.g. "price-history").
        capability: String,
    },
}

impl RollfolioError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `DateOutOfRange` error from anything that displays as a date.
    pub fn date_out_of_range(
        date: impl std::fmt::Display,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
    ) -> Self {
        Self::DateOutOfRange {
            date: date.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Helper: build a `MissingPrice` error.
    pub fn missing_price(date: impl std::fmt::Display) -> Self {
        Self::MissingPrice {
            date: date.to_string(),
        }
    }

    /// Returns true if this error signals a bug in the computation rather than
    /// a problem with the input or a provider.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::MissingPrice { .. })
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
