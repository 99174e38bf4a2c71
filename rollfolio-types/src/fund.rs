//! Instrument identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Broad family of an instrument; providers usually serve only one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FundKind {
    /// Mutual fund scheme, priced by daily NAV.
    #[serde(rename = "m")]
    MutualFund,
    /// Market index, priced by its total-return value.
    #[serde(rename = "i")]
    Index,
}

impl FundKind {
    /// Short label used in capability strings and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MutualFund => "mutual-fund",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for FundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fund or index the caller wants rolling returns for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fund {
    /// Instrument family.
    #[serde(rename = "type")]
    pub kind: FundKind,
    /// Provider-facing identifier (scheme code or index name).
    #[serde(rename = "value")]
    pub code: String,
    /// Display title; providers may replace it with the canonical name.
    pub title: String,
}

impl Fund {
    /// Build a fund whose title defaults to its code.
    pub fn new(kind: FundKind, code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind,
            title: code.clone(),
            code,
        }
    }

    /// Shorthand for a mutual fund.
    pub fn mutual_fund(code: impl Into<String>) -> Self {
        Self::new(FundKind::MutualFund, code)
    }

    /// Shorthand for an index.
    pub fn index(code: impl Into<String>) -> Self {
        Self::new(FundKind::Index, code)
    }

    /// Replace the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl fmt::Display for Fund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.code)
    }
}
