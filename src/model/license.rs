//! License vocabulary of the generated Nix expressions.
//!
//! Upstream Python packages declare licenses as free text. The generator maps
//! the spellings it knows onto a closed set of attributes from nixpkgs'
//! `lib.licenses` and passes everything else through as a string literal.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A license attribute from `pkgs.stdenv.lib.licenses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NixLicense {
    Zpt21,
    Mit,
    BsdOriginal,
    Asl20,
    Lgpl3,
    Psfl,
}

impl NixLicense {
    /// Attribute name inside `licenses`.
    #[must_use]
    pub const fn attr(&self) -> &'static str {
        match self {
            Self::Zpt21 => "zpt21",
            Self::Mit => "mit",
            Self::BsdOriginal => "bsdOriginal",
            Self::Asl20 => "asl20",
            Self::Lgpl3 => "lgpl3",
            Self::Psfl => "psfl",
        }
    }

    /// All identifiers in the vocabulary.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Zpt21,
            Self::Mit,
            Self::BsdOriginal,
            Self::Asl20,
            Self::Lgpl3,
            Self::Psfl,
        ]
    }
}

impl fmt::Display for NixLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "licenses.{}", self.attr())
    }
}

/// Outcome of resolving a package's declared license.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedLicense {
    /// Recognized license, rendered as a `licenses.*` reference
    Known(NixLicense),
    /// Unrecognized license text, rendered as a quoted string literal
    Literal(String),
    /// No license declared, rendered as `""`
    Undeclared,
}

impl Default for ResolvedLicense {
    fn default() -> Self {
        Self::Undeclared
    }
}
