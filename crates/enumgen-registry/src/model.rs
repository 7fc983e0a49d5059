//! In-memory registry model.
//!
//! Everything here is built once by the parser and read-only afterwards.
//! Resolution produces new `Enumerant`s rather than mutating contributions.

use std::num::NonZeroU32;

/// One named, numbered entry of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerant {
    pub name: String,
    pub value: i64,
    pub comment: Option<String>,
}

impl Enumerant {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment.filter(|c| !c.is_empty());
        self
    }
}

/// Direction of an extension token value (`dir="-"` in the registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    /// Parse the `dir` attribute. Only `-` means negative.
    pub fn from_dir(dir: Option<&str>) -> Self {
        match dir {
            Some("-") => Self::Negative,
            _ => Self::Positive,
        }
    }
}

/// How a single `<enum extends=...>` inside an extension is treated.
///
/// The registry reuses the same element shape for several meanings; only
/// `Eligible` takes part in value computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionKind {
    Eligible {
        offset: u32,
        sign: Sign,
        /// Effective extension number: `extnumber` when present, otherwise the
        /// owning extension's `number`.
        number: NonZeroU32,
        comment: Option<String>,
    },
    /// Another name for an existing enumerant.
    Alias { target: String },
    /// A bit in a flags type, not a scalar value.
    BitPosition { bit: String },
    /// Legacy contribution carrying neither alias, bitpos nor offset.
    NoOffset,
}

impl ContributionKind {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }

    /// Short label used in logs.
    pub fn exclusion_reason(&self) -> Option<&'static str> {
        match self {
            Self::Eligible { .. } => None,
            Self::Alias { .. } => Some("alias"),
            Self::BitPosition { .. } => Some("bit position"),
            Self::NoOffset => Some("no offset"),
        }
    }
}

/// A single extension-to-enum edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    /// Name of the base enumeration being extended.
    pub extends: String,
    /// Symbolic name of the contributed enumerant.
    pub name: String,
    pub kind: ContributionKind,
}

/// A non-provisional extension and everything it contributes to base enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    pub number: NonZeroU32,
    pub contributions: Vec<Contribution>,
}

/// A natively declared `<enums type="enum">` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<Enumerant>,
}

/// Parsed registry: native enums and extensions in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecModel {
    pub enums: Vec<EnumDecl>,
    pub extensions: Vec<Extension>,
    /// Names of provisional extensions that were left out entirely.
    pub skipped_provisional: Vec<String>,
}

impl SpecModel {
    pub fn extension(&self, name: &str) -> Option<&Extension> {
        self.extensions.iter().find(|ext| ext.name == name)
    }

    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|decl| decl.name == name)
    }

    /// All contributions of all kept extensions, in document order.
    pub fn contributions(&self) -> impl Iterator<Item = (&Extension, &Contribution)> {
        self.extensions
            .iter()
            .flat_map(|ext| ext.contributions.iter().map(move |c| (ext, c)))
    }
}
