//! Registry model and enum value resolution for enumgen.
//!
//! This crate turns a Vulkan-style registry document into per-enum value tables:
//! - `model` - `SpecModel`, `Extension`, `Contribution`, `Enumerant`
//! - `parser` - `quick-xml` pull parser producing a `SpecModel`
//! - `resolver` - the extension token value formula
//! - `table` - `EnumTable`, grouping native and extension values per enum

pub mod model;
pub use model::{Contribution, ContributionKind, EnumDecl, Enumerant, Extension, Sign, SpecModel};

pub mod parser;
pub use parser::{ParseError, parse_registry};

pub mod resolver;
pub use resolver::{extension_value, resolve_contribution};

pub mod table;
pub use table::{BaseEnum, EnumGroup, EnumTable, TableStats};

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;
#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "../tests/table_tests.rs"]
mod table_tests;
#[cfg(test)]
#[path = "../tests/fixtures.rs"]
mod fixtures;
