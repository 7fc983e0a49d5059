//! Per-enum value tables.
//!
//! `EnumTable` joins native declarations with resolved extension values.
//! Native values keep declaration order; each extension's values keep the
//! extension's declaration order, and extensions are ordered by their first
//! contribution to the enum.

use indexmap::IndexMap;

use crate::model::{Enumerant, SpecModel};
use crate::resolver::resolve_contribution;

/// All values of one base enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BaseEnum {
    pub name: String,
    pub native: Vec<Enumerant>,
    pub by_extension: IndexMap<String, Vec<Enumerant>>,
}

/// One run of values sharing an origin. `extension` is `None` for natives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumGroup<'a> {
    pub extension: Option<&'a str>,
    pub values: &'a [Enumerant],
}

impl BaseEnum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Native group first, then one group per contributing extension.
    pub fn groups(&self) -> impl Iterator<Item = EnumGroup<'_>> {
        let native = EnumGroup {
            extension: None,
            values: self.native.as_slice(),
        };
        std::iter::once(native).chain(self.by_extension.iter().map(|(ext, values)| EnumGroup {
            extension: Some(ext.as_str()),
            values: values.as_slice(),
        }))
    }

    pub fn len(&self) -> usize {
        self.native.len() + self.by_extension.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every value with its origin, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &Enumerant)> {
        self.groups()
            .flat_map(|group| group.values.iter().map(move |v| (group.extension, v)))
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub enums: usize,
    pub native_values: usize,
    pub extension_values: usize,
    pub excluded_contributions: usize,
    pub orphaned_contributions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumTable {
    enums: IndexMap<String, BaseEnum>,
    stats: TableStats,
}

impl EnumTable {
    pub fn build(model: &SpecModel) -> Self {
        let mut enums: IndexMap<String, BaseEnum> = model
            .enums
            .iter()
            .map(|decl| {
                let mut base = BaseEnum::new(decl.name.clone());
                base.native = decl.values.clone();
                (decl.name.clone(), base)
            })
            .collect();

        let mut stats = TableStats {
            enums: enums.len(),
            native_values: enums.values().map(|e| e.native.len()).sum(),
            ..TableStats::default()
        };

        for (ext, contribution) in model.contributions() {
            let Some(value) = resolve_contribution(contribution) else {
                stats.excluded_contributions += 1;
                continue;
            };
            let Some(base) = enums.get_mut(&contribution.extends) else {
                // Bitmask enums and names without a `type="enum"` block.
                tracing::debug!(
                    extension = %ext.name,
                    name = %contribution.name,
                    extends = %contribution.extends,
                    "no scalar enum to extend, dropping value"
                );
                stats.orphaned_contributions += 1;
                continue;
            };
            base.by_extension
                .entry(ext.name.clone())
                .or_default()
                .push(value);
            stats.extension_values += 1;
        }

        tracing::debug!(
            enums = stats.enums,
            native = stats.native_values,
            extension = stats.extension_values,
            excluded = stats.excluded_contributions,
            orphaned = stats.orphaned_contributions,
            "built enum table"
        );
        Self { enums, stats }
    }

    pub fn get(&self, name: &str) -> Option<&BaseEnum> {
        self.enums.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BaseEnum> {
        self.enums.values()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }
}
