//! Generation driver: registry text in, patched target files out.
//!
//! Both targets are patched in memory first. Files are only written once both
//! patches succeeded: every changed target is first written in full to a
//! temporary file in its own directory, and only when all of them are staged
//! are they renamed over the originals. The renames themselves run one after
//! the other, so a failing second rename leaves the first target updated.

use anyhow::{Context, Result};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use enumgen_emitter::{CppEmitter, MarkerPatcher};
use enumgen_registry::{EnumTable, TableStats, parse_registry};

use crate::config::ResolvedConfig;
use crate::fetch::fetch_spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Write,
    /// Compute everything, write nothing.
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    pub path: PathBuf,
    /// Whether the generated region differs from what is on disk.
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub mode: RunMode,
    pub skipped_provisional: Vec<String>,
    pub stats: TableStats,
    pub targets: Vec<TargetOutcome>,
}

impl RunReport {
    pub fn is_stale(&self) -> bool {
        self.targets.iter().any(|t| t.changed)
    }
}

/// A target buffer after patching, not yet written.
struct PatchedTarget {
    path: PathBuf,
    original: String,
    patched: String,
}

/// Fetch the registry named by `config` and regenerate both targets.
pub fn run(config: &ResolvedConfig, mode: RunMode) -> Result<RunReport> {
    let spec_text = fetch_spec(&config.spec)?;
    generate(&spec_text, config, mode)
}

/// Regenerate both targets from registry text already in memory.
pub fn generate(spec_text: &str, config: &ResolvedConfig, mode: RunMode) -> Result<RunReport> {
    let model = parse_registry(spec_text)
        .with_context(|| format!("failed to parse registry {}", config.spec))?;
    let table = EnumTable::build(&model);

    let fragments = CppEmitter::new(config.emit.clone()).emit_table(&table);
    let patcher = MarkerPatcher::new(&config.comment_token).with_context(|| {
        format!("invalid comment token {:?}", config.comment_token)
    })?;

    let targets = [
        (&config.declaration_file, fragments.declarations.as_str()),
        (&config.definition_file, fragments.definitions.as_str()),
    ]
    .into_iter()
    .map(|(path, fragment)| patch_target(&patcher, path, fragment))
    .collect::<Result<Vec<_>>>()?;

    let outcomes: Vec<TargetOutcome> = targets
        .iter()
        .map(|target| TargetOutcome {
            path: target.path.clone(),
            changed: target.original != target.patched,
        })
        .collect();

    if mode == RunMode::Write {
        let staged = targets
            .iter()
            .zip(&outcomes)
            .filter(|(_, outcome)| outcome.changed)
            .map(|(target, _)| StagedWrite::stage(&target.path, &target.patched))
            .collect::<Result<Vec<_>>>()?;
        for write in staged {
            write.commit()?;
        }
    }
    for outcome in &outcomes {
        tracing::info!(
            path = %outcome.path.display(),
            changed = outcome.changed,
            ?mode,
            "target processed"
        );
    }

    Ok(RunReport {
        mode,
        skipped_provisional: model.skipped_provisional,
        stats: table.stats(),
        targets: outcomes,
    })
}

fn patch_target(patcher: &MarkerPatcher, path: &Path, fragment: &str) -> Result<PatchedTarget> {
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read target {}", path.display()))?;
    let patched = patcher
        .patch(&original, fragment)
        .with_context(|| format!("cannot update {}", path.display()))?;
    Ok(PatchedTarget {
        path: path.to_path_buf(),
        original,
        patched,
    })
}

/// New contents fully written next to their target, not yet renamed into place.
/// Dropping it without `commit` removes the temporary file.
pub struct StagedWrite {
    path: PathBuf,
    temp: tempfile::NamedTempFile,
}

impl StagedWrite {
    /// Write `contents` to a temporary file in `path`'s directory, carrying
    /// over `path`'s permissions.
    pub fn stage(path: &Path, contents: &str) -> Result<Self> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let permissions = std::fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .permissions();

        let mut temp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
        temp.write_all(contents.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .with_context(|| format!("failed to write temporary file for {}", path.display()))?;
        temp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("failed to set permissions for {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            temp,
        })
    }

    /// Rename the staged file over the target.
    pub fn commit(self) -> Result<()> {
        let Self { path, temp } = self;
        temp.persist(&path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// Replace `path` with `contents` via a sibling temporary file.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    StagedWrite::stage(path, contents)?.commit()
}
