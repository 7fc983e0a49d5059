use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use enumgen_emitter::EmitOptions;

use crate::args::CliArgs;
use crate::fetch::SpecSource;

pub const CONFIG_FILE_NAME: &str = "enumgen.json";

pub const DEFAULT_SPEC_URL: &str =
    "https://raw.githubusercontent.com/KhronosGroup/Vulkan-Docs/main/xml/vk.xml";

pub const DEFAULT_COMMENT_TOKEN: &str = "//";

/// Contents of `enumgen.json`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub spec: Option<String>,
    #[serde(default)]
    pub declaration_file: Option<String>,
    #[serde(default)]
    pub definition_file: Option<String>,
    #[serde(default)]
    pub export_macro: Option<String>,
    #[serde(default)]
    pub comment_token: Option<String>,
    #[serde(default)]
    pub indent: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub spec: SpecSource,
    pub declaration_file: PathBuf,
    pub definition_file: PathBuf,
    pub comment_token: String,
    pub emit: EmitOptions,
    /// Config file the settings came from, if any.
    pub config_path: Option<PathBuf>,
}

pub fn parse_config(text: &str) -> Result<ConfigFile> {
    serde_json::from_str(text).context("failed to parse enumgen config")
}

pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Explicit `--config`, else `enumgen.json` in `cwd` when it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(absolutize(path, cwd));
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Merge CLI flags over the config file.
///
/// Paths given on the command line are relative to `cwd`; paths in the config
/// file are relative to the directory containing it.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let config_path = find_config(args, cwd);
    let file = match &config_path {
        Some(path) => load_config(path)?,
        None => ConfigFile::default(),
    };
    let config_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

    let spec = match (&args.spec, &file.spec) {
        (Some(raw), _) => SpecSource::parse(raw, cwd),
        (None, Some(raw)) => SpecSource::parse(raw, &config_dir),
        (None, None) => SpecSource::Url(DEFAULT_SPEC_URL.to_string()),
    };

    let declaration_file = resolve_target(
        args.declaration_file.as_deref(),
        file.declaration_file.as_deref(),
        cwd,
        &config_dir,
        ("declarationFile", "--declarations"),
    )?;
    let definition_file = resolve_target(
        args.definition_file.as_deref(),
        file.definition_file.as_deref(),
        cwd,
        &config_dir,
        ("definitionFile", "--definitions"),
    )?;
    if declaration_file == definition_file {
        bail!(
            "declarations and definitions both target {}; use two files",
            declaration_file.display()
        );
    }

    let defaults = EmitOptions::default();
    let emit = EmitOptions {
        export_macro: args
            .export_macro
            .clone()
            .or(file.export_macro)
            .unwrap_or(defaults.export_macro),
        indent: file.indent.unwrap_or(defaults.indent),
    };

    let comment_token = args
        .comment_token
        .clone()
        .or(file.comment_token)
        .unwrap_or_else(|| DEFAULT_COMMENT_TOKEN.to_string());
    if comment_token.trim().is_empty() {
        bail!("comment token must not be empty");
    }

    Ok(ResolvedConfig {
        spec,
        declaration_file,
        definition_file,
        comment_token,
        emit,
        config_path,
    })
}

fn resolve_target(
    cli: Option<&Path>,
    configured: Option<&str>,
    cwd: &Path,
    config_dir: &Path,
    (key, flag): (&str, &str),
) -> Result<PathBuf> {
    match (cli, configured) {
        (Some(path), _) => Ok(absolutize(path, cwd)),
        (None, Some(path)) => Ok(absolutize(Path::new(path), config_dir)),
        (None, None) => {
            bail!("no {key} configured; pass {flag} or set \"{key}\" in {CONFIG_FILE_NAME}")
        }
    }
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
