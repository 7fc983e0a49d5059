use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the enumgen binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "enumgen",
    version,
    about = "Regenerate Vulkan enum to_string code from the registry"
)]
pub struct CliArgs {
    /// Path to an enumgen.json config file (defaults to ./enumgen.json when present).
    #[arg(short = 'p', long = "config")]
    pub config: Option<PathBuf>,

    /// Registry location: a file path or an http(s) URL to vk.xml.
    #[arg(long)]
    pub spec: Option<String>,

    /// Header receiving the generated declarations.
    #[arg(long = "declarations", value_name = "FILE")]
    pub declaration_file: Option<PathBuf>,

    /// Source file receiving the generated definitions.
    #[arg(long = "definitions", value_name = "FILE")]
    pub definition_file: Option<PathBuf>,

    /// Visibility macro placed on every declaration; pass "" for none.
    #[arg(long = "export-macro")]
    pub export_macro: Option<String>,

    /// Comment token that introduces the #BEGIN#/#END# markers.
    #[arg(long = "comment-token")]
    pub comment_token: Option<String>,

    /// Do not write anything; exit with status 1 if a target is out of date.
    #[arg(long)]
    pub check: bool,

    /// List every skipped provisional extension and log registry events at `info`.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
