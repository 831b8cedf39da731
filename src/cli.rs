//! Minimal CLI: descriptors → (xlua stubs | namespace registry)
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, Args};
use colored::Colorize;

use crate::chunk::DEFAULT_CHUNK_SIZE;
use crate::dump::{DumpConfig, dump_xlua};
use crate::ir::TypeDescriptor;
use crate::namespace::{dedup, resolve};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Lua annotation stubs from reflected type descriptors
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// write xLua annotation stubs plus the namespace index
    Xlua(XluaOut),
    /// resolve descriptors and print the root namespace registry as JSON
    Namespaces(NamespacesOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JQ pre-process filter for each descriptor document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more descriptor documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct XluaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory (created if missing)
    #[arg(short, long)]
    out: PathBuf,

    /// cut body files once they exceed this many bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct NamespacesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<TypeDescriptor>> {
        crate::input::load_descriptors(&self.input, self.jq_expr.as_deref())
            .context("failed to load descriptor documents")
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Xlua(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let types = target.input_settings.load()?;
                let config = DumpConfig {
                    out_dir: target.out.clone(),
                    chunk_size: target.chunk_size,
                };
                let report = dump_xlua(types, &config)
                    .with_context(|| format!("failed to dump stubs into {}", target.out.display()))?;

                eprintln!(
                    "{} {} stub file(s) + {} ({} types, {} duplicates dropped)",
                    "wrote".green().bold(),
                    report.body_files.len(),
                    report.namespace_file.display(),
                    report.types_emitted,
                    report.duplicates_dropped,
                );
            }
            Command::Namespaces(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let types = target.input_settings.load()?;
                let resolution = resolve(dedup(types).types);
                let registry_src = serde_json::to_string_pretty(&resolution.registry)?;

                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &registry_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{registry_src}");
                }
            }
        }
        Ok(())
    }
}
