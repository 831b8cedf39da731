//! One generation pass: dedup → resolve → emit/chunk → namespace table.
//!
//! All mutable state (buffer, file counter, registry) lives in this call;
//! two passes never share anything.
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::chunk::{DEFAULT_CHUNK_SIZE, OutputChunker};
use crate::emit::Emitter;
use crate::error::DumpError;
use crate::ir::TypeDescriptor;
use crate::namespace::{Deduped, Resolution, dedup, resolve};
use crate::namespace_table::write_namespace_table;

#[derive(Debug, Clone)]
pub struct DumpConfig {
    pub out_dir: PathBuf,
    /// Body files are cut once they grow past this many bytes.
    pub chunk_size: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DumpReport {
    pub body_files: Vec<PathBuf>,
    pub namespace_file: PathBuf,
    pub types_emitted: usize,
    pub duplicates_dropped: usize,
}

pub fn dump_xlua<I>(types: I, config: &DumpConfig) -> Result<DumpReport, DumpError>
where
    I: IntoIterator<Item = TypeDescriptor>,
{
    fs::create_dir_all(&config.out_dir).map_err(|source| DumpError::CreateDir {
        path: config.out_dir.clone(),
        source,
    })?;

    let Deduped { types, dropped } = dedup(types);
    let Resolution { types, mut registry } = resolve(types);

    let mut chunker = OutputChunker::new(&config.out_dir, config.chunk_size);
    let mut emitter = Emitter::new(&mut registry);
    for ty in &types {
        emitter.emit(ty, chunker.buffer())?;
        chunker.flush_if_full()?;
    }
    let body_files = chunker.finish()?;
    let namespace_file = write_namespace_table(&registry, &config.out_dir)?;

    info!(
        files = body_files.len(),
        types = types.len(),
        duplicates = dropped,
        namespaces = registry.len(),
        "xlua stubs written"
    );
    Ok(DumpReport {
        body_files,
        namespace_file,
        types_emitted: types.len(),
        duplicates_dropped: dropped,
    })
}
