//! Size-bounded body files.
//!
//! The emitter appends to [`OutputChunker::buffer`]; after each complete
//! descriptor the caller asks for [`OutputChunker::flush_if_full`], so a
//! declaration is never split across two files.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DumpError;

/// First line of every generated file.
pub const META: &str = "---@meta";

pub const DEFAULT_CHUNK_SIZE: usize = 500 * 1024;
pub const BODY_FILE_PREFIX: &str = "xlua_dump_";

pub fn body_file_name(index: usize) -> String {
    format!("{BODY_FILE_PREFIX}{index}.lua")
}

/// A buffer holding only the meta marker line.
pub fn fresh_buffer() -> String {
    let mut buffer = String::with_capacity(META.len() + 1);
    buffer.push_str(META);
    buffer.push('\n');
    buffer
}

pub struct OutputChunker {
    dir: PathBuf,
    threshold: usize,
    buffer: String,
    written: Vec<PathBuf>,
}

impl OutputChunker {
    pub fn new(dir: &Path, threshold: usize) -> Self {
        Self {
            dir: dir.to_path_buf(),
            threshold,
            buffer: fresh_buffer(),
            written: Vec::new(),
        }
    }

    pub fn buffer(&mut self) -> &mut String {
        &mut self.buffer
    }

    /// Write the buffer out once it grew past the threshold.
    pub fn flush_if_full(&mut self) -> Result<(), DumpError> {
        if self.buffer.len() > self.threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush whatever is left and return every body file, in order.
    ///
    /// A buffer holding only the marker is dropped unless no file was
    /// written yet, so an empty pass still yields `xlua_dump_0.lua`.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, DumpError> {
        if self.written.is_empty() || self.buffer.len() > META.len() + 1 {
            self.flush()?;
        }
        Ok(self.written)
    }

    fn flush(&mut self) -> Result<(), DumpError> {
        let path = self.dir.join(body_file_name(self.written.len()));
        fs::write(&path, &self.buffer).map_err(|source| DumpError::Write { path: path.clone(), source })?;
        debug!(file = %path.display(), bytes = self.buffer.len(), "flushed stub file");
        self.buffer = fresh_buffer();
        self.written.push(path);
        Ok(())
    }
}
