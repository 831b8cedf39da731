//! Locating and decoding the front-end's descriptor documents.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::error::InputError;
use crate::ir::TypeDescriptor;
use crate::path_de::descriptors_from_value;

/// Load every descriptor from `patterns`, in the order given. Files are
/// decoded in parallel; the concatenation order never depends on timing.
pub fn load_descriptors<I>(patterns: I, jq_expr: Option<&str>) -> Result<Vec<TypeDescriptor>, InputError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let source_paths = resolve_file_path_patterns(patterns)?;
    let per_file = source_paths
        .par_iter()
        .map(|path| load_file(path, jq_expr))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(per_file.into_iter().flatten().collect())
}

fn load_file(source_path: &Path, jq_expr: Option<&str>) -> Result<Vec<TypeDescriptor>, InputError> {
    let source = std::fs::read_to_string(source_path).map_err(|source| InputError::Read {
        path: source_path.to_path_buf(),
        source,
    })?;
    let parse_error = |message: String| InputError::Parse { path: source_path.to_path_buf(), message };

    let document = serde_json::from_str::<serde_json::Value>(&source).map_err(|e| parse_error(e.to_string()))?;
    let documents = match jq_expr {
        None => vec![document],
        Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &document).map_err(|error| InputError::Jq {
            path: source_path.to_path_buf(),
            message: format!("{error:#}"),
        })?,
    };

    let mut types = Vec::new();
    for document in documents {
        types.extend(descriptors_from_value(document).map_err(parse_error)?);
    }
    debug!(file = %source_path.display(), types = types.len(), "loaded descriptors");
    Ok(types)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, InputError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|source| InputError::Glob {
                pattern: pattern.to_string(),
                source,
            })?;
            let before = out.len();
            for entry in entries {
                out.push(entry?);
            }
            if out.len() == before {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(InputError::NoMatch(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
