//! The `CS` root table: one entry per registered root key, so dotted access
//! chains like `CS.UnityEngine.UI.Button` resolve in the editor.
use std::fmt::{self, Write};
use std::fs;
use std::path::{Path, PathBuf};

use crate::chunk::fresh_buffer;
use crate::error::DumpError;
use crate::namespace::{NamespaceKind, NamespaceRegistry};

pub const NAMESPACE_FILE: &str = "xlua_namespace.lua";
pub const ROOT_TABLE: &str = "CS";

pub fn render_namespace_table(registry: &NamespaceRegistry) -> Result<String, fmt::Error> {
    let mut out = fresh_buffer();
    writeln!(out, "{ROOT_TABLE} = {{}}")?;
    for (key, kind) in registry.iter() {
        match kind {
            NamespaceKind::Namespace => writeln!(out, "---@type namespace <\"{key}\">")?,
            NamespaceKind::Type => writeln!(out, "---@type {key}")?,
        }
        writeln!(out, "{ROOT_TABLE}.{key} = {{}}")?;
    }
    Ok(out)
}

pub fn write_namespace_table(registry: &NamespaceRegistry, dir: &Path) -> Result<PathBuf, DumpError> {
    let text = render_namespace_table(registry)?;
    let path = dir.join(NAMESPACE_FILE);
    fs::write(&path, text).map_err(|source| DumpError::Write { path: path.clone(), source })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeInfo;

    fn info(name: &str, namespace: &str) -> TypeInfo {
        TypeInfo { name: name.into(), namespace: namespace.into(), ..TypeInfo::default() }
    }

    #[test]
    fn renders_namespaces_and_root_types_in_registration_order() {
        let mut registry = NamespaceRegistry::new();
        registry.register(&info("GameObject", "UnityEngine"));
        registry.register(&info("Globals", ""));
        registry.register(&info("Button", "UnityEngine.UI"));

        assert_eq!(render_namespace_table(&registry).unwrap(), concat!(
            "---@meta\n",
            "CS = {}\n",
            "---@type namespace <\"UnityEngine\">\n",
            "CS.UnityEngine = {}\n",
            "---@type Globals\n",
            "CS.Globals = {}\n",
        ));
    }

    #[test]
    fn empty_registry_still_declares_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_namespace_table(&NamespaceRegistry::new(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), NAMESPACE_FILE);
        assert_eq!(fs::read_to_string(path).unwrap(), "---@meta\nCS = {}\n");
    }
}
