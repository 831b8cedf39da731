//! Lua annotation emission, one self-contained block per descriptor.
//!
//! Blocks are appended to a caller-owned `String`; the emitter never sees
//! file boundaries. Enum emission also registers the enum's root key, so the
//! emitter borrows the namespace registry mutably for the whole pass.
pub mod class;
pub mod delegate;
pub mod method;

use std::fmt::{self, Write};

use crate::ir::{EnumType, InterfaceType, TypeDescriptor};
use crate::lua;
use crate::namespace::NamespaceRegistry;

pub struct Emitter<'r> {
    registry: &'r mut NamespaceRegistry,
}

impl<'r> Emitter<'r> {
    pub fn new(registry: &'r mut NamespaceRegistry) -> Self {
        Self { registry }
    }

    /// Append the block for `ty`, terminated by a blank line.
    pub fn emit(&mut self, ty: &TypeDescriptor, out: &mut String) -> fmt::Result {
        match ty {
            TypeDescriptor::Class(class) => class::emit_class(class, out)?,
            TypeDescriptor::Interface(interface) => emit_interface(interface, out)?,
            TypeDescriptor::Enum(enum_) => self.emit_enum(enum_, out)?,
            TypeDescriptor::Delegate(delegate) => delegate::emit_delegate(delegate, out)?,
        }
        writeln!(out)
    }

    fn emit_enum(&mut self, enum_: &EnumType, out: &mut String) -> fmt::Result {
        self.registry.register(&enum_.info);

        let full_name = enum_.info.qualified_name();
        let local = &enum_.info.name;
        write_comment_and_location(out, &enum_.info.comment, &enum_.info.location)?;
        write_type_annotation(out, "enum", &full_name, &[], std::iter::empty::<&String>())?;
        writeln!(out, "local {local} = {{}}")?;

        // member values are not modeled; every member is just an integer slot
        for member in enum_.fields.iter().filter(|f| !lua::is_keyword(&f.name)) {
            write_comment_and_location(out, &member.comment, &member.location)?;
            writeln!(out, "---@type integer")?;
            writeln!(out, "{local}.{} = nil", member.name)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

// Membership is not enforced by the binding layer, so only the tag is emitted.
fn emit_interface(interface: &InterfaceType, out: &mut String) -> fmt::Result {
    writeln!(out, "---@interface {}", interface.info.name)
}

/// `---<comment>` per comment line, then `---@source "…"` for file locations.
pub(crate) fn write_comment_and_location(out: &mut String, comment: &str, location: &str) -> fmt::Result {
    if !comment.is_empty() {
        writeln!(out, "---{}", continue_comment(comment))?;
    }
    if location.starts_with("file://") {
        writeln!(out, "---@source \"{}\"", location.replace('"', "'"))?;
    }
    Ok(())
}

/// Join the lines of a multi-line comment so each continuation stays a comment.
pub(crate) fn continue_comment(comment: &str) -> String {
    comment.replace('\n', "\n---")
}

pub(crate) fn write_type_annotation<'a, I>(
    out: &mut String,
    tag: &str,
    full_name: &str,
    generics: &[String],
    inherits: I,
) -> fmt::Result
where
    I: IntoIterator<Item = &'a String>,
{
    write!(out, "---@{tag} {full_name}")?;
    if !generics.is_empty() {
        write!(out, "<{}>", generics.join(", "))?;
    }
    let mut inherits = inherits.into_iter();
    if let Some(first) = inherits.next() {
        write!(out, ": {first}")?;
        for rest in inherits {
            write!(out, ", {rest}")?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::namespace::NamespaceKind;
    use serde_json::json;

    /// Emit every descriptor of a JSON document into one string.
    pub(crate) fn emit_doc(doc: serde_json::Value) -> (String, NamespaceRegistry) {
        let types: Vec<TypeDescriptor> = serde_json::from_value(doc).unwrap();
        let mut registry = NamespaceRegistry::new();
        let mut out = String::new();
        let mut emitter = Emitter::new(&mut registry);
        for ty in &types {
            emitter.emit(ty, &mut out).unwrap();
        }
        (out, registry)
    }

    #[test]
    fn interface_emits_only_its_tag() {
        let (out, _) = emit_doc(json!([{"kind": "interface", "name": "IDisposable", "namespace": "System"}]));
        assert_eq!(out, "---@interface IDisposable\n\n");
    }

    #[test]
    fn enum_members_are_untyped_integer_slots() {
        let (out, registry) = emit_doc(json!([{
            "kind": "enum", "name": "Space", "namespace": "UnityEngine",
            "comment": "Coordinate space",
            "fields": [{"name": "World", "comment": "world space"}, {"name": "Self"}, {"name": "end"}]
        }]));
        assert_eq!(out, concat!(
            "---Coordinate space\n",
            "---@enum UnityEngine.Space\n",
            "local Space = {}\n",
            "---world space\n",
            "---@type integer\n",
            "Space.World = nil\n",
            "\n",
            "---@type integer\n",
            "Space.Self = nil\n",
            "\n",
            "\n",
        ));
        assert_eq!(registry.get("UnityEngine"), Some(NamespaceKind::Namespace));
    }

    #[test]
    fn root_enum_registers_as_type() {
        let (_, registry) = emit_doc(json!([{"kind": "enum", "name": "Mode"}]));
        assert_eq!(registry.get("Mode"), Some(NamespaceKind::Type));
    }

    #[test]
    fn comment_lines_and_source_location() {
        let mut out = String::new();
        write_comment_and_location(&mut out, "line one\nline two", "file:///C:/Game/\"Player\".cs#L10").unwrap();
        assert_eq!(out, "---line one\n---line two\n---@source \"file:///C:/Game/'Player'.cs#L10\"\n");

        let mut out = String::new();
        write_comment_and_location(&mut out, "", "Assembly-CSharp.dll").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn trailing_comment_newline_keeps_an_empty_comment_line() {
        assert_eq!(continue_comment("summary\n"), "summary\n---");
        let mut out = String::new();
        write_comment_and_location(&mut out, "summary\n", "").unwrap();
        assert_eq!(out, "---summary\n---\n");
    }

    #[test]
    fn type_annotation_with_generics_and_inheritance() {
        let mut out = String::new();
        let generics = vec!["TKey".to_string(), "TValue".to_string()];
        let inherits = vec!["Base".to_string(), "IEnumerable".to_string()];
        write_type_annotation(&mut out, "class", "System.Dict", &generics, &inherits).unwrap();
        assert_eq!(out, "---@class System.Dict<TKey, TValue>: Base, IEnumerable\n");
    }
}
