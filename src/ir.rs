// Strongly-typed descriptor IR handed over by the reflection front-end.
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One reflected type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDescriptor {
    Class(ClassType),
    Interface(InterfaceType),
    Enum(EnumType),
    Delegate(DelegateType),
}

/// Attributes shared by every descriptor variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub name: String,
    #[serde(default)]
    pub namespace: String,      // dot separated, may be empty
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_namespace: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassType {
    #[serde(flatten)]
    pub info: TypeInfo,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub base_class: Option<String>,
    #[serde(default)]
    pub interfaces: IndexSet<String>,
    #[serde(default)]
    pub generic_types: Vec<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceType {
    #[serde(flatten)]
    pub info: TypeInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    #[serde(flatten)]
    pub info: TypeInfo,
    #[serde(default)]
    pub fields: Vec<Field>,     // members; numeric values are not carried
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateType {
    #[serde(flatten)]
    pub info: TypeInfo,
    pub invoke_method: Method,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default = "void_type_name")]
    pub return_type_name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MethodKind {
    #[default]
    Normal,
    Constructor,
    EventAdd,
    EventRemove,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub ref_kind: RefKind,
    #[serde(default)]
    pub is_params: bool,        // variadic (`params T[]`)
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
}

pub const VOID: &str = "void";

fn void_type_name() -> String {
    VOID.to_string()
}

impl TypeInfo {
    /// `Namespace.Name`, or the bare name at the root.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// First dot-separated namespace segment, if any.
    pub fn root_namespace(&self) -> Option<&str> {
        if self.namespace.is_empty() {
            None
        } else {
            self.namespace.split('.').next()
        }
    }
}

impl TypeDescriptor {
    pub fn info(&self) -> &TypeInfo {
        match self {
            TypeDescriptor::Class(c) => &c.info,
            TypeDescriptor::Interface(i) => &i.info,
            TypeDescriptor::Enum(e) => &e.info,
            TypeDescriptor::Delegate(d) => &d.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn namespace(&self) -> &str {
        &self.info().namespace
    }

    pub fn qualified_name(&self) -> String {
        self.info().qualified_name()
    }
}

impl Param {
    /// Passed as a call argument (everything except pure `out`).
    pub fn is_pass_through(&self) -> bool {
        self.ref_kind != RefKind::Out
    }

    /// Surfaces as an extra return value (`ref` and `out`).
    pub fn is_by_ref_output(&self) -> bool {
        matches!(self.ref_kind, RefKind::Ref | RefKind::Out)
    }
}
