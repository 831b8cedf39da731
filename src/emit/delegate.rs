use std::fmt::{self, Write};

use super::method::{param_name, param_type, return_annotation};
use crate::ir::DelegateType;

/// A delegate becomes a `fun(...)` alias plus an interface that can be
/// constructed from a Lua closure of the same shape.
pub fn emit_delegate(delegate: &DelegateType, out: &mut String) -> fmt::Result {
    let full_name = delegate.info.qualified_name();
    let invoke = &delegate.invoke_method;

    let params = invoke
        .params
        .iter()
        .filter(|p| p.is_pass_through())
        .map(|p| format!("{}: {}", param_name(p), param_type(p)))
        .collect::<Vec<_>>()
        .join(", ");
    let ret = return_annotation(&invoke.return_type_name, &invoke.params);

    writeln!(out, "---@alias {full_name}Ty fun({params}): {ret}")?;
    writeln!(out)?;
    writeln!(out, "---@interface {full_name}")?;
    writeln!(out, "---@overload fun(func: fun({params}): {ret}): any")
}
