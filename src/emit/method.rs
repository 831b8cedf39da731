//! Method lists: event-pair merging, by-reference outputs and the
//! `---@param` / `---@return` / `function` triple for each callable.
use std::borrow::Cow;
use std::fmt::{self, Write};

use indexmap::IndexMap;

use super::{continue_comment, write_comment_and_location};
use crate::ir::{Method, MethodKind, Param, VOID};
use crate::lua::{escape_identifier, is_keyword, lua_type_name};
use crate::namespace::insert_if_absent;

const CONSTRUCTOR_NAME: &str = ".ctor";
const EVENT_OP_PARAM: &str = "op";

/// Which accessors of one logical event were seen.
#[derive(Debug, Clone, Copy, Default)]
struct EventOps {
    add: bool,
    remove: bool,
}

impl EventOps {
    fn record(&mut self, kind: MethodKind) {
        match kind {
            MethodKind::EventAdd => self.add = true,
            MethodKind::EventRemove => self.remove = true,
            _ => {}
        }
    }

    fn type_name(self) -> &'static str {
        match (self.add, self.remove) {
            (true, true) => "\"+\"|\"-\"",
            (false, true) => "\"-\"",
            _ => "\"+\"",
        }
    }
}

pub fn is_constructor(method: &Method) -> bool {
    method.kind == MethodKind::Constructor || method.name == CONSTRUCTOR_NAME
}

/// `add_Changed` / `remove_Changed` → `Changed`.
fn event_name(accessor: &str) -> &str {
    accessor
        .strip_prefix("add_")
        .or_else(|| accessor.strip_prefix("remove_"))
        .unwrap_or(accessor)
}

/// The methods a class actually exposes: constructors and keyword-named
/// methods removed, each add/remove accessor pair collapsed into one callable
/// whose leading `op` parameter discriminates the operation.
///
/// Source methods are never modified; merged events are fresh values.
pub fn effective_methods(methods: &[Method]) -> Vec<Cow<'_, Method>> {
    let mut effective = Vec::<Cow<'_, Method>>::new();
    let mut events = IndexMap::<String, (usize, EventOps)>::new();

    for method in methods {
        if is_constructor(method) || is_keyword(&method.name) {
            continue;
        }
        if !matches!(method.kind, MethodKind::EventAdd | MethodKind::EventRemove) {
            effective.push(Cow::Borrowed(method));
            continue;
        }

        let name = event_name(&method.name).to_string();
        if is_keyword(&name) {
            continue;
        }
        if insert_if_absent(&mut events, name.clone(), (effective.len(), EventOps::default())) {
            let mut params = Vec::with_capacity(method.params.len() + 1);
            params.push(Param { name: EVENT_OP_PARAM.to_string(), ..Param::default() });
            params.extend(method.params.iter().cloned());
            effective.push(Cow::Owned(Method {
                name: name.clone(),
                params,
                return_type_name: method.return_type_name.clone(),
                is_static: method.is_static,
                kind: method.kind,
                comment: method.comment.clone(),
                location: method.location.clone(),
            }));
        }
        if let Some((_, ops)) = events.get_mut(&name) {
            ops.record(method.kind);
        }
    }

    for &(slot, ops) in events.values() {
        if let Cow::Owned(merged) = &mut effective[slot] {
            merged.params[0].type_name = ops.type_name().to_string();
        }
    }
    effective
}

/// Rendered argument name; variadic parameters become `...`.
pub(crate) fn param_name(param: &Param) -> String {
    if param.is_params {
        "...".to_string()
    } else {
        escape_identifier(&param.name)
    }
}

/// Annotation type of a parameter; variadic parameters use the element type.
pub(crate) fn param_type(param: &Param) -> &str {
    let host = if param.is_params {
        param.type_name.strip_suffix("[]").unwrap_or(&param.type_name)
    } else {
        &param.type_name
    };
    lua_type_name(host)
}

/// Primary return plus every `ref`/`out` parameter, as one multi-value return.
/// A `void` primary is dropped when outputs exist.
pub(crate) fn return_annotation(return_type: &str, params: &[Param]) -> String {
    let outputs: Vec<&str> = params
        .iter()
        .filter(|p| p.is_by_ref_output())
        .map(|p| lua_type_name(&p.type_name))
        .collect();
    if outputs.is_empty() {
        return lua_type_name(return_type).to_string();
    }

    let mut parts = Vec::with_capacity(outputs.len() + 1);
    if return_type != VOID {
        parts.push(lua_type_name(return_type));
    }
    parts.extend(outputs);
    parts.join(", ")
}

pub fn emit_method(out: &mut String, owner: &str, method: &Method) -> fmt::Result {
    write_comment_and_location(out, &method.comment, &method.location)?;

    let arguments: Vec<&Param> = method.params.iter().filter(|p| p.is_pass_through()).collect();
    for param in &arguments {
        let mut ty = param_type(param).to_string();
        if param.nullable {
            ty.push('?');
        }
        let name = param_name(param);
        if param.comment.is_empty() {
            writeln!(out, "---@param {name} {ty}")?;
        } else {
            writeln!(out, "---@param {name} {ty} {}", continue_comment(&param.comment))?;
        }
    }
    writeln!(out, "---@return {}", return_annotation(&method.return_type_name, &method.params))?;

    let dot = if method.is_static { '.' } else { ':' };
    let names = arguments.iter().map(|p| param_name(p)).collect::<Vec<_>>().join(", ");
    writeln!(out, "function {owner}{dot}{}({names})", method.name)?;
    writeln!(out, "end")?;
    writeln!(out)
}
