use std::fmt::{self, Write};

use super::method::{effective_methods, emit_method, is_constructor, param_name, param_type};
use super::{write_comment_and_location, write_type_annotation};
use crate::ir::ClassType;
use crate::lua::{is_keyword, lua_type_name};

/// Field name the front-end uses for indexers; they have no Lua member form.
const INDEXER_FIELD: &str = "this[]";

pub fn emit_class(class: &ClassType, out: &mut String) -> fmt::Result {
    let full_name = class.info.qualified_name();
    let local = &class.info.name;

    write_comment_and_location(out, &class.info.comment, &class.info.location)?;
    let inherits = class
        .base_class
        .iter()
        .filter(|base| !base.is_empty())
        .chain(class.interfaces.iter());
    write_type_annotation(out, "class", &full_name, &class.generic_types, inherits)?;

    if !class.is_static {
        write_constructor_overloads(class, &full_name, out)?;
    }
    writeln!(out, "local {local} = {{}}")?;

    for field in &class.fields {
        if field.name == INDEXER_FIELD || is_keyword(&field.name) {
            continue;
        }
        write_comment_and_location(out, &field.comment, &field.location)?;
        writeln!(out, "---@type {}", lua_type_name(&field.type_name))?;
        writeln!(out, "{local}.{} = nil", field.name)?;
        writeln!(out)?;
    }

    for method in effective_methods(&class.methods) {
        emit_method(out, local, &method)?;
    }
    Ok(())
}

/// Constructors surface as call overloads on the class itself.
fn write_constructor_overloads(class: &ClassType, full_name: &str, out: &mut String) -> fmt::Result {
    let mut ctors = class.methods.iter().filter(|m| is_constructor(m)).peekable();
    if ctors.peek().is_none() {
        return writeln!(out, "---@overload fun(): {full_name}");
    }
    for ctor in ctors {
        let params = ctor
            .params
            .iter()
            .map(|p| format!("{}: {}", param_name(p), param_type(p)))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "---@overload fun({params}): {full_name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::emit::tests::emit_doc;
    use serde_json::json;

    #[test]
    fn full_class_block() {
        let (out, _) = emit_doc(json!([{
            "kind": "class", "name": "Player", "namespace": "Game.Actors",
            "comment": "The player", "location": "file:///src/Player.cs",
            "baseClass": "MonoBehaviour", "interfaces": ["IDamageable", "ISaveable"],
            "fields": [
                {"name": "health", "typeName": "int", "comment": "hit points"},
                {"name": "this[]", "typeName": "string"},
                {"name": "repeat", "typeName": "bool"}
            ],
            "methods": [
                {"name": ".ctor", "kind": "constructor", "params": [{"name": "name", "typeName": "string"}, {"name": "level", "typeName": "long"}]},
                {"name": "Find", "isStatic": true, "returnTypeName": "Game.Actors.Player",
                 "params": [{"name": "id", "typeName": "ulong"}]}
            ]
        }]));
        assert_eq!(out, concat!(
            "---The player\n",
            "---@source \"file:///src/Player.cs\"\n",
            "---@class Game.Actors.Player: MonoBehaviour, IDamageable, ISaveable\n",
            "---@overload fun(name: string, level: integer): Game.Actors.Player\n",
            "local Player = {}\n",
            "---hit points\n",
            "---@type integer\n",
            "Player.health = nil\n",
            "\n",
            "---@param id integer\n",
            "---@return Game.Actors.Player\n",
            "function Player.Find(id)\n",
            "end\n",
            "\n",
            "\n",
        ));
    }

    #[test]
    fn default_constructor_and_generics() {
        let (out, _) = emit_doc(json!([{
            "kind": "class", "name": "List", "namespace": "System.Collections.Generic",
            "genericTypes": ["T"], "interfaces": ["IEnumerable"]
        }]));
        assert!(out.starts_with(concat!(
            "---@class System.Collections.Generic.List<T>: IEnumerable\n",
            "---@overload fun(): System.Collections.Generic.List\n",
            "local List = {}\n",
        )));
    }

    #[test]
    fn static_class_has_no_overloads() {
        let (out, _) = emit_doc(json!([{
            "kind": "class", "name": "Mathf", "isStatic": true,
            "methods": [{"name": ".ctor", "kind": "constructor"}]
        }]));
        assert_eq!(out, "---@class Mathf\nlocal Mathf = {}\n\n");
    }

    #[test]
    fn multiple_constructors_each_get_an_overload() {
        let (out, _) = emit_doc(json!([{
            "kind": "class", "name": "Color",
            "methods": [
                {"name": ".ctor", "kind": "constructor", "params": [{"name": "r", "typeName": "float"}]},
                {"name": ".ctor", "kind": "constructor", "params": [{"name": "end", "typeName": "float"}]}
            ]
        }]));
        assert!(out.contains("---@overload fun(r: number): Color\n---@overload fun(_end: number): Color\n"));
        assert!(!out.contains("function Color"));
    }

    #[test]
    fn variadic_constructor_uses_element_type() {
        let (out, _) = emit_doc(json!([{
            "kind": "class", "name": "Logger",
            "methods": [{"name": ".ctor", "kind": "constructor", "params": [
                {"name": "prefix", "typeName": "string"},
                {"name": "args", "typeName": "object[]", "isParams": true}
            ]}]
        }]));
        assert!(out.contains("---@overload fun(prefix: string, ...: table): Logger\n"));
    }

    #[test]
    fn event_accessors_emit_one_function() {
        let (out, _) = emit_doc(json!([{
            "kind": "class", "name": "Button",
            "methods": [
                {"name": "add_onClick", "kind": "eventAdd", "params": [{"name": "value", "typeName": "Action"}]},
                {"name": "remove_onClick", "kind": "eventRemove", "params": [{"name": "value", "typeName": "Action"}]}
            ]
        }]));
        assert!(out.contains(concat!(
            "---@param op \"+\"|\"-\"\n",
            "---@param value Action\n",
            "---@return void\n",
            "function Button:onClick(op, value)\n",
        )));
        assert_eq!(out.matches("function Button:").count(), 1);
    }

    #[test]
    fn keyword_event_accessor_is_not_emitted() {
        let (out, _) = emit_doc(json!([{
            "kind": "class", "name": "Btn",
            "methods": [{"name": "add_end", "kind": "eventAdd", "params": [{"name": "value", "typeName": "Action"}]}]
        }]));
        assert!(!out.contains("Btn:end("));
        assert!(!out.contains("---@param op"));
    }
}
