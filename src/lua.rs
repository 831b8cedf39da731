//! Host → Lua annotation vocabulary: primitive type names and reserved words.

/// Lua keywords; none of these may appear as a bare identifier.
pub const KEYWORDS: [&str; 22] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Prefix applied to identifiers that collide with a keyword.
pub const ESCAPE_PREFIX: char = '_';

/// Map a host type name to its annotation type. Unknown names pass through
/// as opaque nominal types.
///
/// Widths and signedness are deliberately coarse: only `int`, `long` and
/// `ulong` become `integer`, every other numeric primitive is `number`.
pub fn lua_type_name(host: &str) -> &str {
    match host {
        "int" | "long" | "ulong" => "integer",
        "float" | "double" | "sbyte" | "byte" | "short" | "ushort" | "uint" | "char" => "number",
        "bool" => "boolean",
        "string" | "byte[]" => "string",
        "object" => "table",
        "decimal" => "userdata",
        other => other,
    }
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// `end` → `_end`; anything else is returned untouched.
pub fn escape_identifier(name: &str) -> String {
    if is_keyword(name) {
        format!("{ESCAPE_PREFIX}{name}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_map_to_coarse_tags() {
        assert_eq!(lua_type_name("int"), "integer");
        assert_eq!(lua_type_name("ulong"), "integer");
        assert_eq!(lua_type_name("uint"), "number");
        assert_eq!(lua_type_name("double"), "number");
        assert_eq!(lua_type_name("bool"), "boolean");
        assert_eq!(lua_type_name("byte[]"), "string");
        assert_eq!(lua_type_name("object"), "table");
        assert_eq!(lua_type_name("decimal"), "userdata");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(lua_type_name("UnityEngine.Vector3"), "UnityEngine.Vector3");
        assert_eq!(lua_type_name("int[]"), "int[]");
        assert_eq!(lua_type_name("void"), "void");
    }

    #[test]
    fn keywords_are_escaped() {
        assert!(is_keyword("end"));
        assert!(!is_keyword("End"));
        assert_eq!(escape_identifier("function"), "_function");
        assert_eq!(escape_identifier("value"), "value");
        for kw in KEYWORDS {
            assert_ne!(escape_identifier(kw), kw);
        }
    }
}
