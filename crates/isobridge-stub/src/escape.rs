//! String escaping and JavaScript identifier utilities

/// Escape a string for safe inclusion in a double-quoted JavaScript string
/// literal.
///
/// Handles Unicode line/paragraph separators, which break older parsers even
/// inside string literals.
pub fn escape_js_string(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 8);

    for ch in text.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0C' => result.push_str("\\f"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            ch if ch.is_control() => {
                result.push_str(&format!("\\u{:04x}", ch as u32));
            }
            _ => result.push(ch),
        }
    }

    result
}

/// `text` as a double-quoted JavaScript string literal.
pub fn js_string(text: &str) -> String {
    format!("\"{}\"", escape_js_string(text))
}

/// `["a", "b"]`
pub fn js_string_array<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items.into_iter().map(|item| js_string(item.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Words that cannot name a binding in module code.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Check if a string can be used as a binding name in an ES module.
///
/// Valid identifiers start with a letter, `$` or `_`, continue with letters,
/// digits, `$` or `_`, and are not reserved words. Names that fail this check
/// can still be exported through a string export name.
pub fn is_valid_identifier(name: &str) -> bool {
    !RESERVED.contains(&name) && is_identifier_name(name)
}

/// Identifier syntax without the reserved-word check, as allowed after `.`.
fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '$' || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '$' || c == '_')
}

/// Property access on `object`: `object.name` when possible, `object["name"]` otherwise.
pub fn member_access(object: &str, name: &str) -> String {
    if is_identifier_name(name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{}]", js_string(name))
    }
}
