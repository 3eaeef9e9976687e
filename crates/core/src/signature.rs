//! Field and method signature parsing over member fragment headers.
//!
//! Recognition is token based: leading annotations are dropped, a prefix of
//! known modifiers is consumed, the last remaining token is the member name
//! and whatever sits between is the type. Angle-bracket depth is the only
//! nesting that is tracked; parentheses and string literals are not.

use crate::scanner::strip_generics;
use crate::types::{FieldRecord, MethodRecord, Parameter, Visibility};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Modifiers consumed from the front of a member header.
pub const MEMBER_MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
    "default",
];

/// Keywords that open a nested type declaration inside a body.
const NESTED_TYPE_KEYWORDS: &[&str] = &["class", "interface", "enum", "record", "@interface"];

static LEADING_ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[\w.]+(?:\s*\([^)]*\))?\s*").unwrap());
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[\w.]+(?:\s*\([^)]*\))?").unwrap());

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Drop `@Name` / `@Name(...)` annotations from the front of `text`.
/// Parentheses are not balanced: `@A(f(x))` stops at the first `)`.
pub fn remove_leading_annotations(text: &str) -> &str {
    let mut stripped = text.trim_start();
    while stripped.starts_with('@') {
        let Some(m) = LEADING_ANNOTATION_RE.find(stripped) else { break };
        // `@interface` declares an annotation type; leave it for the caller.
        if m.as_str().trim_end() == "@interface" {
            break;
        }
        stripped = stripped[m.end()..].trim_start();
    }
    stripped
}

/// Drop annotations wherever they sit among the modifiers
/// (`private @Size(max = 10) String name`). `@interface` is kept.
fn strip_annotations(text: &str) -> Cow<'_, str> {
    ANNOTATION_RE.replace_all(text, |caps: &Captures| {
        if &caps[0] == "@interface" {
            caps[0].to_string()
        } else {
            String::new()
        }
    })
}

/// Reduce a type to its display form: whitespace collapsed, generic argument
/// lists removed, package qualifiers dropped (`java.util.List<String>` →
/// `List`). Array brackets are kept.
pub fn simplify_type(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return String::new();
    }
    let unqualified = strip_qualifiers(&strip_generics(&collapsed));
    unqualified.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_char)
}

/// Remove every `ident.` that is followed by another identifier, leaving the
/// final segment of each dotted name.
fn strip_qualifiers(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if !is_ident_start(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && is_ident_char(chars[i]) {
            i += 1;
        }
        if i + 1 < chars.len() && chars[i] == '.' && is_ident_start(chars[i + 1]) {
            i += 1;
            continue;
        }
        out.extend(&chars[start..i]);
    }
    out
}

/// Cut `text` at the first `stop` that is not inside `<...>`.
fn truncate_top_level(text: &str, stop: char) -> &str {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == stop && depth == 0 => return &text[..idx],
            _ => {}
        }
    }
    text
}

/// Split `text` on `sep` outside of `<...>`.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Consume the modifier prefix (annotations interleaved with modifiers are
/// skipped). Returns `(modifiers, remaining tokens)`.
fn split_modifiers<'a>(tokens: &[&'a str]) -> (Vec<String>, Vec<&'a str>) {
    let mut modifiers = Vec::new();
    let mut idx = 0;
    while idx < tokens.len() {
        let token = tokens[idx];
        if MEMBER_MODIFIERS.contains(&token) {
            modifiers.push(token.to_string());
        } else if !(token.starts_with('@') && token != "@interface") {
            break;
        }
        idx += 1;
    }
    (modifiers, tokens[idx..].to_vec())
}

/// Skip a leading method type-parameter list (`<T>`, `<K, V>`), which may
/// span several whitespace tokens.
fn skip_type_parameters<'a, 'b>(tokens: &'b [&'a str]) -> &'b [&'a str] {
    if !tokens.first().is_some_and(|t| t.starts_with('<')) {
        return tokens;
    }
    let mut depth = 0i32;
    for (idx, token) in tokens.iter().enumerate() {
        for ch in token.chars() {
            match ch {
                '<' => depth += 1,
                '>' => depth -= 1,
                _ => {}
            }
        }
        if depth <= 0 {
            return &tokens[idx + 1..];
        }
    }
    &[]
}

fn has_modifier(modifiers: &[String], keyword: &str) -> bool {
    modifiers.iter().any(|m| m == keyword)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// True when a block header opens a nested type rather than a member body.
pub fn is_nested_type_header(header: &str) -> bool {
    remove_leading_annotations(header)
        .split_whitespace()
        .find(|t| !MEMBER_MODIFIERS.contains(t) && *t != "sealed" && *t != "non-sealed")
        .is_some_and(|t| NESTED_TYPE_KEYWORDS.contains(&t))
}

/// True when a `;`-terminated declaration is a body-less method
/// (interface, abstract or native) rather than a field.
pub fn is_method_declaration(header: &str) -> bool {
    truncate_top_level(&strip_annotations(header), '=').contains('(')
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Parse a declaration fragment as a field. Only the first declarator of a
/// multi-variable line is kept. Returns `None` when no name can be found.
pub fn parse_field(header: &str) -> Option<FieldRecord> {
    let header = strip_annotations(header);
    let left = truncate_top_level(&header, '=');
    let left = truncate_top_level(left, ',').trim();

    let tokens: Vec<&str> = left.split_whitespace().collect();
    let (modifiers, remainder) = split_modifiers(&tokens);
    let (&last, type_tokens) = remainder.split_last()?;

    let name = last.trim_end_matches(['[', ']']);
    if !is_identifier(name) {
        return None;
    }
    let type_text = if type_tokens.is_empty() { last.to_string() } else { type_tokens.join(" ") };

    Some(FieldRecord {
        name: name.to_string(),
        type_name: simplify_type(&type_text),
        visibility: Visibility::from_modifiers(&modifiers),
        is_static: has_modifier(&modifiers, "static"),
        is_final: has_modifier(&modifiers, "final"),
    })
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

/// Parse a member header as a method or constructor of `class_name`.
///
/// Returns `None` for headers without a parameter list, initializer
/// expressions (`x = new Foo() {`), and non-constructors with no return type.
pub fn parse_method(header: &str, class_name: &str) -> Option<MethodRecord> {
    let header = remove_leading_annotations(header);
    let (before_params, after) = header.split_once('(')?;
    let params_raw = after.split_once(')').map(|(p, _)| p).unwrap_or(after);

    if before_params.contains('=') {
        return None;
    }

    let tokens: Vec<&str> = before_params.split_whitespace().collect();
    let (modifiers, remainder) = split_modifiers(&tokens);
    let remainder = skip_type_parameters(&remainder);
    let (&name, return_tokens) = remainder.split_last()?;
    if !is_identifier(name) {
        return None;
    }

    let is_constructor = name == class_name && return_tokens.is_empty();
    let return_type = if is_constructor {
        String::new()
    } else {
        let simplified = simplify_type(&return_tokens.join(" "));
        if simplified.is_empty() {
            return None;
        }
        simplified
    };

    Some(MethodRecord {
        name: name.to_string(),
        is_constructor,
        return_type,
        visibility: Visibility::from_modifiers(&modifiers),
        is_static: has_modifier(&modifiers, "static"),
        is_abstract: has_modifier(&modifiers, "abstract"),
        parameters: parse_parameters(params_raw),
    })
}

/// Parse a raw parameter list. Array brackets stay on the type; varargs
/// ellipses are removed.
pub fn parse_parameters(raw: &str) -> Vec<Parameter> {
    let mut params = Vec::new();
    for fragment in split_top_level(raw, ',') {
        let fragment = remove_leading_annotations(fragment.trim());
        let tokens: Vec<&str> =
            fragment.split_whitespace().skip_while(|t| *t == "final").collect();
        let Some((&last, type_tokens)) = tokens.split_last() else { continue };

        let (name, type_text) = if type_tokens.is_empty() {
            (String::new(), last.to_string())
        } else {
            (last.to_string(), type_tokens.join(" "))
        };
        params.push(Parameter { name, type_name: simplify_type(&type_text.replace("...", "")) });
    }
    params
}
