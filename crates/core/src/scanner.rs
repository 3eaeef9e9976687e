//! Type scanner: finds class/interface/enum headers in comment-stripped text.
//!
//! A header must start at the beginning of a line (leading whitespace is only
//! accepted when a modifier follows it). That rejects `class` appearing inside
//! identifiers or after other tokens on the same line, and also rejects
//! legitimate declarations that share a line with something else.

use crate::types::TypeKind;
use regex::Regex;
use std::sync::LazyLock;

static TYPE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?P<modifiers>(?:\s*(?:public|protected|private|abstract|final|static|sealed|non-sealed)\s+)*)(?P<kind>class|interface|enum)\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?P<rest>[^{]*)",
    )
    .unwrap()
});

static CLAUSE_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(extends|implements|permits)\b").unwrap());

/// A matched type declaration header.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeHeader {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    /// Byte offset just past the header (at or before the opening brace).
    pub header_end: usize,
}

/// Scan comment-stripped text for top-level type declaration headers, in
/// source order.
pub fn scan_declarations(clean: &str) -> Vec<TypeHeader> {
    let mut headers = Vec::new();

    for cap in TYPE_HEADER_RE.captures_iter(clean) {
        let Some(whole) = cap.get(0) else { continue };
        let start = whole.start();
        if start > 0 && !matches!(clean.as_bytes()[start - 1], b'\n' | b'\r') {
            continue;
        }

        let Some(kind) = cap.name("kind").and_then(|m| TypeKind::from_keyword(m.as_str())) else {
            continue;
        };
        let name = cap.name("name").map(|m| m.as_str()).unwrap_or_default().to_string();
        let modifiers: Vec<String> = cap
            .name("modifiers")
            .map(|m| m.as_str().split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let rest = cap.name("rest").map(|m| m.as_str()).unwrap_or_default();
        let (extends, implements) = parse_supertype_clauses(rest);

        headers.push(TypeHeader {
            kind,
            name,
            modifiers,
            extends,
            implements,
            header_end: whole.end(),
        });
    }

    headers
}

/// Split the text between a type name and its opening brace into the
/// `extends` and `implements` reference lists. A `permits` clause ends
/// whichever clause precedes it and is otherwise ignored.
pub fn parse_supertype_clauses(rest: &str) -> (Vec<String>, Vec<String>) {
    let rest = strip_generics(rest);
    let keywords: Vec<(usize, usize, &str)> = CLAUSE_KEYWORD_RE
        .find_iter(&rest)
        .map(|m| (m.start(), m.end(), m.as_str()))
        .collect();

    let mut extends = Vec::new();
    let mut implements = Vec::new();
    for (i, &(_, clause_start, keyword)) in keywords.iter().enumerate() {
        let clause_end = keywords.get(i + 1).map(|k| k.0).unwrap_or(rest.len());
        let clause = &rest[clause_start..clause_end];
        match keyword {
            "extends" => extends.extend(split_references(clause)),
            "implements" => implements.extend(split_references(clause)),
            _ => {}
        }
    }
    (extends, implements)
}

/// Split a comma-separated list of type references, ignoring commas inside
/// generic argument lists.
pub fn split_references(clause: &str) -> Vec<String> {
    strip_generics(clause)
        .split(',')
        .map(sanitize_type_reference)
        .filter(|r| !r.is_empty())
        .collect()
}

/// Reduce a raw supertype reference to a bare simple name:
/// `java.util.List<String>` → `List`.
pub fn sanitize_type_reference(raw: &str) -> String {
    let no_generics = strip_generics(raw.trim());
    let clean = no_generics.trim().trim_end_matches('&').replace("...", "");
    let clean = clean.trim();
    clean.rsplit('.').next().unwrap_or(clean).trim().to_string()
}

/// Remove every balanced `<...>` span, nesting included. A stray `>` with no
/// matching `<` is kept.
pub fn strip_generics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}
