//! Member splitting: partition a type body into top-level fragments.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Statement terminated by `;` at depth 0 (fields, body-less methods).
    Declaration,
    /// Header of a `{ ... }` block at depth 0 (methods, constructors,
    /// initializers, nested types). The block's own content is dropped.
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub header: String,
}

/// Walk `body` tracking brace depth and emit top-level fragments in source
/// order. Fragments with empty headers are dropped.
pub fn split_top_level_members(body: &str) -> Vec<Member> {
    let mut members = Vec::new();
    let mut token = String::new();
    let mut depth = 0usize;

    let mut flush = |kind: MemberKind, token: &mut String| {
        let header = token.trim();
        if !header.is_empty() {
            members.push(Member { kind, header: header.to_string() });
        }
        token.clear();
    };

    for ch in body.chars() {
        if depth == 0 {
            match ch {
                '{' => {
                    flush(MemberKind::Block, &mut token);
                    depth += 1;
                }
                ';' => flush(MemberKind::Declaration, &mut token),
                _ => token.push(ch),
            }
        } else {
            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
        }
    }

    members
}
