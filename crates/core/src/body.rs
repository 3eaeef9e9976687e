//! Body extraction by depth-counted brace matching.

/// The text between a declaration's opening brace and its matching close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassBody<'a> {
    pub text: &'a str,
    /// Offset just past the closing brace. `None` when no opening brace
    /// follows the header.
    pub end: Option<usize>,
}

const EMPTY_BODY: ClassBody<'static> = ClassBody { text: "", end: None };

/// Locate the first `{` at or after `start` and return everything up to its
/// matching `}`. On truncated input the body runs to the end of the text.
pub fn find_class_body(clean: &str, start: usize) -> ClassBody<'_> {
    let Some(tail) = clean.get(start..) else {
        return EMPTY_BODY;
    };
    let Some(rel) = tail.find('{') else {
        return EMPTY_BODY;
    };
    let open = start + rel;

    let bytes = clean.as_bytes();
    let mut depth = 1usize;
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return ClassBody { text: &clean[open + 1..i], end: Some(i + 1) };
                }
            }
            _ => {}
        }
        i += 1;
    }

    ClassBody { text: &clean[open + 1..], end: Some(clean.len()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_braces() {
        let src = "class A { void f() { if (x) { y(); } } int z; } tail";
        let body = find_class_body(src, 0);
        assert_eq!(body.text, " void f() { if (x) { y(); } } int z; ");
        assert_eq!(&src[body.end.unwrap()..], " tail");
    }

    #[test]
    fn test_sibling_bodies_advance() {
        let src = "class A { int a; }\nclass B { int b; }\n";
        let first = find_class_body(src, 0);
        assert_eq!(first.text, " int a; ");
        let second = find_class_body(src, first.end.unwrap());
        assert_eq!(second.text, " int b; ");
        assert_ne!(first.end, second.end);
    }

    #[test]
    fn test_missing_brace_is_empty() {
        let body = find_class_body("class A extends B", 0);
        assert_eq!(body.text, "");
        assert_eq!(body.end, None);
    }

    #[test]
    fn test_start_past_end_is_empty() {
        assert_eq!(find_class_body("{}", 10).end, None);
    }

    #[test]
    fn test_truncated_body_runs_to_end() {
        let src = "class A { void f() { ";
        let body = find_class_body(src, 0);
        assert_eq!(body.text, " void f() { ");
        assert_eq!(body.end, Some(src.len()));
    }

    #[test]
    fn test_empty_body() {
        let body = find_class_body("enum E {}", 0);
        assert_eq!(body.text, "");
        assert_eq!(body.end, Some(9));
    }
}
