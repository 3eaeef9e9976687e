//! Core types shared across umlscope: scan configuration, source files, the
//! structural model (types, fields, methods, parameters) and the type registry.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Scan configuration
// ---------------------------------------------------------------------------

/// Default location of the rendered diagram, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "docs/uml/project-class-diagram.puml";

/// Runtime configuration for a run. Loaded from .umlscope.toml or defaults.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub root: PathBuf,
    /// Directories to scan (relative to root). Empty = scan root itself.
    pub scan_dirs: Vec<String>,
    /// Directory names to skip during walk.
    pub skip_dirs: HashSet<String>,
    /// File extensions to include.
    pub extensions: HashSet<String>,
    /// Diagram output path (relative to root unless absolute).
    pub output: PathBuf,
    /// `skinparam` lines emitted after `@startuml`.
    pub skinparams: Vec<String>,
}

impl ScanConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            scan_dirs: vec!["src".to_string()],
            skip_dirs: [".git", ".svn", ".hg", "target", "build", "out", "bin", ".gradle", ".idea"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extensions: ["java"].iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            skinparams: vec!["classAttributeIconSize 0".to_string()],
        }
    }

    /// Output path resolved against the project root.
    pub fn output_path(&self) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            self.root.join(&self.output)
        }
    }
}

/// One input file: path relative to the project root plus its decoded text.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub rel_path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(rel_path: impl Into<String>, text: impl Into<String>) -> Self {
        Self { rel_path: rel_path.into(), text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Structural model
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

impl TypeKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "enum" => Some(TypeKind::Enum),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

/// Member visibility, rendered as the PlantUML visibility symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Package,
}

impl Visibility {
    /// First of public/protected/private present in `modifiers`, else package.
    pub fn from_modifiers(modifiers: &[String]) -> Self {
        for (keyword, vis) in [
            ("public", Visibility::Public),
            ("protected", Visibility::Protected),
            ("private", Visibility::Private),
        ] {
            if modifiers.iter().any(|m| m == keyword) {
                return vis;
            }
        }
        Visibility::Package
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Visibility::Public => "+",
            Visibility::Protected => "#",
            Visibility::Private => "-",
            Visibility::Package => "~",
        }
    }
}

/// Join modifier tags into a member prefix: `"{static} {final} "`, or `""`.
fn member_prefix(tags: &[&str]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!("{} ", tags.join(" "))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
}

impl FieldRecord {
    pub fn prefix(&self) -> String {
        let mut tags = Vec::new();
        if self.is_static {
            tags.push("{static}");
        }
        if self.is_final {
            tags.push("{final}");
        }
        member_prefix(&tags)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Empty when the fragment had a single token.
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn display(&self) -> String {
        if self.name.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}: {}", self.name, self.type_name)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodRecord {
    pub name: String,
    pub is_constructor: bool,
    /// Empty for constructors.
    pub return_type: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub parameters: Vec<Parameter>,
}

impl MethodRecord {
    pub fn prefix(&self) -> String {
        let mut tags = Vec::new();
        if self.is_static {
            tags.push("{static}");
        }
        if self.is_abstract {
            tags.push("{abstract}");
        }
        member_prefix(&tags)
    }

    /// `name(a: A, B)` without the return type.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(Parameter::display).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeRecord {
    pub name: String,
    pub kind: TypeKind,
    pub modifiers: Vec<String>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub fields: Vec<FieldRecord>,
    pub methods: Vec<MethodRecord>,
    /// Relative path of the declaring file; empty when extracted from bare text.
    pub path: String,
}

impl TypeRecord {
    pub fn is_abstract(&self) -> bool {
        self.modifiers.iter().any(|m| m == "abstract")
    }

    pub fn has_members(&self) -> bool {
        !self.fields.is_empty() || !self.methods.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Type registry
// ---------------------------------------------------------------------------

/// Name → [`TypeRecord`] mapping with last-write-wins insertion.
///
/// Iteration follows first-insertion order (file order, then declaration
/// order). Replacing an existing name keeps that name's original slot.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    records: Vec<TypeRecord>,
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same name.
    /// Returns the replaced record.
    pub fn insert(&mut self, record: TypeRecord) -> Option<TypeRecord> {
        match self.index.get(&record.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeRecord> {
        self.index.get(name).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRecord> {
        self.records.iter()
    }

    /// Records ordered by name, as the renderer emits them.
    pub fn sorted(&self) -> Vec<&TypeRecord> {
        let mut out: Vec<&TypeRecord> = self.records.iter().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, path: &str) -> TypeRecord {
        TypeRecord {
            name: name.to_string(),
            kind: TypeKind::Class,
            modifiers: vec![],
            extends: vec![],
            implements: vec![],
            fields: vec![],
            methods: vec![],
            path: path.to_string(),
        }
    }

    #[test]
    fn test_registry_last_write_wins() {
        let mut reg = TypeRegistry::new();
        assert!(reg.insert(record("Node", "a/Node.java")).is_none());
        assert!(reg.insert(record("Edge", "a/Edge.java")).is_none());
        let replaced = reg.insert(record("Node", "b/Node.java")).unwrap();
        assert_eq!(replaced.path, "a/Node.java");
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("Node").unwrap().path, "b/Node.java");
        // Replacement keeps the original slot
        let names: Vec<&str> = reg.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Node", "Edge"]);
    }

    #[test]
    fn test_registry_sorted() {
        let mut reg = TypeRegistry::new();
        reg.insert(record("Zeta", ""));
        reg.insert(record("Alpha", ""));
        let names: Vec<&str> = reg.sorted().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_visibility_from_modifiers() {
        let mods = |m: &[&str]| m.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(Visibility::from_modifiers(&mods(&["static", "private"])), Visibility::Private);
        assert_eq!(Visibility::from_modifiers(&mods(&["final"])), Visibility::Package);
        assert_eq!(Visibility::from_modifiers(&mods(&["public", "private"])), Visibility::Public);
        assert_eq!(Visibility::Protected.symbol(), "#");
        assert_eq!(Visibility::Package.symbol(), "~");
    }

    #[test]
    fn test_member_prefixes() {
        let field = FieldRecord {
            name: "count".into(),
            type_name: "int".into(),
            visibility: Visibility::Private,
            is_static: true,
            is_final: true,
        };
        assert_eq!(field.prefix(), "{static} {final} ");

        let method = MethodRecord {
            name: "run".into(),
            is_constructor: false,
            return_type: "void".into(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            parameters: vec![
                Parameter { name: "label".into(), type_name: "String".into() },
                Parameter { name: String::new(), type_name: "int".into() },
            ],
        };
        assert_eq!(method.prefix(), "");
        assert_eq!(method.signature(), "run(label: String, int)");
    }
}
