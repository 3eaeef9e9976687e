//! PlantUML rendering of a finished [`TypeRegistry`].
//!
//! Rendering is a pure function returning the document; writing it anywhere
//! is left to a caller-supplied sink.

use crate::resolve::{external_types, resolve_references};
use crate::types::{FieldRecord, MethodRecord, ScanConfig, TypeKind, TypeRecord, TypeRegistry};
use std::io::Write;
use std::path::Path;

/// Diagram-level options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emitted as `skinparam <value>` lines right after `@startuml`.
    pub skinparams: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { skinparams: vec!["classAttributeIconSize 0".to_string()] }
    }
}

impl RenderOptions {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self { skinparams: config.skinparams.clone() }
    }
}

fn type_keyword(record: &TypeRecord) -> &'static str {
    match record.kind {
        TypeKind::Class if record.is_abstract() => "abstract class",
        kind => kind.keyword(),
    }
}

fn field_line(field: &FieldRecord) -> String {
    let mut line = format!("    {} {}{}", field.visibility.symbol(), field.prefix(), field.name);
    if !field.type_name.is_empty() {
        line.push_str(" : ");
        line.push_str(&field.type_name);
    }
    line
}

fn method_line(method: &MethodRecord) -> String {
    let mut line =
        format!("    {} {}{}", method.visibility.symbol(), method.prefix(), method.signature());
    if !method.is_constructor && !method.return_type.is_empty() {
        line.push_str(" : ");
        line.push_str(&method.return_type);
    }
    line
}

/// Render the registry as a PlantUML class diagram. Lines are joined with
/// `\n` and the document has no trailing newline.
pub fn render_plantuml(registry: &TypeRegistry, options: &RenderOptions) -> String {
    let mut lines = vec!["@startuml".to_string()];
    lines.extend(options.skinparams.iter().map(|p| format!("skinparam {p}")));

    for record in registry.sorted() {
        let keyword = type_keyword(record);
        if !record.has_members() {
            lines.push(format!("{keyword} {}", record.name));
            continue;
        }
        lines.push(format!("{keyword} {} {{", record.name));
        lines.extend(record.fields.iter().map(field_line));
        lines.extend(record.methods.iter().map(method_line));
        lines.push("}".to_string());
    }

    for relation in resolve_references(registry) {
        lines.push(format!("{} {} {}", relation.source, relation.kind.arrow(), relation.target));
    }

    for name in external_types(registry) {
        lines.push(format!("class {name} <<external>>"));
    }

    lines.push("@enduml".to_string());
    lines.join("\n")
}

/// Write a rendered document to any sink.
pub fn write_diagram<W: Write>(document: &str, sink: &mut W) -> std::io::Result<()> {
    sink.write_all(document.as_bytes())?;
    sink.flush()
}

/// Write a rendered document to `path`, creating parent directories.
pub fn write_diagram_file(path: &Path, document: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Could not create {}: {e}", parent.display()))?;
    }
    let mut file = std::fs::File::create(path)
        .map_err(|e| format!("Could not create {}: {e}", path.display()))?;
    write_diagram(document, &mut file).map_err(|e| format!("Could not write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::build_registry;
    use crate::types::SourceFile;

    #[test]
    fn test_render_full_document() {
        let registry = build_registry(&[
            SourceFile::new(
                "Counter.java",
                "public abstract class Counter implements Tickable {\n  private static final int count;\n  protected String label;\n  public Counter(String label) {}\n  public static Counter of(int start) { return null; }\n  protected abstract void tick();\n}\n",
            ),
            SourceFile::new("Marker.java", "interface Marker {}\n"),
            SourceFile::new("Clock.java", "class Clock extends Counter implements Marker {}\n"),
        ]);
        let doc = render_plantuml(&registry, &RenderOptions::default());
        let expected = "\
@startuml
skinparam classAttributeIconSize 0
class Clock
abstract class Counter {
    - {static} {final} count : int
    # label : String
    + Counter(label: String)
    + {static} of(start: int) : Counter
    # {abstract} tick() : void
}
interface Marker
Clock --|> Counter
Clock ..|> Marker
Counter ..|> Tickable
class Tickable <<external>>
@enduml";
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_render_empty_registry() {
        let doc = render_plantuml(&TypeRegistry::new(), &RenderOptions { skinparams: vec![] });
        assert_eq!(doc, "@startuml\n@enduml");
    }

    #[test]
    fn test_external_stub_emitted_once() {
        let registry = build_registry(&[
            SourceFile::new("A.java", "class A extends Base {}\nclass B extends Base {}\n"),
        ]);
        let doc = render_plantuml(&registry, &RenderOptions::default());
        assert_eq!(doc.matches("class Base <<external>>").count(), 1);
        assert!(doc.contains("A --|> Base\nB --|> Base"));
    }

    #[test]
    fn test_enum_rendered_bare() {
        let registry = build_registry(&[SourceFile::new("E.java", "enum Level { LOW, HIGH }")]);
        let doc = render_plantuml(&registry, &RenderOptions::default());
        assert!(doc.contains("\nenum Level\n"));
    }

    #[test]
    fn test_write_diagram_to_sink() {
        let mut sink: Vec<u8> = Vec::new();
        write_diagram("@startuml\n@enduml", &mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "@startuml\n@enduml");
    }

    #[test]
    fn test_write_diagram_file_creates_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("docs/uml/out.puml");
        write_diagram_file(&path, "@startuml\n@enduml").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "@startuml\n@enduml");
    }
}
