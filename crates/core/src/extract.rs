//! Per-file extraction pipeline and registry assembly.
//!
//! Each file is processed purely from its own text, so the map over files
//! runs in parallel; the merge into the registry is sequential and follows
//! input order, which makes last-write-wins deterministic.

use crate::body::find_class_body;
use crate::comments::strip_comments;
use crate::members::{split_top_level_members, Member, MemberKind};
use crate::scanner::{scan_declarations, TypeHeader};
use crate::signature::{
    is_method_declaration, is_nested_type_header, parse_field, parse_method,
};
use crate::types::*;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Extract every type declared in one file's raw text, in declaration order.
pub fn extract_types(text: &str, rel_path: &str) -> Vec<TypeRecord> {
    let clean = strip_comments(text);
    scan_declarations(&clean)
        .into_iter()
        .map(|header| build_record(&clean, header, rel_path))
        .collect()
}

fn build_record(clean: &str, header: TypeHeader, rel_path: &str) -> TypeRecord {
    let mut record = TypeRecord {
        name: header.name,
        kind: header.kind,
        modifiers: header.modifiers,
        extends: header.extends,
        implements: header.implements,
        fields: Vec::new(),
        methods: Vec::new(),
        path: rel_path.to_string(),
    };

    // Enum constant lists are not modeled.
    if record.kind == TypeKind::Enum {
        return record;
    }

    let body = find_class_body(clean, header.header_end);
    if body.end.is_none() {
        debug!(path = rel_path, name = record.name.as_str(), "No body found for type");
        return record;
    }

    for member in split_top_level_members(body.text) {
        populate_member(&mut record, &member);
    }
    record
}

fn populate_member(record: &mut TypeRecord, member: &Member) {
    match member.kind {
        MemberKind::Declaration => {
            if is_method_declaration(&member.header) {
                if let Some(method) = parse_method(&member.header, &record.name) {
                    record.methods.push(method);
                }
            } else if let Some(field) = parse_field(&member.header) {
                record.fields.push(field);
            }
        }
        MemberKind::Block => {
            if member.header == "static" || is_nested_type_header(&member.header) {
                return;
            }
            if let Some(method) = parse_method(&member.header, &record.name) {
                record.methods.push(method);
            }
        }
    }
}

/// Merge per-file records into a registry in input order. A name declared
/// again in a later file replaces the earlier record.
pub fn build_registry(files: &[SourceFile]) -> TypeRegistry {
    let per_file: Vec<Vec<TypeRecord>> =
        files.par_iter().map(|f| extract_types(&f.text, &f.rel_path)).collect();

    let mut registry = TypeRegistry::new();
    for records in per_file {
        for record in records {
            let name = record.name.clone();
            let path = record.path.clone();
            if let Some(previous) = registry.insert(record) {
                warn!(
                    name = name.as_str(),
                    previous = previous.path.as_str(),
                    replacement = path.as_str(),
                    "Duplicate type name, keeping the later declaration"
                );
            }
        }
    }

    info!(files = files.len(), types = registry.len(), "Extraction complete");
    registry
}
