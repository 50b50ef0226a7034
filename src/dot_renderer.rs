use log::debug;

use crate::er_ast::*;
use crate::sanitize::{escape, sanitize_name, sanitize_type};

/// Renders the diagram as a Graphviz digraph of record nodes.
pub fn render(diagram: &Diagram) -> String {
    debug!(
        "rendering dot: {} entities, {} relationships",
        diagram.entities.len(),
        diagram.relationships.len()
    );

    let mut out = String::new();
    out.push_str("digraph ERD {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=record];\n");

    if !diagram.title.trim().is_empty() {
        out.push_str("    labelloc=\"t\";\n");
        out.push_str(&format!("    label=\"{}\";\n", escape(&diagram.title)));
    }
    out.push('\n');

    for entity in diagram.entities.values() {
        out.push_str(&format_entity(entity));
    }
    out.push('\n');

    for rel in &diagram.relationships {
        out.push_str(&format_relationship(rel));
    }

    out.push_str("}\n");
    out
}

fn format_entity(entity: &Entity) -> String {
    let mut rows = String::new();
    for attr in &entity.attributes {
        rows.push_str(&format_attribute(attr));
        rows.push_str("\\l");
    }
    if entity.attributes.is_empty() {
        rows.push_str("\\l");
    }
    format!(
        "    {} [label=\"{{{}|{}}}\"];\n",
        sanitize_name(&entity.name),
        escape(&entity.name),
        rows
    )
}

fn format_attribute(attr: &Attribute) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if let Some(key) = &attr.key {
        parts.push(key.to_string());
    }
    parts.push(format!("{}: {}", attr.name, sanitize_type(&attr.attr_type)));
    if attr.nullable {
        parts.push("?".to_string());
    }
    escape(&parts.join(" "))
}

fn format_relationship(rel: &Relationship) -> String {
    format!(
        "    {} -> {} [{} label=\"{}\"];\n",
        sanitize_name(&rel.from),
        sanitize_name(&rel.to),
        edge_style(&rel.cardinality),
        escape(rel.display_label())
    )
}

fn edge_style(card: &Cardinality) -> &'static str {
    match card {
        Cardinality::OneToOne => "arrowhead=normal, arrowtail=normal, dir=both",
        Cardinality::OneToMany => "arrowhead=crow, arrowtail=normal, dir=both",
        Cardinality::ManyToOne => "arrowhead=normal, arrowtail=crow, dir=both",
        Cardinality::ManyToMany => "arrowhead=crow, arrowtail=crow, dir=both",
        Cardinality::Unrecognized(_) => "arrowhead=normal",
    }
}
