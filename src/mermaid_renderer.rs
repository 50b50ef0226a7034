use log::debug;

use crate::er_ast::*;
use crate::sanitize::{escape_comment, sanitize_name, sanitize_type};

pub fn render(diagram: &Diagram) -> String {
    debug!(
        "rendering mermaid: {} entities, {} relationships",
        diagram.entities.len(),
        diagram.relationships.len()
    );

    let mut out = String::from("erDiagram\n");

    for entity in diagram.entities.values() {
        out.push_str(&format!("    {} {{\n", sanitize_name(&entity.name)));
        for attr in &entity.attributes {
            out.push_str(&format_attribute(attr));
        }
        out.push_str("    }\n");
    }

    for rel in &diagram.relationships {
        out.push_str(&format_relationship(rel));
    }

    out
}

fn format_attribute(attr: &Attribute) -> String {
    let mut line = format!("{} {}", sanitize_type(&attr.attr_type), attr.name);
    if let Some(key) = &attr.key {
        line.push(' ');
        line.push_str(key.as_str());
    }

    let mut comments: Vec<&str> = Vec::new();
    if attr.nullable {
        comments.push("nullable");
    }
    if let Some(note) = &attr.note {
        comments.push(note);
    }
    if !comments.is_empty() {
        line.push_str(&format!(" \"{}\"", escape_comment(&comments.join(", "))));
    }

    format!("        {line}\n")
}

fn format_relationship(rel: &Relationship) -> String {
    format!(
        "    {} {} {} : {}\n",
        sanitize_name(&rel.from),
        relationship_symbol(&rel.cardinality),
        sanitize_name(&rel.to),
        rel.display_label()
    )
}

fn relationship_symbol(card: &Cardinality) -> &'static str {
    match card {
        Cardinality::OneToOne => "||--||",
        Cardinality::OneToMany => "||--o{",
        Cardinality::ManyToOne => "}o--||",
        Cardinality::ManyToMany => "}o--o{",
        Cardinality::Unrecognized(_) => "||--||",
    }
}
