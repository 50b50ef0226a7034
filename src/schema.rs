use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::er_ast::*;
use crate::error::Error;
use crate::tag_parser::apply_tag;

pub const TAG_KEY: &str = "erd";

pub const KIND_REFERENCE: &str = "reference";
pub const KIND_COLLECTION: &str = "collection";
pub const KIND_EMBEDDING: &str = "embedding";
pub const KIND_MAP: &str = "map";

pub type SchemaMetadata = BTreeMap<String, ModelMetadata>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub type_name: String,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub fields: Vec<FieldMetadata>,
    #[serde(default)]
    pub relationships: Vec<TypeRelationship>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeRelationship {
    pub from: String,
    pub to: String,
    pub field: String,
    pub kind: String,
}

pub fn from_schema(title: &str, schema: &SchemaMetadata) -> Diagram {
    let mut diagram = Diagram::new(title);

    for meta in schema.values() {
        let relationship_fields: BTreeSet<&str> = meta
            .relationships
            .iter()
            .map(|r| r.field.as_str())
            .collect();
        let entity = entity_from(meta, |field| {
            !relationship_fields.contains(field.name.as_str())
        });
        diagram = diagram.with_entity(entity);
    }

    for meta in schema.values() {
        for rel in &meta.relationships {
            diagram = diagram.with_relationship(relationship_from(rel));
        }
    }

    debug!(
        "built diagram `{title}` from schema: {} entities, {} relationships",
        diagram.entities.len(),
        diagram.relationships.len()
    );
    diagram
}

/// Converts one model, keeping every field as an attribute.
pub fn from_metadata(meta: &ModelMetadata) -> Entity {
    entity_from(meta, |_| true)
}

pub fn from_json(title: &str, input: &str) -> Result<Diagram, Error> {
    let schema: SchemaMetadata = serde_json::from_str(input)?;
    Ok(from_schema(title, &schema))
}

fn entity_from(meta: &ModelMetadata, keep: impl Fn(&FieldMetadata) -> bool) -> Entity {
    let mut entity = Entity::new(&meta.type_name);
    if !meta.package_name.is_empty() {
        entity = entity.with_package(&meta.package_name);
    }
    for field in meta.fields.iter().filter(|&f| keep(f)) {
        entity = entity.with_attribute(attribute_from(field));
    }
    entity
}

fn attribute_from(field: &FieldMetadata) -> Attribute {
    let (attr_type, nullable) = match field.field_type.strip_prefix('*') {
        Some(inner) => (inner, true),
        None => (field.field_type.as_str(), false),
    };

    let mut attr = Attribute::new(&field.name, attr_type);
    attr.nullable = nullable;
    if let Some(tag) = field.tags.get(TAG_KEY) {
        apply_tag(&mut attr, tag);
    }
    attr
}

fn relationship_from(rel: &TypeRelationship) -> Relationship {
    Relationship::new(&rel.from, &rel.to, &rel.field, cardinality_from_kind(&rel.kind))
}

pub fn cardinality_from_kind(kind: &str) -> Cardinality {
    match kind {
        KIND_REFERENCE => Cardinality::OneToOne,
        KIND_COLLECTION => Cardinality::OneToMany,
        KIND_EMBEDDING => Cardinality::OneToOne,
        KIND_MAP => Cardinality::ManyToMany,
        _ => Cardinality::OneToOne,
    }
}
