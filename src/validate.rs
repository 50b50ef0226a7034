use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

use crate::er_ast::*;

/// A single diagnostic, addressed by a dotted field path such as
/// `Entity[User].Attribute[0].Name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn prefixed(self, prefix: &str) -> Self {
        Self {
            field: format!("{prefix}.{}", self.field),
            message: self.message,
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn validate(diagram: &Diagram) -> Vec<ValidationError> {
    debug!(
        "validating diagram: {} entities, {} relationships",
        diagram.entities.len(),
        diagram.relationships.len()
    );

    let mut errors = Vec::new();

    if is_blank(&diagram.title) {
        errors.push(ValidationError::new("Title", "diagram title is required"));
    }

    if diagram.entities.is_empty() {
        errors.push(ValidationError::new(
            "Entities",
            "diagram must have at least one entity",
        ));
    }

    for (name, entity) in &diagram.entities {
        let prefix = format!("Entity[{name}]");
        errors.extend(
            validate_entity(entity)
                .into_iter()
                .map(|e| e.prefixed(&prefix)),
        );
    }

    for (i, rel) in diagram.relationships.iter().enumerate() {
        let prefix = format!("Relationship[{i}]");
        errors.extend(
            validate_relationship(rel, &diagram.entities)
                .into_iter()
                .map(|e| e.prefixed(&prefix)),
        );
    }

    errors
}

pub fn validate_entity(entity: &Entity) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&entity.name) {
        errors.push(ValidationError::new("Name", "entity name is required"));
    }

    if entity.attributes.is_empty() {
        errors.push(ValidationError::new(
            "Attributes",
            "entity must have at least one attribute",
        ));
    }

    for (i, attr) in entity.attributes.iter().enumerate() {
        let prefix = format!("Attribute[{i}]");
        errors.extend(
            validate_attribute(attr)
                .into_iter()
                .map(|e| e.prefixed(&prefix)),
        );
    }

    errors
}

pub fn validate_attribute(attr: &Attribute) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&attr.name) {
        errors.push(ValidationError::new("Name", "attribute name is required"));
    }

    if is_blank(&attr.attr_type) {
        errors.push(ValidationError::new("Type", "attribute type is required"));
    }

    if let Some(key) = attr.key.as_ref().filter(|k| !k.is_valid()) {
        errors.push(ValidationError::new(
            "Key",
            format!("invalid key type: {key}"),
        ));
    }

    errors
}

pub fn validate_relationship(
    rel: &Relationship,
    entities: &BTreeMap<String, Entity>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_endpoint(&mut errors, "From", "from", &rel.from, entities);
    check_endpoint(&mut errors, "To", "to", &rel.to, entities);

    if is_blank(&rel.field) {
        errors.push(ValidationError::new("Field", "field name is required"));
    }

    if !rel.cardinality.is_valid() {
        errors.push(ValidationError::new(
            "Cardinality",
            format!("invalid cardinality: {}", rel.cardinality),
        ));
    }

    errors
}

fn check_endpoint(
    errors: &mut Vec<ValidationError>,
    field: &str,
    role: &str,
    name: &str,
    entities: &BTreeMap<String, Entity>,
) {
    if is_blank(name) {
        errors.push(ValidationError::new(
            field,
            format!("{role} entity is required"),
        ));
    } else if !entities.contains_key(name) {
        errors.push(ValidationError::new(
            field,
            format!("entity '{name}' does not exist"),
        ));
    }
}
