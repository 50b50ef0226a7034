use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Diagram {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub entities: BTreeMap<String, Entity>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyKind {
    PrimaryKey,
    ForeignKey,
    UniqueKey,
    Unrecognized(String),
}

impl KeyKind {
    pub fn as_str(&self) -> &str {
        match self {
            KeyKind::PrimaryKey => "PK",
            KeyKind::ForeignKey => "FK",
            KeyKind::UniqueKey => "UK",
            KeyKind::Unrecognized(raw) => raw,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, KeyKind::Unrecognized(_))
    }
}

impl From<&str> for KeyKind {
    fn from(s: &str) -> Self {
        match s {
            "PK" => KeyKind::PrimaryKey,
            "FK" => KeyKind::ForeignKey,
            "UK" => KeyKind::UniqueKey,
            other => KeyKind::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for KeyKind {
    fn from(s: String) -> Self {
        KeyKind::from(s.as_str())
    }
}

impl From<KeyKind> for String {
    fn from(key: KeyKind) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
    Unrecognized(String),
}

impl Cardinality {
    pub fn as_str(&self) -> &str {
        match self {
            Cardinality::OneToOne => "one-to-one",
            Cardinality::OneToMany => "one-to-many",
            Cardinality::ManyToOne => "many-to-one",
            Cardinality::ManyToMany => "many-to-many",
            Cardinality::Unrecognized(raw) => raw,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Cardinality::Unrecognized(_))
    }
}

impl From<&str> for Cardinality {
    fn from(s: &str) -> Self {
        match s {
            "one-to-one" => Cardinality::OneToOne,
            "one-to-many" => Cardinality::OneToMany,
            "many-to-one" => Cardinality::ManyToOne,
            "many-to-many" => Cardinality::ManyToMany,
            other => Cardinality::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Cardinality {
    fn from(s: String) -> Self {
        Cardinality::from(s.as_str())
    }
}

impl From<Cardinality> for String {
    fn from(card: Cardinality) -> Self {
        card.as_str().to_string()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Diagram {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an entity keyed by its name, replacing any entity of the same name.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    pub fn with_relationship(mut self, rel: Relationship) -> Self {
        self.relationships.push(rel);
        self
    }

    pub fn from_json(input: &str) -> Result<Self, crate::error::Error> {
        Ok(serde_json::from_str(input)?)
    }
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>, attr_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: KeyKind) -> Self {
        self.key = Some(key);
        self
    }

    pub fn primary_key(self) -> Self {
        self.with_key(KeyKind::PrimaryKey)
    }

    pub fn foreign_key(self) -> Self {
        self.with_key(KeyKind::ForeignKey)
    }

    pub fn unique(self) -> Self {
        self.with_key(KeyKind::UniqueKey)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Relationship {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        field: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            field: field.into(),
            label: None,
            note: None,
            cardinality,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field)
    }
}
