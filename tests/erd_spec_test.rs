use erd::{Attribute, Cardinality, Diagram, Entity, Format, KeyKind, Relationship};
use pretty_assertions::assert_eq;

fn user() -> Entity {
    Entity::new("User").with_attribute(Attribute::new("ID", "string"))
}

fn messages(diagram: &Diagram) -> Vec<String> {
    erd::validate(diagram).iter().map(ToString::to_string).collect()
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn spec_valid_single_entity() {
    let diagram = Diagram::new("Test").with_entity(user());
    assert!(erd::validate(&diagram).is_empty());
}

#[test]
fn spec_blank_title_reported() {
    for title in ["", "   ", "\t\n"] {
        let diagram = Diagram::new(title).with_entity(user());
        let errors = erd::validate(&diagram);
        assert!(
            errors.iter().any(|e| e.field == "Title"),
            "title {title:?} should be reported, got {errors:?}"
        );
    }
}

#[test]
fn spec_no_entities_reported() {
    let errors = erd::validate(&Diagram::new("Test"));
    assert!(errors.iter().any(|e| e.field == "Entities"));
}

#[test]
fn spec_empty_entity_with_dangling_relationship() {
    let diagram = Diagram::new("Test")
        .with_entity(Entity::new("Empty"))
        .with_relationship(Relationship::new("Empty", "NonExistent", "Ref", Cardinality::OneToOne));
    assert_eq!(
        messages(&diagram),
        vec![
            "Entity[Empty].Attributes: entity must have at least one attribute",
            "Relationship[0].To: entity 'NonExistent' does not exist",
        ]
    );
}

#[test]
fn spec_missing_endpoints_report_only_their_field() {
    let diagram = Diagram::new("Test")
        .with_entity(user())
        .with_relationship(Relationship::new("Ghost", "User", "Owner", Cardinality::ManyToOne))
        .with_relationship(Relationship::new("User", "Phantom", "Items", Cardinality::OneToMany));
    assert_eq!(
        messages(&diagram),
        vec![
            "Relationship[0].From: entity 'Ghost' does not exist",
            "Relationship[1].To: entity 'Phantom' does not exist",
        ]
    );
}

#[test]
fn spec_invalid_key_kind() {
    let diagram = Diagram::new("Test").with_entity(
        Entity::new("User").with_attribute(Attribute::new("ID", "string").with_key(KeyKind::from("INVALID"))),
    );
    assert_eq!(
        messages(&diagram),
        vec!["Entity[User].Attribute[0].Key: invalid key type: INVALID"]
    );
}

#[test]
fn spec_invalid_cardinality_from_json() {
    let input = r#"{
        "title": "Test",
        "entities": {"User": {"name": "User", "attributes": [{"name": "ID", "type": "string"}]}},
        "relationships": [{"from": "User", "to": "User", "field": "Self", "cardinality": "one-to-few"}]
    }"#;
    let diagram = Diagram::from_json(input).unwrap();
    assert_eq!(
        messages(&diagram),
        vec!["Relationship[0].Cardinality: invalid cardinality: one-to-few"]
    );
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn spec_one_to_many_in_both_notations() {
    let diagram = Diagram::new("Test")
        .with_entity(user())
        .with_entity(Entity::new("Post").with_attribute(Attribute::new("ID", "string")))
        .with_relationship(Relationship::new("User", "Post", "Posts", Cardinality::OneToMany));

    let dot = erd::render(&diagram, Format::Dot);
    assert!(
        dot.contains(r#"User -> Post [arrowhead=crow, arrowtail=normal, dir=both label="Posts"];"#),
        "got: {dot}"
    );

    let mermaid = erd::render(&diagram, Format::Mermaid);
    assert!(mermaid.contains("User ||--o{ Post : Posts"), "got: {mermaid}");
}

#[test]
fn spec_nullable_note_order() {
    let diagram = Diagram::new("Test").with_entity(
        Entity::new("Profile")
            .with_attribute(Attribute::new("Avatar", "*string").nullable().with_note("Profile picture URL")),
    );
    let mermaid = erd::render(&diagram, Format::Mermaid);
    assert!(
        mermaid.contains(r#"string Avatar "nullable, Profile picture URL""#),
        "got: {mermaid}"
    );
}

#[test]
fn spec_render_is_deterministic() {
    let build = || {
        ["Zeta", "Alpha", "Mid", "Beta"]
            .into_iter()
            .fold(Diagram::new("Order"), |d, name| {
                d.with_entity(Entity::new(name).with_attribute(Attribute::new("ID", "int")))
            })
            .with_relationship(Relationship::new("Zeta", "Alpha", "A", Cardinality::ManyToMany))
            .with_relationship(Relationship::new("Alpha", "Zeta", "Z", Cardinality::ManyToOne))
    };
    let diagram = build();
    for format in [Format::Mermaid, Format::Dot] {
        assert_eq!(erd::render(&diagram, format), erd::render(&diagram, format));
        assert_eq!(erd::render(&diagram, format), erd::render(&build(), format));
    }

    let mermaid = erd::render(&diagram, Format::Mermaid);
    let entity_lines: Vec<&str> = mermaid.lines().filter(|l| l.ends_with(" {")).collect();
    assert_eq!(
        entity_lines,
        vec!["    Alpha {", "    Beta {", "    Mid {", "    Zeta {"]
    );
    let rel_lines: Vec<&str> = mermaid.lines().filter(|l| l.contains(" : ")).collect();
    assert_eq!(
        rel_lines,
        vec!["    Zeta }o--o{ Alpha : A", "    Alpha }o--|| Zeta : Z"]
    );
}

#[test]
fn spec_render_does_not_mutate_model() {
    let diagram = Diagram::new("Test").with_entity(
        Entity::new("Line Item").with_attribute(Attribute::new("Tags", "[]*pkg.Tag")),
    );
    let before = diagram.clone();
    let _ = erd::render(&diagram, Format::Dot);
    let _ = erd::render(&diagram, Format::Mermaid);
    assert_eq!(diagram, before);
    assert_eq!(diagram.entities["Line Item"].attributes[0].attr_type, "[]*pkg.Tag");
}

#[test]
fn spec_dot_escapes_title_and_names() {
    let diagram = Diagram::new("Say \"hi\"\nthere").with_entity(
        Entity::new("Quote\"d").with_attribute(Attribute::new("Path", "string").with_note("C:\\tmp")),
    );
    let dot = erd::render(&diagram, Format::Dot);
    assert!(dot.contains(r#"label="Say \"hi\"\nthere";"#), "got: {dot}");
    assert!(dot.contains(r#"Quote"d [label="{Quote\"d|Path: string\l}"];"#), "got: {dot}");
}

#[test]
fn spec_strict_render_rejects_invalid() {
    let diagram = Diagram::new("Test").with_entity(Entity::new("Empty"));
    assert!(matches!(
        erd::render_checked(&diagram, Format::Dot),
        Err(erd::Error::Invalid(errors)) if errors.len() == 1
    ));
}
