pub mod dot_renderer;
pub mod er_ast;
pub mod error;
pub mod mermaid_renderer;
pub mod sanitize;
pub mod schema;
pub mod tag_parser;
pub mod validate;

pub use er_ast::{Attribute, Cardinality, Diagram, Entity, KeyKind, Relationship};
pub use error::Error;
pub use validate::{ValidationError, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Mermaid,
    Dot,
}

/// Renders any diagram, valid or not.
pub fn render(diagram: &Diagram, format: Format) -> String {
    match format {
        Format::Mermaid => mermaid_renderer::render(diagram),
        Format::Dot => dot_renderer::render(diagram),
    }
}

pub fn check(diagram: &Diagram) -> Result<(), Error> {
    let errors = validate(diagram);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Invalid(errors))
    }
}

/// Renders only a diagram that passes validation.
pub fn render_checked(diagram: &Diagram, format: Format) -> Result<String, Error> {
    check(diagram)?;
    Ok(render(diagram, format))
}
