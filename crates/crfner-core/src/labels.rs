//! # Entity Labels
//!
//! Parses the string labels a model emits (`B-PERSON`, `I-LOC`, `O`, ...)
//! into a scheme prefix and an entity type. Both BIO and BILUO prefixes are
//! understood; a bare entity name (IO scheme) has no prefix.

use std::fmt;

/// Position of a token inside an entity span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// `B-`: first token of a multi-token span.
    Begin,
    /// `I-`: continuation token.
    Inside,
    /// `L-`: last token of a multi-token span.
    Last,
    /// `U-`: single-token span.
    Unit,
    /// No prefix, the label is the entity name itself.
    Bare,
}

impl Position {
    fn prefix(&self) -> &'static str {
        match self {
            Position::Begin => "B-",
            Position::Inside => "I-",
            Position::Last => "L-",
            Position::Unit => "U-",
            Position::Bare => "",
        }
    }
}

/// A parsed entity label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// `O`, not part of any entity.
    Outside,
    /// Part of an entity of the given type.
    Entity { position: Position, entity: String },
}

impl Label {
    /// Parse a label string. Never fails: anything that is not `O` and carries
    /// no known prefix is taken as a bare entity name.
    pub fn parse(label: &str) -> Self {
        if label == "O" || label.is_empty() {
            return Label::Outside;
        }

        let position = match label.get(..2) {
            Some("B-") => Position::Begin,
            Some("I-") => Position::Inside,
            Some("L-") => Position::Last,
            Some("U-") => Position::Unit,
            _ => Position::Bare,
        };
        let entity = &label[position.prefix().len()..];

        Label::Entity {
            position,
            entity: entity.to_string(),
        }
    }

    /// Entity type, or `None` for `O`.
    pub fn entity(&self) -> Option<&str> {
        match self {
            Label::Outside => None,
            Label::Entity { entity, .. } => Some(entity),
        }
    }

    /// Scheme position, or `None` for `O`.
    pub fn position(&self) -> Option<Position> {
        match self {
            Label::Outside => None,
            Label::Entity { position, .. } => Some(*position),
        }
    }

    /// Same position with a different entity type. `O` stays `O`.
    pub fn with_entity(&self, entity: impl Into<String>) -> Self {
        match self {
            Label::Outside => Label::Outside,
            Label::Entity { position, .. } => Label::Entity {
                position: *position,
                entity: entity.into(),
            },
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Outside => write!(f, "O"),
            Label::Entity { position, entity } => write!(f, "{}{}", position.prefix(), entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for raw in ["O", "B-PERSON", "I-LOC", "L-ORG", "U-DATE", "PERSON"] {
            assert_eq!(Label::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_entity_and_position() {
        let label = Label::parse("B-PERSON");
        assert_eq!(label.entity(), Some("PERSON"));
        assert_eq!(label.position(), Some(Position::Begin));

        assert_eq!(Label::parse("O").entity(), None);
        assert_eq!(Label::parse("GPE").position(), Some(Position::Bare));
    }

    #[test]
    fn test_with_entity_keeps_prefix() {
        assert_eq!(Label::parse("I-PER").with_entity("PERSON").to_string(), "I-PERSON");
        assert_eq!(Label::parse("O").with_entity("PERSON"), Label::Outside);
    }
}
