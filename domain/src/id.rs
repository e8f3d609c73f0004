//! Identifier generation strategies.

use uuid::Uuid;

use crate::IdGenerator;

/// Random v4 UUID generator. Collisions are not expected in practice; the
/// repository's duplicate check remains the backstop.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl UuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_non_empty_and_distinct() {
        let g = UuidGenerator::new();
        let a = g.next_id();
        let b = g.next_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }
}
