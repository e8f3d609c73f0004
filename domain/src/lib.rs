//! Domain library for the catalog API.
//!
//! This crate holds the entity records, ports (traits), validation rules,
//! and error definitions. Keep adapters and IO concerns out of this crate;
//! the in-memory adapter under `adapters/` is the one storage variant we
//! ship, and anything HTTP-shaped lives in the api-server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A book in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
}

/// A registered user.
///
/// Email is stored as given; format validation is intentionally not
/// performed here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A stored record with a unique string identifier.
///
/// Implemented by every entity kind the repositories can hold.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Entity for Book {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Unvalidated input for creating or fully replacing one entity kind.
///
/// Each kind carries its own required-field rules; `validate` checks them in
/// declaration order so the first empty field wins, and `into_entity` builds
/// the complete record once an identifier has been assigned.
pub trait EntityDraft: Send {
    type Output: Entity;

    fn validate(&self) -> Result<(), CoreError>;
    fn into_entity(self, id: String) -> Self::Output;
}

/// Input attributes for a book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
}

impl EntityDraft for BookDraft {
    type Output = Book;

    fn validate(&self) -> Result<(), CoreError> {
        if self.title.is_empty() {
            return Err(CoreError::MissingField("title"));
        }
        if self.author.is_empty() {
            return Err(CoreError::MissingField("author"));
        }
        Ok(())
    }

    fn into_entity(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
        }
    }
}

/// Input attributes for a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl EntityDraft for UserDraft {
    type Output = User;

    fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() {
            return Err(CoreError::MissingField("name"));
        }
        if self.email.is_empty() {
            return Err(CoreError::MissingField("email"));
        }
        Ok(())
    }

    fn into_entity(self, id: String) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Repository port for persisting and loading one entity kind.
///
/// Implementations must report the exact failure conditions below so the
/// service layer stays storage-independent: `AlreadyExists` only from
/// `create` on a present id, `NotFound` only from operating on an absent id.
pub trait Repository: Send + Sync {
    type Entity: Entity;

    /// Store a new entity. Fails with [`CoreError::AlreadyExists`] if the
    /// identifier is already present; on success the stored entity is
    /// returned unchanged.
    fn create(&self, entity: Self::Entity) -> Result<Self::Entity, CoreError>;

    /// Fails with [`CoreError::NotFound`] if no entity has that identifier.
    fn get_by_id(&self, id: &str) -> Result<Self::Entity, CoreError>;

    /// Every stored entity, in unspecified order. An empty collection yields
    /// an empty vec, not an error.
    fn get_all(&self) -> Result<Vec<Self::Entity>, CoreError>;

    /// Fully replace the stored entity with the same identifier. Fails with
    /// [`CoreError::NotFound`] if the identifier does not exist.
    fn update(&self, entity: Self::Entity) -> Result<Self::Entity, CoreError>;

    /// Remove the entity with that identifier, or fail with
    /// [`CoreError::NotFound`].
    fn delete(&self, id: &str) -> Result<(), CoreError>;
}

/// Identifier generation strategy for newly created entities.
///
/// Values must be unique enough that repository-level `AlreadyExists` is
/// never hit by generation collisions in normal operation.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A required input field was empty. Raised only by the service layer,
    /// before the repository is touched.
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("resource already exists")]
    AlreadyExists,
    #[error("not found")]
    NotFound,
    /// Failure of the underlying storage technology, propagated unchanged.
    #[error("repository error: {0}")]
    Repository(String),
}

// Re-export modules when added
pub mod adapters;
pub mod id;
pub mod service;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_draft_checks_title_first() {
        let err = BookDraft {
            title: String::new(),
            author: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, CoreError::MissingField("title"));
    }

    #[test]
    fn book_draft_checks_author_second() {
        let err = BookDraft {
            title: "Clean Architecture".into(),
            author: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, CoreError::MissingField("author"));
    }

    #[test]
    fn user_draft_checks_name_then_email() {
        let err = UserDraft {
            name: String::new(),
            email: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, CoreError::MissingField("name"));

        let err = UserDraft {
            name: "Ada".into(),
            email: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, CoreError::MissingField("email"));
    }

    #[test]
    fn draft_builds_full_entity() {
        let book = BookDraft {
            title: "Clean Architecture".into(),
            author: "Robert C. Martin".into(),
        }
        .into_entity("b-1".into());
        assert_eq!(book.id, "b-1");
        assert_eq!(book.title, "Clean Architecture");
        assert_eq!(book.author, "Robert C. Martin");
    }

    #[test]
    fn missing_field_message() {
        assert_eq!(
            CoreError::MissingField("title").to_string(),
            "title is required"
        );
    }
}
