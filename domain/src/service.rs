use crate::{CoreError, EntityDraft, IdGenerator, Repository};

/// Application service orchestrating CRUD for one entity kind.
///
/// It remains generic over repository and identifier generator, so the same
/// orchestration serves books and users; per-kind validation rules travel
/// with the draft types. The service holds a reference to its repository's
/// capabilities only through the port, which keeps the domain testable
/// without a real storage backend.
pub struct EntityService<R: Repository, G: IdGenerator> {
    repo: R,
    ids: G,
}

impl<R: Repository, G: IdGenerator> EntityService<R, G> {
    pub fn new(repo: R, ids: G) -> Self {
        Self { repo, ids }
    }

    /// Create a new entity from validated attributes and a freshly
    /// generated identifier.
    pub fn create<D>(&self, draft: D) -> Result<R::Entity, CoreError>
    where
        D: EntityDraft<Output = R::Entity>,
    {
        draft.validate()?;
        let id = self.ids.next_id();
        self.repo.create(draft.into_entity(id))
    }

    /// Look up an entity by identifier.
    pub fn get(&self, id: &str) -> Result<R::Entity, CoreError> {
        if id.is_empty() {
            return Err(CoreError::MissingField("id"));
        }
        self.repo.get_by_id(id)
    }

    /// List every stored entity. No filtering, no pagination.
    pub fn list(&self) -> Result<Vec<R::Entity>, CoreError> {
        self.repo.get_all()
    }

    /// Fully replace the entity with the given identifier. The identifier is
    /// checked before the attributes so an empty id wins over empty fields.
    pub fn update<D>(&self, id: &str, draft: D) -> Result<R::Entity, CoreError>
    where
        D: EntityDraft<Output = R::Entity>,
    {
        if id.is_empty() {
            return Err(CoreError::MissingField("id"));
        }
        draft.validate()?;
        self.repo.update(draft.into_entity(id.to_string()))
    }

    /// Remove the entity with the given identifier.
    pub fn delete(&self, id: &str) -> Result<(), CoreError> {
        if id.is_empty() {
            return Err(CoreError::MissingField("id"));
        }
        self.repo.delete(id)
    }
}
