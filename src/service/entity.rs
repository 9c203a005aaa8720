//! Per-resource service: DTO <-> record translation around one repository.

use crate::error::AppResult;
use crate::mapper::EntityMapper;
use crate::pagination::PageRequest;
use crate::repository::{CrudRepository, EntityTable, Fetch};
use std::sync::Arc;

pub struct EntityService<M: EntityMapper> {
    repository: Arc<dyn CrudRepository<M::Entity>>,
}

impl<M: EntityMapper> EntityService<M> {
    pub fn new(repository: Arc<dyn CrudRepository<M::Entity>>) -> Self {
        EntityService { repository }
    }

    pub async fn save(&self, dto: M::Dto) -> AppResult<M::Dto> {
        tracing::debug!(entity = <M::Entity as EntityTable>::LABEL, "save");
        let entity = M::to_entity(&dto)?;
        let record = self.repository.save(entity).await?;
        Ok(M::to_dto(&record))
    }

    pub async fn update(&self, dto: M::Dto) -> AppResult<M::Dto> {
        tracing::debug!(entity = <M::Entity as EntityTable>::LABEL, id = ?M::dto_id(&dto), "update");
        self.save(dto).await
    }

    /// Apply the non-null fields of `dto` to the stored row. `None` when the row is gone.
    pub async fn partial_update(&self, id: i64, dto: M::Dto) -> AppResult<Option<M::Dto>> {
        tracing::debug!(entity = <M::Entity as EntityTable>::LABEL, id, "partial update");
        let record = self
            .repository
            .update_with(id, Box::new(move |entity: &mut M::Entity| M::partial_update(entity, &dto)))
            .await?;
        Ok(record.as_ref().map(M::to_dto))
    }

    pub async fn find_all(&self, page: &PageRequest, fetch: Fetch) -> AppResult<Vec<M::Dto>> {
        tracing::debug!(entity = <M::Entity as EntityTable>::LABEL, page = page.page, size = page.size, "find all");
        let records = self.repository.find_all_by(page, fetch).await?;
        Ok(records.iter().map(M::to_dto).collect())
    }

    pub async fn count_all(&self) -> AppResult<i64> {
        self.repository.count().await
    }

    pub async fn find_one(&self, id: i64) -> AppResult<Option<M::Dto>> {
        tracing::debug!(entity = <M::Entity as EntityTable>::LABEL, id, "find one");
        let record = self.repository.find_by_id(id, Fetch::Eager).await?;
        Ok(record.as_ref().map(M::to_dto))
    }

    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        self.repository.exists_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        tracing::debug!(entity = <M::Entity as EntityTable>::LABEL, id, "delete");
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridConfiguration;
    use crate::dto::GridConfigurationDto;
    use crate::error::AppError;
    use crate::mapper::GridConfigurationMapper;
    use crate::repository::LocalStore;

    fn service() -> EntityService<GridConfigurationMapper> {
        let store = LocalStore::new();
        EntityService::new(Arc::new(store.repository::<GridConfiguration>()))
    }

    fn named(name: &str) -> GridConfigurationDto {
        GridConfigurationDto {
            grid_name: Some(name.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_then_find_one() {
        let service = service();
        let saved = service.save(named("Orders Grid")).await.unwrap();
        let id = saved.id.unwrap();
        assert_eq!(service.find_one(id).await.unwrap(), Some(saved));
        assert_eq!(service.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_without_required_field_fails_and_stores_nothing() {
        let service = service();
        let err = service.save(GridConfigurationDto::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn partial_update_keeps_unsent_fields() {
        let service = service();
        let mut dto = named("Orders Grid");
        dto.allow_export = Some(true);
        let id = service.save(dto).await.unwrap().id.unwrap();

        let patch = GridConfigurationDto {
            page_size: Some(50),
            ..Default::default()
        };
        let patched = service.partial_update(id, patch).await.unwrap().unwrap();
        assert_eq!(patched.page_size, Some(50));
        assert_eq!(patched.allow_export, Some(true));
        assert_eq!(patched.grid_name.as_deref(), Some("Orders Grid"));

        assert!(service.partial_update(id + 1, GridConfigurationDto::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let service = service();
        let id = service.save(named("Orders Grid")).await.unwrap().id.unwrap();
        service.delete(id).await.unwrap();
        assert!(!service.exists(id).await.unwrap());
        service.delete(id).await.unwrap();
    }
}
