//! Media repository for database operations.
//!
//! Implements the core `MediaRepository` contract on top of the generic CRUD
//! repository over the `memes` table.

use sea_orm::{ColumnTrait, DatabaseConnection, NotSet, Set};
use tracing::warn;

use super::crud::{CrudError, CrudRepository};
use crate::entities::memes;
use memeshare_core::media::{
    Media, MediaError, MediaPatch, MediaRepository as MediaRepoTrait, NewMedia,
};

/// Media repository implementation.
#[derive(Debug, Clone)]
pub struct MediaRepository {
    crud: CrudRepository<memes::Entity>,
}

impl MediaRepository {
    /// Create a new media repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            crud: CrudRepository::new(db),
        }
    }
}

impl MediaRepoTrait for MediaRepository {
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Media>, MediaError> {
        let rows = self.crud.list(skip, limit).await.map_err(map_err)?;
        Ok(rows.into_iter().map(Media::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Media>, MediaError> {
        let model = self.crud.get_by_id(id).await.map_err(map_err)?;
        Ok(model.map(Media::from))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Media>, MediaError> {
        let model = self
            .crud
            .find_one(memes::Column::MemeUrl.eq(url))
            .await
            .map_err(map_err)?;
        Ok(model.map(Media::from))
    }

    async fn create(&self, input: NewMedia) -> Result<Media, MediaError> {
        let model = memes::ActiveModel {
            id: NotSet,
            meme_url: Set(input.url),
            meme_description: Set(input.description),
        };

        let created = self.crud.create(model).await.map_err(map_err)?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, patch: MediaPatch) -> Result<Media, MediaError> {
        let model = memes::ActiveModel {
            id: NotSet,
            meme_url: NotSet,
            meme_description: patch.description.map_or(NotSet, Set),
        };

        let updated = self.crud.update(id, model).await.map_err(|e| match e {
            CrudError::NotFound(_) => MediaError::NotFound(id),
            other => map_err(other),
        })?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<bool, MediaError> {
        self.crud.delete(id).await.map_err(|e| match e {
            CrudError::NotFound(_) => MediaError::NotFound(id),
            other => map_err(other),
        })
    }
}

fn map_err(err: CrudError) -> MediaError {
    match err {
        CrudError::EmptyPage => MediaError::EmptyPage,
        CrudError::Conflict(msg) => {
            warn!(error = %msg, "Unique constraint violated");
            MediaError::conflict(msg)
        }
        CrudError::NotFound(msg) => MediaError::repository(format!("record not found: {msg}")),
        CrudError::Database(e) => MediaError::repository(e.to_string()),
    }
}
