//! Media service implementation.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use super::error::MediaError;
use super::types::{Media, MediaPatch, MediaUpload, NewMedia};
use crate::storage::StorageService;

/// Repository trait for media persistence.
///
/// This trait is implemented by the db crate. Every call runs in its own
/// transaction.
pub trait MediaRepository: Send + Sync {
    /// List records ordered by id. Fails with `EmptyPage` when the slice is
    /// empty.
    fn list(
        &self,
        skip: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Media>, MediaError>> + Send;

    /// Find a record by id.
    fn get_by_id(&self, id: i32) -> impl Future<Output = Result<Option<Media>, MediaError>> + Send;

    /// Find a record by object URL.
    fn find_by_url(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Option<Media>, MediaError>> + Send;

    /// Insert a record. Fails with `Conflict` on a duplicate URL or
    /// description.
    fn create(&self, input: NewMedia) -> impl Future<Output = Result<Media, MediaError>> + Send;

    /// Apply a partial update. Fails with `NotFound` or `Conflict`.
    fn update(
        &self,
        id: i32,
        patch: MediaPatch,
    ) -> impl Future<Output = Result<Media, MediaError>> + Send;

    /// Delete a record. Fails with `NotFound`.
    fn delete(&self, id: i32) -> impl Future<Output = Result<bool, MediaError>> + Send;
}

/// Storage orchestrator: object upload plus metadata persistence.
pub struct MediaService<R: MediaRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: MediaRepository> MediaService<R> {
    /// Create a new media service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// List a page of media records.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPage` if no record falls in the range.
    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Media>, MediaError> {
        self.repo.list(skip, limit).await
    }

    /// Get a single media record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    pub async fn get(&self, id: i32) -> Result<Media, MediaError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(MediaError::NotFound(id))
    }

    /// Upload a file and record it.
    ///
    /// The object is written first; if the insert then fails, the object is
    /// deleted again before the insert error is returned, unless a concurrent
    /// upload of the same file name has since registered the URL.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payload is empty or has no usable file name
    /// - Another record already uses the derived URL or the description
    /// - The object store is unreachable
    /// - The database operation fails
    pub async fn create(&self, upload: MediaUpload) -> Result<Media, MediaError> {
        if upload.data.is_empty() {
            warn!(file_name = %upload.file_name, "Uploaded file is empty");
            return Err(MediaError::EmptyUpload);
        }

        let key = StorageService::object_key(&upload.file_name)?;
        let url = self.storage.object_url(&key);

        // An existing record owns this key; uploading would overwrite its object.
        if self.repo.find_by_url(&url).await?.is_some() {
            warn!(%url, "Media URL already registered");
            return Err(MediaError::conflict(format!("meme_url {url} already exists")));
        }

        let content_type = upload
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| self.storage.config().default_content_type.clone());

        self.storage.upload(&key, upload.data, &content_type).await?;

        let input = NewMedia {
            url: url.clone(),
            description: upload.description,
        };

        match self.repo.create(input).await {
            Ok(media) => {
                info!(id = media.id, url = %media.url, "Media created");
                Ok(media)
            }
            Err(err) => {
                self.remove_orphan(&key, &url).await;
                Err(err)
            }
        }
    }

    /// Update a media record's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, `Conflict` on a duplicate
    /// description.
    pub async fn update(&self, id: i32, patch: MediaPatch) -> Result<Media, MediaError> {
        let media = self.repo.update(id, patch).await?;
        info!(id, "Media updated");
        Ok(media)
    }

    /// Delete a media record. The stored object is kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    pub async fn delete(&self, id: i32) -> Result<bool, MediaError> {
        let deleted = self.repo.delete(id).await?;
        info!(id, "Media deleted");
        Ok(deleted)
    }

    /// Get the storage service.
    #[must_use]
    pub fn storage(&self) -> &StorageService {
        &self.storage
    }

    async fn remove_orphan(&self, key: &str, url: &str) {
        match self.repo.find_by_url(url).await {
            Ok(None) => {}
            Ok(Some(owner)) => {
                warn!(key, owner = owner.id, "Object now belongs to another record, keeping it");
                return;
            }
            Err(e) => {
                warn!(key, error = %e, "Could not confirm object is unowned, keeping it");
                return;
            }
        }

        match self.storage.delete(key).await {
            Ok(()) => warn!(key, "Removed object after failed insert"),
            Err(e) => warn!(key, error = %e, "Failed to remove orphaned object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use tokio::sync::Barrier;

    use super::*;
    use crate::storage::{StorageConfig, StorageError, StorageProvider};

    /// In-memory repository enforcing the same uniqueness rules as the table.
    #[derive(Default)]
    struct FakeRepository {
        rows: Mutex<Vec<Media>>,
        next_id: Mutex<i32>,
        fail_inserts: bool,
        /// Holds the first two URL lookups until both callers have reached them.
        lookup_barrier: Option<Barrier>,
        lookups: AtomicUsize,
    }

    impl FakeRepository {
        fn failing() -> Self {
            Self {
                fail_inserts: true,
                ..Self::default()
            }
        }

        fn racing() -> Self {
            Self {
                lookup_barrier: Some(Barrier::new(2)),
                ..Self::default()
            }
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl MediaRepository for FakeRepository {
        async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Media>, MediaError> {
            let rows = self.rows.lock().unwrap();
            let page: Vec<Media> = rows
                .iter()
                .skip(usize::try_from(skip).unwrap())
                .take(usize::try_from(limit).unwrap())
                .cloned()
                .collect();
            if page.is_empty() {
                return Err(MediaError::EmptyPage);
            }
            Ok(page)
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<Media>, MediaError> {
            Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
        }

        async fn find_by_url(&self, url: &str) -> Result<Option<Media>, MediaError> {
            if let Some(barrier) = &self.lookup_barrier
                && self.lookups.fetch_add(1, Ordering::SeqCst) < 2
            {
                barrier.wait().await;
            }
            Ok(self.rows.lock().unwrap().iter().find(|m| m.url == url).cloned())
        }

        async fn create(&self, input: NewMedia) -> Result<Media, MediaError> {
            if self.fail_inserts {
                return Err(MediaError::repository("connection reset"));
            }
            let mut rows = self.rows.lock().unwrap();
            if rows
                .iter()
                .any(|m| m.url == input.url || m.description == input.description)
            {
                return Err(MediaError::conflict("duplicate"));
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let media = Media {
                id: *next_id,
                url: input.url,
                description: input.description,
            };
            rows.push(media.clone());
            Ok(media)
        }

        async fn update(&self, id: i32, patch: MediaPatch) -> Result<Media, MediaError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(description) = &patch.description
                && rows.iter().any(|m| m.id != id && &m.description == description)
            {
                return Err(MediaError::conflict("duplicate"));
            }
            let media = rows
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(MediaError::NotFound(id))?;
            if let Some(description) = patch.description {
                media.description = description;
            }
            Ok(media.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, MediaError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.id != id);
            if rows.len() == before {
                return Err(MediaError::NotFound(id));
            }
            Ok(true)
        }
    }

    fn service_with(repo: FakeRepository) -> (MediaService<FakeRepository>, Arc<FakeRepository>) {
        let config = StorageConfig::new(
            StorageProvider::Memory,
            "media-storage",
            "http://minio:9000",
        );
        let storage = Arc::new(StorageService::from_config(config).unwrap());
        let repo = Arc::new(repo);
        (MediaService::new(storage, repo.clone()), repo)
    }

    fn upload(file_name: &str, description: &str) -> MediaUpload {
        MediaUpload {
            file_name: file_name.to_string(),
            content_type: Some("images/jpeg".to_string()),
            data: Bytes::from_static(b"test file content"),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_uploads_and_persists() {
        let (service, repo) = service_with(FakeRepository::default());

        let media = service
            .create(upload("testfile.txt", "Test Media Description"))
            .await
            .unwrap();

        assert_eq!(media.url, "http://minio:9000/media-storage/testfile.txt");
        assert_eq!(media.description, "Test Media Description");
        assert!(service.storage().exists("testfile.txt").await);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_file() {
        let (service, repo) = service_with(FakeRepository::default());
        let mut empty = upload("testfile.txt", "Test Media Description");
        empty.data = Bytes::new();

        let err = service.create(empty).await.unwrap_err();

        assert!(matches!(err, MediaError::EmptyUpload));
        assert!(!service.storage().exists("testfile.txt").await);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_file_name() {
        let (service, _) = service_with(FakeRepository::default());

        let err = service.create(upload("", "desc")).await.unwrap_err();

        assert!(matches!(err, MediaError::Storage(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_duplicate_file_name_conflicts_before_upload() {
        let (service, repo) = service_with(FakeRepository::default());
        service
            .create(upload("testfile.txt", "Test Media Description"))
            .await
            .unwrap();

        let err = service
            .create(upload("testfile.txt", "Test Media Description 2"))
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Conflict(_)));
        // The first record's object must survive.
        assert!(service.storage().exists("testfile.txt").await);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_description_removes_uploaded_object() {
        let (service, repo) = service_with(FakeRepository::default());
        service
            .create(upload("testfile.txt", "Test Media Description"))
            .await
            .unwrap();

        let err = service
            .create(upload("testfile_02.txt", "Test Media Description"))
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Conflict(_)));
        assert!(!service.storage().exists("testfile_02.txt").await);
        assert!(service.storage().exists("testfile.txt").await);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_insert_is_compensated() {
        let (service, _) = service_with(FakeRepository::failing());

        let err = service
            .create(upload("orphan.png", "never stored"))
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::Repository(_)));
        assert!(!service.storage().exists("orphan.png").await);
    }

    #[tokio::test]
    async fn test_concurrent_same_name_keeps_winning_object() {
        let (service, repo) = service_with(FakeRepository::racing());

        let (first, second) = tokio::join!(
            service.create(upload("same.png", "one")),
            service.create(upload("same.png", "two")),
        );

        let winners = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(matches!(
            first.as_ref().err().or(second.as_ref().err()),
            Some(MediaError::Conflict(_))
        ));
        assert_eq!(repo.len(), 1);
        // The committed record still points at a live object.
        assert!(service.storage().exists("same.png").await);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (service, _) = service_with(FakeRepository::default());

        let err = service.get(999).await.unwrap_err();

        assert!(matches!(err, MediaError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_update_and_delete_delegate() {
        let (service, _) = service_with(FakeRepository::default());
        let created = service
            .create(upload("testfile.txt", "Test Media Description"))
            .await
            .unwrap();

        let patch = MediaPatch {
            description: Some("X".to_string()),
        };
        let updated = service.update(created.id, patch).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.url, created.url);
        assert_eq!(updated.description, "X");

        assert!(service.delete(created.id).await.unwrap());
        assert!(matches!(
            service.get(created.id).await.unwrap_err(),
            MediaError::NotFound(_)
        ));
        // Deleting a record keeps its object.
        assert!(service.storage().exists("testfile.txt").await);
    }
}
