use crate::models::{Area, City, Country};
use crate::services::directory::{DirectoryError, LocationDirectory};
use moka::future::{Cache, CacheBuilder};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Read-through cache in front of a [`LocationDirectory`]
///
/// The canonical location tables change rarely, so every successful read is
/// kept for `ttl_secs`. Failed reads are not cached; the next call goes back
/// to the underlying directory.
pub struct CachedDirectory<D> {
    inner: D,
    countries: Cache<(), Vec<Country>>,
    cities: Cache<Option<Uuid>, Vec<City>>,
    areas: Cache<Uuid, Vec<Area>>,
}

impl<D> CachedDirectory<D> {
    /// Create a new cache around `inner`
    pub fn new(inner: D, max_capacity: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);

        Self {
            inner,
            countries: CacheBuilder::new(1).time_to_live(ttl).build(),
            cities: CacheBuilder::new(max_capacity).time_to_live(ttl).build(),
            areas: CacheBuilder::new(max_capacity).time_to_live(ttl).build(),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Drop every cached read, e.g. after the location tables were edited
    pub fn invalidate_all(&self) {
        self.countries.invalidate_all();
        self.cities.invalidate_all();
        self.areas.invalidate_all();
        tracing::debug!("Location directory cache invalidated");
    }
}

fn unshare(err: Arc<DirectoryError>) -> DirectoryError {
    Arc::unwrap_or_clone(err)
}

impl<D: LocationDirectory> LocationDirectory for CachedDirectory<D> {
    async fn active_countries(&self) -> Result<Vec<Country>, DirectoryError> {
        self.countries
            .try_get_with((), self.inner.active_countries())
            .await
            .map_err(unshare)
    }

    async fn active_cities(&self, country_id: Option<Uuid>) -> Result<Vec<City>, DirectoryError> {
        self.cities
            .try_get_with(country_id, self.inner.active_cities(country_id))
            .await
            .map_err(unshare)
    }

    async fn active_areas(&self, city_id: Uuid) -> Result<Vec<Area>, DirectoryError> {
        self.areas
            .try_get_with(city_id, self.inner.active_areas(city_id))
            .await
            .map_err(unshare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::directory::InMemoryDirectory;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts reads and fails the first `failures` of them
    struct CountingDirectory {
        inner: InMemoryDirectory,
        reads: AtomicUsize,
        failures: usize,
    }

    impl CountingDirectory {
        fn read(&self) -> Result<(), DirectoryError> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(DirectoryError::Unavailable("connection refused".to_string()));
            }
            Ok(())
        }
    }

    impl LocationDirectory for CountingDirectory {
        async fn active_countries(&self) -> Result<Vec<Country>, DirectoryError> {
            self.read()?;
            self.inner.active_countries().await
        }

        async fn active_cities(&self, country_id: Option<Uuid>) -> Result<Vec<City>, DirectoryError> {
            self.read()?;
            self.inner.active_cities(country_id).await
        }

        async fn active_areas(&self, city_id: Uuid) -> Result<Vec<Area>, DirectoryError> {
            self.read()?;
            self.inner.active_areas(city_id).await
        }
    }

    fn counting(failures: usize) -> CountingDirectory {
        let mut inner = InMemoryDirectory::new();
        let uae = inner.add_country("United Arab Emirates", "AE");
        inner.add_city("Dubai", Some(uae));
        CountingDirectory {
            inner,
            reads: AtomicUsize::new(0),
            failures,
        }
    }

    #[tokio::test]
    async fn test_successful_reads_are_cached() {
        let cache = CachedDirectory::new(counting(0), 100, 60);

        let first = cache.active_cities(None).await.unwrap();
        let second = cache.active_cities(None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.inner().reads.load(Ordering::SeqCst), 1);

        cache.invalidate_all();
        cache.active_cities(None).await.unwrap();
        assert_eq!(cache.inner().reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_reads_are_not_cached() {
        let cache = CachedDirectory::new(counting(1), 100, 60);

        let err = cache.active_countries().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unavailable(_)));

        let countries = cache.active_countries().await.unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(cache.inner().reads.load(Ordering::SeqCst), 2);
    }
}
