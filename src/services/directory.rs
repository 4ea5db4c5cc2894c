use crate::core::listing::slugify;
use crate::models::{Area, City, Country};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while reading the canonical location tables
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Database(Arc<sqlx::Error>),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(value: sqlx::Error) -> Self {
        DirectoryError::Database(Arc::new(value))
    }
}

/// Read-only access to the canonical countries, cities and areas
///
/// Implementations return active rows only, ordered by name, so repeated
/// lookups against an unchanged directory yield identical results.
#[allow(async_fn_in_trait)]
pub trait LocationDirectory {
    async fn active_countries(&self) -> Result<Vec<Country>, DirectoryError>;

    /// Active cities, restricted to one country when `country_id` is given
    async fn active_cities(&self, country_id: Option<Uuid>) -> Result<Vec<City>, DirectoryError>;

    async fn active_areas(&self, city_id: Uuid) -> Result<Vec<Area>, DirectoryError>;
}

impl<D: LocationDirectory> LocationDirectory for Arc<D> {
    async fn active_countries(&self) -> Result<Vec<Country>, DirectoryError> {
        self.as_ref().active_countries().await
    }

    async fn active_cities(&self, country_id: Option<Uuid>) -> Result<Vec<City>, DirectoryError> {
        self.as_ref().active_cities(country_id).await
    }

    async fn active_areas(&self, city_id: Uuid) -> Result<Vec<Area>, DirectoryError> {
        self.as_ref().active_areas(city_id).await
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    row: T,
    is_active: bool,
}

/// Directory held in memory, seeded by hand
///
/// Used by tests and benchmarks, and handy for running the matcher against
/// a fixed snapshot of the location tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    countries: Vec<Entry<Country>>,
    cities: Vec<Entry<City>>,
    areas: Vec<Entry<Area>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_country(&mut self, name: &str, code: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.countries.push(Entry {
            row: Country {
                id,
                name: name.to_string(),
                code: code.to_string(),
            },
            is_active: true,
        });
        id
    }

    pub fn add_city(&mut self, name: &str, country_id: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        self.cities.push(Entry {
            row: City {
                id,
                name: name.to_string(),
                slug: slugify(name),
                country_id,
            },
            is_active: true,
        });
        id
    }

    pub fn add_area(&mut self, name: &str, city_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.areas.push(Entry {
            row: Area {
                id,
                name: name.to_string(),
                slug: slugify(name),
                city_id,
            },
            is_active: true,
        });
        id
    }

    /// Mark any row with this id as inactive. Returns false if no row has it.
    pub fn deactivate(&mut self, id: Uuid) -> bool {
        let mut found = false;
        for entry in self.countries.iter_mut().filter(|e| e.row.id == id) {
            entry.is_active = false;
            found = true;
        }
        for entry in self.cities.iter_mut().filter(|e| e.row.id == id) {
            entry.is_active = false;
            found = true;
        }
        for entry in self.areas.iter_mut().filter(|e| e.row.id == id) {
            entry.is_active = false;
            found = true;
        }
        found
    }
}

fn active_sorted<T: Clone>(
    entries: &[Entry<T>],
    keep: impl Fn(&T) -> bool,
    name: impl Fn(&T) -> &str,
) -> Vec<T> {
    let mut rows: Vec<T> = entries
        .iter()
        .filter(|e| e.is_active && keep(&e.row))
        .map(|e| e.row.clone())
        .collect();
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}

impl LocationDirectory for InMemoryDirectory {
    async fn active_countries(&self) -> Result<Vec<Country>, DirectoryError> {
        Ok(active_sorted(&self.countries, |_| true, |c| c.name.as_str()))
    }

    async fn active_cities(&self, country_id: Option<Uuid>) -> Result<Vec<City>, DirectoryError> {
        Ok(active_sorted(
            &self.cities,
            |c| country_id.is_none() || c.country_id == country_id,
            |c| c.name.as_str(),
        ))
    }

    async fn active_areas(&self, city_id: Uuid) -> Result<Vec<Area>, DirectoryError> {
        Ok(active_sorted(&self.areas, |a| a.city_id == city_id, |a| a.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inactive_rows_are_hidden() {
        let mut directory = InMemoryDirectory::new();
        let uae = directory.add_country("United Arab Emirates", "AE");
        let dubai = directory.add_city("Dubai", Some(uae));
        let sharjah = directory.add_city("Sharjah", Some(uae));
        directory.add_area("Deira", dubai);

        assert!(directory.deactivate(sharjah));
        assert!(!directory.deactivate(Uuid::new_v4()));

        let cities = directory.active_cities(Some(uae)).await.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Dubai");
        assert_eq!(cities[0].slug, "dubai");
    }

    #[tokio::test]
    async fn test_cities_scoped_and_sorted() {
        let mut directory = InMemoryDirectory::new();
        let uae = directory.add_country("United Arab Emirates", "AE");
        let oman = directory.add_country("Oman", "OM");
        directory.add_city("Sharjah", Some(uae));
        directory.add_city("Ajman", Some(uae));
        directory.add_city("Muscat", Some(oman));

        let scoped: Vec<String> = directory
            .active_cities(Some(uae))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(scoped, vec!["Ajman", "Sharjah"]);

        let all = directory.active_cities(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let countries = directory.active_countries().await.unwrap();
        assert_eq!(countries[0].name, "Oman");
    }
}
