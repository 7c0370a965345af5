//! In-memory adapters for the repository ports.
//!
//! Backs the server when no database is configured and the integration
//! tests. Query semantics (search, sort, clamp, id tiebreak) mirror the
//! Diesel adapters so either wiring satisfies the same contracts.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageResult, clamp_page, total_pages};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{
    MotorcyclePage, MotorcycleRepository, MotorcycleSortField, Repository, RepositoryError,
    UserPage, UserRepository, UserSortField, YardPage, YardRepository, YardSortField,
};
use crate::domain::{Address, Motorcycle, MotorcycleStatus, User, Yard};

/// Yard row as stored; occupant ids are derived from the motorcycles.
#[derive(Debug, Clone)]
struct YardRecord {
    id: Uuid,
    name: String,
    address: Address,
    capacity: i32,
}

#[derive(Debug, Default)]
struct StoreInner {
    motorcycles: HashMap<Uuid, Motorcycle>,
    yards: HashMap<Uuid, YardRecord>,
    users: HashMap<Uuid, User>,
}

/// Shared in-memory store; cheap to clone, synchronised internally.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Motorcycle repository view over this store.
    pub fn motorcycles(&self) -> InMemoryMotorcycleRepository {
        InMemoryMotorcycleRepository {
            store: self.clone(),
        }
    }

    /// Yard repository view over this store.
    pub fn yards(&self) -> InMemoryYardRepository {
        InMemoryYardRepository {
            store: self.clone(),
        }
    }

    /// User repository view over this store.
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }
}

fn slice<T>(items: Vec<T>, total: i64, request: pagination::PageRequest) -> PageResult<T> {
    let pages = total_pages(total, request.page_size());
    let effective = request.at_page(clamp_page(request.page(), pages));
    let offset = usize::try_from(effective.offset()).unwrap_or(0);
    let size = usize::try_from(effective.page_size()).unwrap_or(0);
    let items = items.into_iter().skip(offset).take(size).collect();
    PageResult::new(items, total, effective)
}

fn matches(haystacks: &[&str], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

fn status_rank(status: MotorcycleStatus) -> u8 {
    match status {
        MotorcycleStatus::Available => 0,
        MotorcycleStatus::InUse => 1,
        MotorcycleStatus::InMaintenance => 2,
    }
}

fn directed(ord: Ordering, ascending: bool) -> Ordering {
    if ascending { ord } else { ord.reverse() }
}

// ---------------------------------------------------------------------------
// Motorcycles
// ---------------------------------------------------------------------------

/// In-memory implementation of the motorcycle ports.
#[derive(Debug, Clone)]
pub struct InMemoryMotorcycleRepository {
    store: InMemoryStore,
}

#[async_trait]
impl Repository<Motorcycle> for InMemoryMotorcycleRepository {
    async fn list(&self) -> Result<Vec<Motorcycle>, RepositoryError> {
        let inner = self.store.inner.read().await;
        let mut rows: Vec<_> = inner.motorcycles.values().cloned().collect();
        rows.sort_by_key(Motorcycle::id);
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Motorcycle>, RepositoryError> {
        let inner = self.store.inner.read().await;
        Ok(inner.motorcycles.get(&id).cloned())
    }

    async fn add(&self, entity: &Motorcycle) -> Result<(), RepositoryError> {
        let mut inner = self.store.inner.write().await;
        inner.motorcycles.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &Motorcycle) -> Result<(), RepositoryError> {
        let mut inner = self.store.inner.write().await;
        if !inner.motorcycles.contains_key(&entity.id()) {
            return Err(RepositoryError::query("no stored motorcycle to update"));
        }
        inner.motorcycles.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut inner = self.store.inner.write().await;
        Ok(inner.motorcycles.remove(&id).is_some())
    }
}

#[async_trait]
impl MotorcycleRepository for InMemoryMotorcycleRepository {
    async fn page(&self, query: MotorcyclePage) -> Result<PageResult<Motorcycle>, RepositoryError> {
        let inner = self.store.inner.read().await;
        let mut rows: Vec<_> = inner
            .motorcycles
            .values()
            .filter(|m| {
                query.search.as_deref().is_none_or(|needle| {
                    matches(&[m.plate().as_str(), m.model(), m.brand()], needle)
                })
            })
            .cloned()
            .collect();

        let ascending = query.direction.is_ascending();
        rows.sort_by(|a, b| {
            let ord = match query.sort_by {
                MotorcycleSortField::Plate => a.plate().cmp(b.plate()),
                MotorcycleSortField::Model => {
                    a.model().to_lowercase().cmp(&b.model().to_lowercase())
                }
                MotorcycleSortField::Brand => {
                    a.brand().to_lowercase().cmp(&b.brand().to_lowercase())
                }
                MotorcycleSortField::Year => a.year().cmp(&b.year()),
                MotorcycleSortField::Status => {
                    status_rank(a.status()).cmp(&status_rank(b.status()))
                }
                MotorcycleSortField::RegisteredAt => a.registered_at().cmp(&b.registered_at()),
            };
            directed(ord, ascending).then_with(|| a.id().cmp(&b.id()))
        });

        let total = i64::try_from(rows.len()).unwrap_or(i64::MAX);
        Ok(slice(rows, total, query.request))
    }
}

// ---------------------------------------------------------------------------
// Yards
// ---------------------------------------------------------------------------

/// In-memory implementation of the yard ports.
#[derive(Debug, Clone)]
pub struct InMemoryYardRepository {
    store: InMemoryStore,
}

impl InMemoryYardRepository {
    fn rehydrate(record: &YardRecord, inner: &StoreInner) -> Yard {
        let mut occupants: Vec<Uuid> = inner
            .motorcycles
            .values()
            .filter(|m| m.yard_id() == Some(record.id))
            .map(Motorcycle::id)
            .collect();
        occupants.sort_unstable();
        Yard::from_parts(
            record.id,
            record.name.clone(),
            record.address.clone(),
            record.capacity,
            occupants,
        )
    }
}

#[async_trait]
impl Repository<Yard> for InMemoryYardRepository {
    async fn list(&self) -> Result<Vec<Yard>, RepositoryError> {
        let inner = self.store.inner.read().await;
        let mut records: Vec<_> = inner.yards.values().collect();
        records.sort_by_key(|r| r.id);
        Ok(records
            .into_iter()
            .map(|r| Self::rehydrate(r, &inner))
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Yard>, RepositoryError> {
        let inner = self.store.inner.read().await;
        Ok(inner.yards.get(&id).map(|r| Self::rehydrate(r, &inner)))
    }

    async fn add(&self, entity: &Yard) -> Result<(), RepositoryError> {
        let mut inner = self.store.inner.write().await;
        inner.yards.insert(
            entity.id(),
            YardRecord {
                id: entity.id(),
                name: entity.name().to_owned(),
                address: entity.address().clone(),
                capacity: entity.capacity(),
            },
        );
        Ok(())
    }

    async fn update(&self, entity: &Yard) -> Result<(), RepositoryError> {
        let mut inner = self.store.inner.write().await;
        if !inner.yards.contains_key(&entity.id()) {
            return Err(RepositoryError::query("no stored yard to update"));
        }
        inner.yards.insert(
            entity.id(),
            YardRecord {
                id: entity.id(),
                name: entity.name().to_owned(),
                address: entity.address().clone(),
                capacity: entity.capacity(),
            },
        );
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut inner = self.store.inner.write().await;
        Ok(inner.yards.remove(&id).is_some())
    }
}

#[async_trait]
impl YardRepository for InMemoryYardRepository {
    async fn page(&self, query: YardPage) -> Result<PageResult<Yard>, RepositoryError> {
        let inner = self.store.inner.read().await;
        let mut rows: Vec<_> = inner
            .yards
            .values()
            .filter(|r| {
                query.search.as_deref().is_none_or(|needle| {
                    matches(
                        &[
                            &r.name,
                            r.address.street(),
                            r.address.city(),
                            r.address.postal_code(),
                        ],
                        needle,
                    )
                })
            })
            .map(|r| Self::rehydrate(r, &inner))
            .collect();

        let ascending = query.direction.is_ascending();
        rows.sort_by(|a, b| {
            let ord = match query.sort_by {
                YardSortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
                YardSortField::Capacity => a.capacity().cmp(&b.capacity()),
                YardSortField::Id => a.id().cmp(&b.id()),
            };
            directed(ord, ascending).then_with(|| a.id().cmp(&b.id()))
        });

        let total = i64::try_from(rows.len()).unwrap_or(i64::MAX);
        Ok(slice(rows, total, query.request))
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// In-memory implementation of the user ports.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl Repository<User> for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let inner = self.store.inner.read().await;
        let mut rows: Vec<_> = inner.users.values().cloned().collect();
        rows.sort_by_key(User::id);
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let inner = self.store.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn add(&self, entity: &User) -> Result<(), RepositoryError> {
        let mut inner = self.store.inner.write().await;
        inner.users.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &User) -> Result<(), RepositoryError> {
        let mut inner = self.store.inner.write().await;
        if !inner.users.contains_key(&entity.id()) {
            return Err(RepositoryError::query("no stored user to update"));
        }
        inner.users.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut inner = self.store.inner.write().await;
        Ok(inner.users.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn page(&self, query: UserPage) -> Result<PageResult<User>, RepositoryError> {
        let inner = self.store.inner.read().await;
        let mut rows: Vec<_> = inner
            .users
            .values()
            .filter(|u| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|needle| matches(&[u.name(), u.email()], needle))
            })
            .cloned()
            .collect();

        let ascending = query.direction.is_ascending();
        rows.sort_by(|a, b| {
            let ord = match query.sort_by {
                UserSortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
                UserSortField::Email => a.email().to_lowercase().cmp(&b.email().to_lowercase()),
                UserSortField::RegisteredAt => a.registered_at().cmp(&b.registered_at()),
            };
            directed(ord, ascending).then_with(|| a.id().cmp(&b.id()))
        });

        let total = i64::try_from(rows.len()).unwrap_or(i64::MAX);
        Ok(slice(rows, total, query.request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MotorcycleDraft;
    use pagination::{PageRequest, SortDir};

    fn draft(plate: &str, year: i32) -> MotorcycleDraft {
        MotorcycleDraft {
            plate: plate.to_owned(),
            model: "CG 160".to_owned(),
            brand: "Honda".to_owned(),
            rfid_tag: format!("RF-{plate}"),
            year,
            problem: None,
            location: None,
        }
    }

    async fn seeded(count: i32) -> InMemoryStore {
        let store = InMemoryStore::new();
        let repo = store.motorcycles();
        for i in 0..count {
            let moto = Motorcycle::register(draft(&format!("ABC{:04}", 1000 + i), 2000 + i))
                .expect("valid draft");
            repo.add(&moto).await.expect("insert succeeds");
        }
        store
    }

    #[tokio::test]
    async fn page_two_of_fifteen_has_five_items() {
        let store = seeded(15).await;
        let page = store
            .motorcycles()
            .page(MotorcyclePage {
                request: PageRequest::normalised(2, 10),
                ..MotorcyclePage::default()
            })
            .await
            .expect("query succeeds");

        assert_eq!(page.items().len(), 5);
        assert_eq!(page.total(), 15);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn out_of_range_page_is_clamped_to_the_last() {
        let store = seeded(15).await;
        let page = store
            .motorcycles()
            .page(MotorcyclePage {
                request: PageRequest::normalised(9, 10),
                ..MotorcyclePage::default()
            })
            .await
            .expect("query succeeds");

        assert_eq!(page.page(), 2);
        assert_eq!(page.items().len(), 5);
    }

    #[tokio::test]
    async fn search_filters_across_plate_model_and_brand() {
        let store = seeded(3).await;
        let repo = store.motorcycles();
        let mut odd = Motorcycle::register(draft("XYZ9A87", 2020)).expect("valid draft");
        odd.update(MotorcycleDraft {
            brand: "Yamaha".to_owned(),
            ..draft("XYZ9A87", 2020)
        })
        .expect("valid update");
        repo.add(&odd).await.expect("insert succeeds");

        let page = repo
            .page(MotorcyclePage {
                search: Some("yamaha".to_owned()),
                ..MotorcyclePage::default()
            })
            .await
            .expect("query succeeds");

        assert_eq!(page.total(), 1);
        assert_eq!(page.items()[0].id(), odd.id());
    }

    #[tokio::test]
    async fn year_sort_ascends_with_id_tiebreak() {
        let store = seeded(5).await;
        let page = store
            .motorcycles()
            .page(MotorcyclePage {
                sort_by: MotorcycleSortField::Year,
                direction: SortDir::Asc,
                ..MotorcyclePage::default()
            })
            .await
            .expect("query succeeds");

        let years: Vec<_> = page.items().iter().map(Motorcycle::year).collect();
        assert_eq!(years, vec![2000, 2001, 2002, 2003, 2004]);
    }

    #[tokio::test]
    async fn yard_occupants_are_derived_from_motorcycles() {
        let store = InMemoryStore::new();
        let yards = store.yards();
        let motos = store.motorcycles();

        let address = Address::new(
            "Rua Azul 10".to_owned(),
            "Sao Paulo".to_owned(),
            "01310-100".to_owned(),
        )
        .expect("valid address");
        let mut yard = Yard::new("Centro".to_owned(), address, 5).expect("valid yard");
        yards.add(&yard).await.expect("insert succeeds");

        let mut moto = Motorcycle::register(draft("ABC1234", 2022)).expect("valid draft");
        yard.check_in(&mut moto).expect("slot available");
        motos.add(&moto).await.expect("insert succeeds");

        let loaded = yards
            .find(yard.id())
            .await
            .expect("query succeeds")
            .expect("yard present");
        assert_eq!(loaded.occupancy(), 1);
        assert_eq!(loaded.motorcycle_ids(), &[moto.id()]);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_a_query_error() {
        let store = InMemoryStore::new();
        let moto = Motorcycle::register(draft("ABC1234", 2022)).expect("valid draft");
        let result = store.motorcycles().update(&moto).await;
        assert!(matches!(result, Err(RepositoryError::Query { .. })));
    }
}
