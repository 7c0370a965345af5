//! PostgreSQL-backed yard repository using Diesel.
//!
//! Yard rows do not store occupants; the occupant ids are joined in from
//! `motorcycles.yard_id` on every read so the capacity invariant can be
//! checked against live occupancy.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageResult, clamp_page, total_pages};
use uuid::Uuid;

use crate::domain::ports::{Repository, RepositoryError, YardPage, YardRepository, YardSortField};
use crate::domain::{Address, Yard};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{YardRow, YardWriteRow};
use super::pool::DbPool;
use super::schema::{motorcycles, yards};

/// Diesel implementation of the yard ports.
#[derive(Clone)]
pub struct DieselYardRepository {
    pool: DbPool,
}

impl DieselYardRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_yard(row: YardRow, occupants: Vec<Uuid>) -> Yard {
    Yard::from_parts(
        row.id,
        row.name,
        Address::decode(&row.address),
        row.capacity,
        occupants,
    )
}

fn write_row(entity: &Yard) -> YardWriteRow<'_> {
    YardWriteRow {
        id: entity.id(),
        name: entity.name(),
        address: entity.address().encode(),
        capacity: entity.capacity(),
    }
}

/// Occupant ids for the given yards, keyed by yard id.
async fn occupants_by_yard<C>(
    conn: &mut C,
    yard_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Uuid>>, RepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = Pg> + Send,
{
    let assignments: Vec<(Option<Uuid>, Uuid)> = motorcycles::table
        .filter(motorcycles::yard_id.eq_any(yard_ids.iter().copied().map(Some)))
        .select((motorcycles::yard_id, motorcycles::id))
        .order(motorcycles::id.asc())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut by_yard: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (yard_id, motorcycle_id) in assignments {
        if let Some(yard_id) = yard_id {
            by_yard.entry(yard_id).or_default().push(motorcycle_id);
        }
    }
    Ok(by_yard)
}

/// Base query with the free-text filter applied.
///
/// The flattened address column carries street, city, and postal code, so a
/// single pattern match covers all three.
fn filtered(search: Option<&str>) -> yards::BoxedQuery<'static, Pg> {
    let mut query = yards::table.into_boxed();
    if let Some(needle) = search {
        let pattern = format!("%{}%", needle.trim());
        query = query.filter(
            yards::name
                .ilike(pattern.clone())
                .or(yards::address.ilike(pattern)),
        );
    }
    query
}

/// Apply the active sort field and direction.
fn ordered(
    query: yards::BoxedQuery<'static, Pg>,
    sort_by: YardSortField,
    ascending: bool,
) -> yards::BoxedQuery<'static, Pg> {
    use YardSortField as Field;
    match (sort_by, ascending) {
        (Field::Name, true) => query.order(yards::name.asc()),
        (Field::Name, false) => query.order(yards::name.desc()),
        (Field::Capacity, true) => query.order(yards::capacity.asc()),
        (Field::Capacity, false) => query.order(yards::capacity.desc()),
        (Field::Id, true) => query.order(yards::id.asc()),
        (Field::Id, false) => query.order(yards::id.desc()),
    }
}

#[async_trait]
impl Repository<Yard> for DieselYardRepository {
    async fn list(&self) -> Result<Vec<Yard>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<YardRow> = yards::table
            .order(yards::id.asc())
            .select(YardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut occupants = occupants_by_yard(&mut conn, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let ids = occupants.remove(&row.id).unwrap_or_default();
                row_to_yard(row, ids)
            })
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Yard>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<YardRow> = yards::table
            .find(id)
            .select(YardRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else { return Ok(None) };
        let mut occupants = occupants_by_yard(&mut conn, &[row.id]).await?;
        let ids = occupants.remove(&row.id).unwrap_or_default();
        Ok(Some(row_to_yard(row, ids)))
    }

    async fn add(&self, entity: &Yard) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(yards::table)
            .values(write_row(entity))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, entity: &Yard) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(yards::table.find(entity.id()))
            .set(write_row(entity))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::query("no stored yard to update"));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(yards::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl YardRepository for DieselYardRepository {
    async fn page(&self, query: YardPage) -> Result<PageResult<Yard>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Count and slice run as two statements; totals can drift between
        // them under concurrent writes.
        let total: i64 = filtered(query.search.as_deref())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let pages = total_pages(total, query.request.page_size());
        let effective = query
            .request
            .at_page(clamp_page(query.request.page(), pages));

        let rows: Vec<YardRow> = ordered(
            filtered(query.search.as_deref()),
            query.sort_by,
            query.direction.is_ascending(),
        )
        .then_order_by(yards::id.asc())
        .select(YardRow::as_select())
        .offset(effective.offset())
        .limit(effective.page_size())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut occupants = occupants_by_yard(&mut conn, &ids).await?;
        let items = rows
            .into_iter()
            .map(|row| {
                let ids = occupants.remove(&row.id).unwrap_or_default();
                row_to_yard(row, ids)
            })
            .collect();
        Ok(PageResult::new(items, total, effective))
    }
}
