//! PostgreSQL-backed motorcycle repository using Diesel.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageResult, clamp_page, total_pages};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    MotorcyclePage, MotorcycleRepository, MotorcycleSortField, Repository, RepositoryError,
};
use crate::domain::{Motorcycle, MotorcycleStatus, Plate};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MotorcycleRow, MotorcycleWriteRow};
use super::pool::DbPool;
use super::schema::motorcycles;

/// Diesel implementation of the motorcycle ports.
#[derive(Clone)]
pub struct DieselMotorcycleRepository {
    pool: DbPool,
}

impl DieselMotorcycleRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_motorcycle(row: MotorcycleRow) -> Result<Motorcycle, RepositoryError> {
    let plate = Plate::new(&row.plate)
        .map_err(|err| RepositoryError::corrupt(format!("motorcycle {}: {err}", row.id)))?;
    let status = MotorcycleStatus::parse(&row.status).unwrap_or_else(|| {
        warn!(
            value = %row.status,
            motorcycle_id = %row.id,
            "unrecognised stored status, defaulting to available"
        );
        MotorcycleStatus::Available
    });
    Ok(Motorcycle::from_parts(
        row.id,
        plate,
        row.model,
        row.brand,
        row.rfid_tag,
        row.year,
        row.registered_at,
        row.problem,
        row.location,
        status,
        row.yard_id,
    ))
}

fn write_row(entity: &Motorcycle) -> MotorcycleWriteRow<'_> {
    MotorcycleWriteRow {
        id: entity.id(),
        plate: entity.plate().as_str(),
        model: entity.model(),
        brand: entity.brand(),
        rfid_tag: entity.rfid_tag(),
        year: entity.year(),
        registered_at: entity.registered_at(),
        problem: entity.problem(),
        location: entity.location(),
        status: entity.status().as_str(),
        yard_id: entity.yard_id(),
    }
}

/// Base query with the free-text filter applied.
fn filtered(search: Option<&str>) -> motorcycles::BoxedQuery<'static, Pg> {
    let mut query = motorcycles::table.into_boxed();
    if let Some(needle) = search {
        let pattern = format!("%{}%", needle.trim());
        query = query.filter(
            motorcycles::plate
                .ilike(pattern.clone())
                .or(motorcycles::model.ilike(pattern.clone()))
                .or(motorcycles::brand.ilike(pattern)),
        );
    }
    query
}

/// Apply the active sort field and direction.
fn ordered(
    query: motorcycles::BoxedQuery<'static, Pg>,
    sort_by: MotorcycleSortField,
    ascending: bool,
) -> motorcycles::BoxedQuery<'static, Pg> {
    use MotorcycleSortField as Field;
    match (sort_by, ascending) {
        (Field::Plate, true) => query.order(motorcycles::plate.asc()),
        (Field::Plate, false) => query.order(motorcycles::plate.desc()),
        (Field::Model, true) => query.order(motorcycles::model.asc()),
        (Field::Model, false) => query.order(motorcycles::model.desc()),
        (Field::Brand, true) => query.order(motorcycles::brand.asc()),
        (Field::Brand, false) => query.order(motorcycles::brand.desc()),
        (Field::Year, true) => query.order(motorcycles::year.asc()),
        (Field::Year, false) => query.order(motorcycles::year.desc()),
        (Field::Status, true) => query.order(motorcycles::status.asc()),
        (Field::Status, false) => query.order(motorcycles::status.desc()),
        (Field::RegisteredAt, true) => query.order(motorcycles::registered_at.asc()),
        (Field::RegisteredAt, false) => query.order(motorcycles::registered_at.desc()),
    }
}

#[async_trait]
impl Repository<Motorcycle> for DieselMotorcycleRepository {
    async fn list(&self) -> Result<Vec<Motorcycle>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MotorcycleRow> = motorcycles::table
            .order(motorcycles::id.asc())
            .select(MotorcycleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_motorcycle).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Motorcycle>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MotorcycleRow> = motorcycles::table
            .find(id)
            .select(MotorcycleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_motorcycle).transpose()
    }

    async fn add(&self, entity: &Motorcycle) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(motorcycles::table)
            .values(write_row(entity))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, entity: &Motorcycle) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(motorcycles::table.find(entity.id()))
            .set(write_row(entity))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::query("no stored motorcycle to update"));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(motorcycles::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl MotorcycleRepository for DieselMotorcycleRepository {
    async fn page(&self, query: MotorcyclePage) -> Result<PageResult<Motorcycle>, RepositoryError> {
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

        let rows: Vec<MotorcycleRow> = ordered(
            filtered(query.search.as_deref()),
            query.sort_by,
            query.direction.is_ascending(),
        )
        .then_order_by(motorcycles::id.asc())
        .select(MotorcycleRow::as_select())
        .offset(effective.offset())
        .limit(effective.page_size())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_motorcycle)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PageResult::new(items, total, effective))
    }
}
