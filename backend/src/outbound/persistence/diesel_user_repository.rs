//! PostgreSQL-backed user repository using Diesel.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageResult, clamp_page, total_pages};
use uuid::Uuid;

use crate::domain::User;
use crate::domain::ports::{Repository, RepositoryError, UserPage, UserRepository, UserSortField};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserRow, UserWriteRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of the user ports.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> User {
    User::from_parts(
        row.id,
        row.name,
        row.email,
        row.password_hash,
        row.registered_at,
    )
}

fn write_row(entity: &User) -> UserWriteRow<'_> {
    UserWriteRow {
        id: entity.id(),
        name: entity.name(),
        email: entity.email(),
        password_hash: entity.password_hash(),
        registered_at: entity.registered_at(),
    }
}

fn filtered(search: Option<&str>) -> users::BoxedQuery<'static, Pg> {
    let mut query = users::table.into_boxed();
    if let Some(needle) = search {
        let pattern = format!("%{}%", needle.trim());
        query = query.filter(
            users::name
                .ilike(pattern.clone())
                .or(users::email.ilike(pattern)),
        );
    }
    query
}

fn ordered(
    query: users::BoxedQuery<'static, Pg>,
    sort_by: UserSortField,
    ascending: bool,
) -> users::BoxedQuery<'static, Pg> {
    use UserSortField as Field;
    match (sort_by, ascending) {
        (Field::Name, true) => query.order(users::name.asc()),
        (Field::Name, false) => query.order(users::name.desc()),
        (Field::Email, true) => query.order(users::email.asc()),
        (Field::Email, false) => query.order(users::email.desc()),
        (Field::RegisteredAt, true) => query.order(users::registered_at.asc()),
        (Field::RegisteredAt, false) => query.order(users::registered_at.desc()),
    }
}

#[async_trait]
impl Repository<User> for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn add(&self, entity: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(write_row(entity))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, entity: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(entity.id()))
            .set(write_row(entity))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::query("no stored user to update"));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn page(&self, query: UserPage) -> Result<PageResult<User>, RepositoryError> {
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

        let rows: Vec<UserRow> = ordered(
            filtered(query.search.as_deref()),
            query.sort_by,
            query.direction.is_ascending(),
        )
        .then_order_by(users::id.asc())
        .select(UserRow::as_select())
        .offset(effective.offset())
        .limit(effective.page_size())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(row_to_user).collect();
        Ok(PageResult::new(items, total, effective))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserDraft;
    use rstest::rstest;

    #[rstest]
    fn write_row_round_trips_through_row_to_user() {
        let user = User::register(UserDraft {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
        })
        .expect("valid draft");

        let row = write_row(&user);
        let rebuilt = row_to_user(UserRow {
            id: row.id,
            name: row.name.to_owned(),
            email: row.email.to_owned(),
            password_hash: row.password_hash.to_owned(),
            registered_at: row.registered_at,
        });

        assert_eq!(rebuilt, user);
    }
}
