//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; the domain never sees
//! these types. Write rows double as insert values and update changesets
//! (the primary key is skipped on update, and `None` writes NULL).

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{motorcycles, users, yards};

/// Row struct for reading from the motorcycles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = motorcycles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MotorcycleRow {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub brand: String,
    pub rfid_tag: String,
    pub year: i32,
    pub registered_at: DateTime<Utc>,
    pub problem: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub yard_id: Option<Uuid>,
}

/// Insert/update values for the motorcycles table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = motorcycles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MotorcycleWriteRow<'a> {
    pub id: Uuid,
    pub plate: &'a str,
    pub model: &'a str,
    pub brand: &'a str,
    pub rfid_tag: &'a str,
    pub year: i32,
    pub registered_at: DateTime<Utc>,
    pub problem: Option<&'a str>,
    pub location: Option<&'a str>,
    pub status: &'a str,
    pub yard_id: Option<Uuid>,
}

/// Row struct for reading from the yards table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = yards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct YardRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub capacity: i32,
}

/// Insert/update values for the yards table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = yards)]
pub(crate) struct YardWriteRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub address: String,
    pub capacity: i32,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

/// Insert/update values for the users table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserWriteRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub registered_at: DateTime<Utc>,
}
