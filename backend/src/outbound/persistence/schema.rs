//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed schema exactly; Diesel uses
//! them for compile-time query validation and SQL generation. Migrations are
//! managed outside this repository.

diesel::table! {
    /// Motorcycle fleet table.
    motorcycles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Normalised plate text (uppercase, no hyphen).
        plate -> Varchar,
        /// Model name.
        model -> Varchar,
        /// Brand name.
        brand -> Varchar,
        /// RFID tag attached to the vehicle.
        rfid_tag -> Varchar,
        /// Model year.
        year -> Int4,
        /// Registration timestamp.
        registered_at -> Timestamptz,
        /// Open problem note, if any.
        problem -> Nullable<Varchar>,
        /// Free-text location hint, if any.
        location -> Nullable<Varchar>,
        /// Fleet status in its stable string form.
        status -> Varchar,
        /// Yard holding the motorcycle, when checked in.
        yard_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Yards table.
    yards (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Address in the flattened `street|city|postal` form.
        address -> Varchar,
        /// Maximum number of motorcycles the yard holds.
        capacity -> Int4,
    }
}

diesel::table! {
    /// User accounts table.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Contact email.
        email -> Varchar,
        /// Pre-hashed password material.
        password_hash -> Varchar,
        /// Registration timestamp.
        registered_at -> Timestamptz,
    }
}

diesel::joinable!(motorcycles -> yards (yard_id));
diesel::allow_tables_to_appear_in_same_query!(motorcycles, yards, users);
