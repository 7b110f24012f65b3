//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Student records keyed by their generated numeric identifier.
    students (id) {
        id -> Varchar,
        name -> Text,
        age -> Int4,
        grade -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts. Usernames are not unique.
    users (id) {
        id -> Uuid,
        username -> Text,
        password -> Text,
        age -> Nullable<Int4>,
        role -> Nullable<Text>,
        code -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pets; `owner_id` references `users.id` without a constraint.
    pets (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Text,
        species -> Text,
        breed -> Nullable<Text>,
        age -> Nullable<Int4>,
        gender -> Nullable<Text>,
        status -> Text,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(students, users, pets);
