//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain records.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{pets, students, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub grade: String,
}

/// Insert and full-update shape for students.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentValues<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub age: i32,
    pub grade: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub age: Option<i32>,
    pub role: Option<String>,
    pub code: Option<String>,
}

/// Insert and full-update shape for users.
///
/// `treat_none_as_null` makes an update write every column, so clearing is
/// possible and the row always mirrors the domain record.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserValues<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password: &'a str,
    pub age: Option<i32>,
    pub role: Option<&'a str>,
    pub code: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pets)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PetValues<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub species: &'a str,
    pub breed: Option<&'a str>,
    pub age: Option<i32>,
    pub gender: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}
