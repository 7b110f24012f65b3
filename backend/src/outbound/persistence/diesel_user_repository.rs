//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{AuthCode, Password, Role, User, UserId, UserPatch};

use super::error_mapping::{from_column, map_diesel_error, map_pool_error, to_column};
use super::models::{UserRow, UserValues};
use super::pool::{DbPool, PoolError};
use super::schema::users;

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn corrupt(id: &UserId, column: &str) -> UserPersistenceError {
    UserPersistenceError::query(format!("user {id} has an invalid {column}"))
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::from_uuid(row.id);
    let password = Password::new(row.password).map_err(|_| corrupt(&id, "password"))?;
    let age = row
        .age
        .map(|age| from_column(age).ok_or_else(|| corrupt(&id, "age")))
        .transpose()?;
    let role = row
        .role
        .map(|role| role.parse::<Role>().map_err(|_| corrupt(&id, "role")))
        .transpose()?;
    let code = row
        .code
        .map(|code| AuthCode::new(code).map_err(|_| corrupt(&id, "code")))
        .transpose()?;
    Ok(User {
        id,
        username: row.username,
        password,
        age,
        role,
        code,
    })
}

fn values(user: &User) -> Result<UserValues<'_>, UserPersistenceError> {
    let age = user
        .age
        .map(|age| to_column(age).ok_or_else(|| corrupt(&user.id, "age")))
        .transpose()?;
    Ok(UserValues {
        id: *user.id.as_uuid(),
        username: &user.username,
        password: user.password.expose(),
        age,
        role: user.role.map(Role::as_str),
        code: user.code.as_ref().map(AsRef::as_ref),
    })
}

/// Escape `%`, `_` and `\` so a search fragment matches literally.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn search_by_username(&self, fragment: &str) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::username.ilike(like_pattern(fragment)))
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::username.eq(username))
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let row = values(user)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let Some(mut user) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        user.apply(patch);

        let row = values(&user)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok((updated > 0).then_some(user))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        u64::try_from(count).map_err(|_| UserPersistenceError::query("negative user count"))
    }

    async fn reported_ages(&self) -> Result<Vec<u32>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let ages: Vec<Option<i32>> = users::table
            .filter(users::age.is_not_null())
            .order((users::created_at.asc(), users::id.asc()))
            .select(users::age)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(ages.into_iter().flatten().filter_map(from_column).collect())
    }
}
