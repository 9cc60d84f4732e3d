//! PostgreSQL-backed `UserRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Application, NewUserAccount, UserAccount, UserId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ACTIVE, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserRepositoryError> {
    let UserRow {
        id,
        username,
        application,
        password_hash,
    } = row;
    Ok(UserAccount {
        id: UserId::new(id),
        username: Username::new(&username).map_err(|err| {
            UserRepositoryError::query(format!("user {id} has invalid username: {err}"))
        })?,
        application: Application::new(&application).map_err(|err| {
            UserRepositoryError::query(format!("user {id} has invalid application: {err}"))
        })?,
        password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .filter(users::record_status.eq(ACTIVE))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &NewUserAccount) -> Result<UserId, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: account.username.as_ref(),
            application: account.application.as_ref(),
            password_hash: &account.password_hash,
            record_status: ACTIVE,
            created_by: &account.created_by,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result::<i64>(&mut conn)
            .await
            .map(UserId::new)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    UserRepositoryError::duplicate(account.username.as_ref())
                }
                other => map_diesel_error(other),
            })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn row_becomes_account() {
        let account = row_to_account(UserRow {
            id: 4,
            username: "ops@example.com".to_owned(),
            application: "dispatch-console".to_owned(),
            password_hash: "sha256$1$00$ff".to_owned(),
        })
        .expect("valid row");
        assert_eq!(account.id, UserId::new(4));
        assert_eq!(account.username.as_ref(), "ops@example.com");
    }

    #[rstest]
    fn malformed_stored_username_is_a_query_error() {
        let error = row_to_account(UserRow {
            id: 4,
            username: "not-an-email".to_owned(),
            application: "dispatch-console".to_owned(),
            password_hash: String::new(),
        })
        .expect_err("invalid username");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
    }
}
