use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use folio_core::auth::{NewUser, StoredUser, User, UserRepositoryTrait};
use folio_core::Result;

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

/// Repository for managing user rows in the database
pub struct UserRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    /// Inserts a new user row. The email uniqueness constraint is the only
    /// duplicate detector; a violation comes back as
    /// `DatabaseError::UniqueViolation` for the auth layer to translate.
    async fn create_user(&self, new_user: NewUser) -> Result<StoredUser> {
        let row = NewUserDB {
            id: Uuid::new_v4().to_string(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<StoredUser> {
                let result_db = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }

    fn get_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        let mut conn = get_connection(&self.pool)?;

        let result = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        result.map(StoredUser::try_from).transpose()
    }

    fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let result = users::table
            .find(user_id.to_string())
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        result
            .map(|db| StoredUser::try_from(db).map(User::from))
            .transpose()
    }

    fn ping(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .select(users::id)
            .limit(1)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }
}
