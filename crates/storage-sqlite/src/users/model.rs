//! Database models for users.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use folio_core::auth::StoredUser;
use folio_core::errors::{DatabaseError, Error};
use uuid::Uuid;

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new user
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<UserDB> for StoredUser {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<Self, Error> {
        let id = Uuid::parse_str(&db.id).map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "user id '{}' is not a UUID: {e}",
                db.id
            )))
        })?;
        Ok(Self {
            id,
            email: db.email,
            password_hash: db.password_hash,
            created_at: Utc.from_utc_datetime(&db.created_at),
        })
    }
}
