//! sea-orm backed [`UserDirectory`] over the `users` table.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, SqlErr,
};
use time::OffsetDateTime;

use super::{DirectoryError, NewUser, UserDirectory, UserRecord};
use crate::auth::claims::Role;
use crate::entities::users;

pub struct SeaUserDirectory {
    db: DatabaseConnection,
}

impl SeaUserDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(url: &str) -> Result<Self, DirectoryError> {
        let db = Database::connect(url)
            .await
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;
        Ok(Self::new(db))
    }
}

fn to_record(model: users::Model) -> Result<UserRecord, DirectoryError> {
    // A stored role outside the closed enum is a data defect, not a default.
    let role = Role::parse(&model.role).ok_or_else(|| {
        DirectoryError::Corrupt(format!("unknown role {:?} for user {}", model.role, model.id))
    })?;

    Ok(UserRecord {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        role,
        active: model.active,
    })
}

fn map_db_err(e: DbErr) -> DirectoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DirectoryError::DuplicateEmail,
        _ => DirectoryError::Unavailable(e.to_string()),
    }
}

#[async_trait]
impl UserDirectory for SeaUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DirectoryError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        model.map(to_record).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, DirectoryError> {
        // The unique index on email arbitrates concurrent registrations; a
        // loser surfaces here as DuplicateEmail rather than a second account.
        let model = users::ActiveModel {
            id: ActiveValue::NotSet,
            email: ActiveValue::Set(new_user.email),
            password_hash: ActiveValue::Set(new_user.password_hash),
            first_name: ActiveValue::Set(new_user.first_name),
            last_name: ActiveValue::Set(new_user.last_name),
            role: ActiveValue::Set(new_user.role.as_str().to_string()),
            active: ActiveValue::Set(new_user.active),
            created_at: ActiveValue::Set(OffsetDateTime::now_utc()),
            last_seen_at: ActiveValue::Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        to_record(model)
    }

    async fn record_last_seen(&self, id: i64, at: OffsetDateTime) -> Result<(), DirectoryError> {
        users::ActiveModel {
            id: ActiveValue::Unchanged(id),
            last_seen_at: ActiveValue::Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }
}
