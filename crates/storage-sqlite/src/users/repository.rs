use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use super::model::UserDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::users::dsl::*;
use billfold_core::errors::Result;
use billfold_core::users::{User, UserRepositoryTrait};

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserRepository { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(User::from(user_db))
    }

    fn list_with_phone_number(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let users_db = users
            .filter(phone_number.is_not_null())
            .filter(phone_number.ne(""))
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(users_db.into_iter().map(User::from).collect())
    }
}
