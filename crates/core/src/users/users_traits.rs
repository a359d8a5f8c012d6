use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::User;

/// Repository trait for user lookups.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Users eligible for reminders: those with a non-empty phone number.
    fn list_with_phone_number(&self) -> Result<Vec<User>>;
}
