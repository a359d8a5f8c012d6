//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use billfold_core::users::User;

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            name: db.name,
            phone_number: db.phone_number,
            created_at: db.created_at,
        }
    }
}
