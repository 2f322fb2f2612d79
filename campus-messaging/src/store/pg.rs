use diesel::pg::PgConnection;
use diesel::prelude::*;

use campus_shared::clients::db::DbPool;
use campus_shared::errors::{AppError, AppResult};

use super::{Repository, Store};
use crate::models::{Message, NewMessage, User};
use crate::schema::{messages, users};

/// Diesel/PostgreSQL store backed by an r2d2 pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl Store for PgStore {
    fn transaction<T, F>(&self, work: F) -> AppResult<T>
    where
        F: FnOnce(&mut dyn Repository) -> AppResult<T>,
    {
        let mut pooled = self.pool.get().map_err(|e| AppError::Internal(e.into()))?;
        let conn: &mut PgConnection = &mut pooled;

        conn.transaction(|conn| work(&mut PgRepository { conn }))
    }

    fn ping(&self) -> AppResult<()> {
        let mut pooled = self.pool.get().map_err(|e| AppError::Internal(e.into()))?;
        let conn: &mut PgConnection = &mut pooled;

        diesel::sql_query("SELECT 1").execute(conn)?;
        Ok(())
    }
}

struct PgRepository<'a> {
    conn: &'a mut PgConnection,
}

impl Repository for PgRepository<'_> {
    fn find_user_by_username(&mut self, username: &str) -> AppResult<Option<User>> {
        let user = users::table
            .filter(users::username.eq(username))
            .first::<User>(self.conn)
            .optional()?;

        Ok(user)
    }

    fn insert_message(&mut self, message: &NewMessage) -> AppResult<Message> {
        let stored = diesel::insert_into(messages::table)
            .values(message)
            .get_result::<Message>(self.conn)?;

        Ok(stored)
    }

    fn messages_between(&mut self, user_a: i64, user_b: i64) -> AppResult<Vec<Message>> {
        let a_to_b = messages::sender_id.eq(user_a).and(messages::recipient_id.eq(user_b));
        let b_to_a = messages::sender_id.eq(user_b).and(messages::recipient_id.eq(user_a));

        let items = messages::table
            .filter(a_to_b.or(b_to_a))
            .order((messages::sent_at.asc(), messages::id.asc()))
            .load::<Message>(self.conn)?;

        Ok(items)
    }
}
