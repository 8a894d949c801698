use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::{
    domain::repositories::push_tokens::PushTokenRepository,
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::push_tokens},
};

pub struct PushTokenPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PushTokenPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PushTokenRepository for PushTokenPostgres {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = push_tokens::table
            .filter(push_tokens::user_id.eq(user_id))
            .select(push_tokens::token)
            .load::<String>(&mut conn)?;

        Ok(results)
    }
}
