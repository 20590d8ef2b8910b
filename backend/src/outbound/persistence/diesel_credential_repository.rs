//! PostgreSQL-backed `CredentialRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialRepository, CredentialRepositoryError};
use crate::domain::{Credential, CredentialId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CredentialRow, CredentialUpdate, NewCredentialRow};
use super::pool::{DbPool, PoolError};
use super::schema::credentials;

/// Diesel-backed implementation of the `CredentialRepository` port.
#[derive(Clone)]
pub struct DieselCredentialRepository {
    pool: DbPool,
}

impl DieselCredentialRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CredentialRepositoryError {
    map_pool_error(error, CredentialRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CredentialRepositoryError {
    map_diesel_error(
        error,
        CredentialRepositoryError::query,
        CredentialRepositoryError::connection,
    )
}

fn to_domain(row: CredentialRow) -> Result<Credential, CredentialRepositoryError> {
    Credential::try_from(row).map_err(CredentialRepositoryError::query)
}

#[async_trait]
impl CredentialRepository for DieselCredentialRepository {
    async fn insert(&self, credential: &Credential) -> Result<(), CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(credentials::table)
            .values(NewCredentialRow::from(credential))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_all(&self) -> Result<Vec<Credential>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<CredentialRow> = credentials::table
            .select(CredentialRow::as_select())
            .order_by((credentials::created_at.desc(), credentials::id.desc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<CredentialRow> = credentials::table
            .find(*id.as_uuid())
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn update(&self, credential: &Credential) -> Result<bool, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changed = diesel::update(credentials::table.find(*credential.id().as_uuid()))
            .set(CredentialUpdate {
                name: credential.name().as_ref(),
            })
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(changed > 0)
    }

    async fn delete_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<CredentialRow> = diesel::delete(credentials::table.find(*id.as_uuid()))
            .returning(CredentialRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn clear(&self) -> Result<(), CredentialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(credentials::table)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
