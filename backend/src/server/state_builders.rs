//! Builds the HTTP state over whichever stores the configuration selects.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use credentials_backend::inbound::http::state::{HttpState, HttpStatePorts};
use credentials_backend::outbound::memory::{
    InMemoryCredentialRepository, InMemoryUserRepository,
};
use credentials_backend::outbound::persistence::{
    DbPool, DieselCredentialRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Which store family backs the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StoreKind {
    Postgres,
    InMemory,
}

fn ports_for_pool(pool: Option<&DbPool>, clock: Arc<dyn Clock>) -> (StoreKind, HttpStatePorts) {
    match pool {
        Some(pool) => (
            StoreKind::Postgres,
            HttpStatePorts::for_stores(
                Arc::new(DieselCredentialRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                clock,
            ),
        ),
        None => (
            StoreKind::InMemory,
            HttpStatePorts::for_stores(
                Arc::new(InMemoryCredentialRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
                clock,
            ),
        ),
    }
}

/// Build the shared HTTP state for the configured stores.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (kind, ports) = ports_for_pool(config.db_pool.as_ref(), Arc::new(DefaultClock));
    info!(store = ?kind, "credential and user stores selected");
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn without_pool_uses_memory_stores() {
        let (kind, _) = ports_for_pool(None, Arc::new(DefaultClock));
        assert_eq!(kind, StoreKind::InMemory);
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_state_serves_empty_list() {
        let (_, ports) = ports_for_pool(None, Arc::new(DefaultClock));
        let state = HttpState::new(ports);
        let listed = state
            .credentials
            .list_credentials()
            .await
            .expect("memory store never fails");
        assert!(listed.is_empty());
    }
}
