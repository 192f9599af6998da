//! Data-plane connectivity probe
//!
//! Opens a PostgreSQL connection from a connection string and runs a trivial
//! query, proving the endpoint is reachable and the credentials work. One
//! shot, no retry.

use tokio_postgres::NoTls;
use tracing::debug;

use crate::error::{CoreError, Result};

/// Attempt a database connection and a `SELECT 1`
pub async fn check_connection(url: &str) -> Result<()> {
    let (client, connection) = tokio_postgres::connect(url, NoTls)
        .await
        .map_err(|e| CoreError::Probe(e.to_string()))?;

    // The connection task drives the socket; it ends when the client drops.
    let driver = tokio::spawn(connection);

    let result = client
        .simple_query("SELECT 1")
        .await
        .map(|_| ())
        .map_err(|e| CoreError::Probe(e.to_string()));

    drop(client);
    driver.abort();
    debug!("connectivity probe finished: {:?}", result.is_ok());
    result
}
