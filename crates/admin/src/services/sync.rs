//! Remote snapshot refresh.
//!
//! Fetches the demo API snapshots and folds them into the local
//! collections with the local-wins merge. Refresh is fail-open: a failed
//! fetch is logged and reported, and the collection it was meant for is left
//! exactly as it was.

use loja_core::Record;
use loja_storage::{Repository, Workspace};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument};

use crate::remote::{FakeStoreClient, RemoteError};

/// Counts from one successful collection refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Records in the remote snapshot.
    pub fetched: usize,
    /// Records in the collection after the merge.
    pub total: usize,
}

/// Result of refreshing every collection.
///
/// Each collection is refreshed independently; one failing does not stop
/// the other.
#[derive(Debug)]
pub struct RefreshReport {
    pub products: Result<RefreshOutcome, RemoteError>,
    pub clients: Result<RefreshOutcome, RemoteError>,
}

impl RefreshReport {
    /// Whether every fetch succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.products.is_ok() && self.clients.is_ok()
    }
}

/// Drives remote refreshes of a [`Workspace`].
#[derive(Debug, Clone)]
pub struct SyncService {
    remote: FakeStoreClient,
}

impl SyncService {
    #[must_use]
    pub const fn new(remote: FakeStoreClient) -> Self {
        Self { remote }
    }

    /// Refresh the product collection.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the product collection is unchanged.
    #[instrument(skip_all)]
    pub async fn refresh_products(
        &self,
        workspace: &mut Workspace,
    ) -> Result<RefreshOutcome, RemoteError> {
        let snapshot = self.remote.fetch_products().await;
        apply_snapshot(workspace.products_mut(), snapshot)
    }

    /// Refresh the client collection.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the client collection is unchanged.
    #[instrument(skip_all)]
    pub async fn refresh_clients(
        &self,
        workspace: &mut Workspace,
    ) -> Result<RefreshOutcome, RemoteError> {
        let snapshot = self.remote.fetch_clients().await;
        apply_snapshot(workspace.clients_mut(), snapshot)
    }

    /// Refresh products and clients.
    ///
    /// Both fetches run concurrently; the merges are applied one after the
    /// other once both have resolved.
    pub async fn refresh_all(&self, workspace: &mut Workspace) -> RefreshReport {
        let (products, clients) =
            tokio::join!(self.remote.fetch_products(), self.remote.fetch_clients());

        let report = RefreshReport {
            products: apply_snapshot(workspace.products_mut(), products),
            clients: apply_snapshot(workspace.clients_mut(), clients),
        };

        info!(
            products = workspace.products().len(),
            clients = workspace.clients().len(),
            complete = report.is_complete(),
            "Refresh finished"
        );
        report
    }
}

/// Merge a fetched snapshot into `repo`, or leave it alone if the fetch failed.
///
/// # Errors
///
/// Passes the fetch error through after logging it.
pub fn apply_snapshot<T>(
    repo: &mut Repository<T>,
    snapshot: Result<Vec<T>, RemoteError>,
) -> Result<RefreshOutcome, RemoteError>
where
    T: Record + Clone + Serialize + DeserializeOwned,
{
    match snapshot {
        Ok(remote) => {
            repo.replace_from_remote(&remote);
            Ok(RefreshOutcome {
                fetched: remote.len(),
                total: repo.len(),
            })
        }
        Err(e) => {
            error!(key = %repo.key(), error = %e, "Remote fetch failed, keeping local collection");
            Err(e)
        }
    }
}
