//! Local catalog operations on a [`Workspace`].

use chrono::{DateTime, Utc};
use loja_core::{
    CartItem, Client, ClientSort, NewClient, NewProduct, Product, Record, RecordId,
    filter_by_title, sort_clients,
};
use loja_storage::{Repository, Workspace};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Pick a local identifier for `now` that is not yet taken in `repo`.
///
/// Two creations within the same millisecond would otherwise collide, so the
/// timestamp is bumped until it is free.
fn fresh_local_id<T>(repo: &Repository<T>, now: DateTime<Utc>) -> RecordId
where
    T: Record + Clone + Serialize + DeserializeOwned,
{
    let mut millis = now.timestamp_millis();
    loop {
        let id = RecordId::local_at(millis);
        if repo.get(&id).is_none() {
            return id;
        }
        millis += 1;
    }
}

/// Create a product on this device and return its identifier.
pub fn create_product(workspace: &mut Workspace, draft: NewProduct) -> RecordId {
    create_product_at(workspace, draft, Utc::now())
}

fn create_product_at(workspace: &mut Workspace, draft: NewProduct, now: DateTime<Utc>) -> RecordId {
    let id = fresh_local_id(workspace.products(), now);
    workspace.products_mut().create(draft.into_product(id.clone()));
    info!(id = %id, "Product created");
    id
}

/// Create a client on this device and return its identifier.
///
/// The creation time is now.
pub fn create_client(workspace: &mut Workspace, draft: NewClient) -> RecordId {
    create_client_at(workspace, draft, Utc::now())
}

fn create_client_at(workspace: &mut Workspace, draft: NewClient, now: DateTime<Utc>) -> RecordId {
    let id = fresh_local_id(workspace.clients(), now);
    workspace
        .clients_mut()
        .create(draft.into_client(id.clone(), now));
    info!(id = %id, "Client created");
    id
}

/// Put one unit of a known product in the cart.
///
/// Returns `false` when no product has that identifier.
pub fn add_product_to_cart(workspace: &mut Workspace, id: &RecordId) -> bool {
    let Some(item) = workspace.products().get(id).map(CartItem::from) else {
        debug!(id = %id, "Product not found, cart unchanged");
        return false;
    };
    workspace.cart_mut().add_item(item);
    true
}

/// Products whose title contains `term`, ignoring case.
#[must_use]
pub fn search_products<'a>(workspace: &'a Workspace, term: &str) -> Vec<&'a Product> {
    filter_by_title(workspace.products().records(), term)
}

/// A sorted copy of the client collection.
#[must_use]
pub fn sorted_clients(workspace: &Workspace, by: ClientSort) -> Vec<Client> {
    let mut clients = workspace.clients().records().to_vec();
    sort_clients(&mut clients, by);
    clients
}
