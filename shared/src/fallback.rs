//! Fallback cache reader. Stands in for a failed fetch once retries are spent
//! and the user is entitled to cached data.

use chrono::Utc;
use tracing::{debug, instrument};

use crate::capabilities::{ContactStore, StoreResult};
use crate::error::CacheError;
use crate::model::{Contact, Item, ItemKind};
use crate::offline_store;

/// Asks the shell for the cached copy of `kind`. Only contacts are kept
/// offline; other kinds fail at once with [`CacheError::Unsupported`].
pub fn load_cached<Ev, F>(
    kind: ItemKind,
    store: &ContactStore<Ev>,
    make_event: F,
) -> Result<(), CacheError>
where
    Ev: 'static,
    F: FnOnce(StoreResult) -> Ev + Send + 'static,
{
    match kind {
        ItemKind::Contact => {
            store.load(make_event);
            Ok(())
        }
        ItemKind::Card | ItemKind::Transfer => Err(CacheError::Unsupported(kind)),
    }
}

#[instrument(skip_all)]
pub fn cached_items(result: StoreResult) -> Result<Vec<Item>, CacheError> {
    let bytes = result?.ok_or(CacheError::Empty)?;
    let contacts = offline_store::decode_snapshot(&bytes)?;
    debug!(count = contacts.len(), "loaded cached contacts");
    Ok(contacts.into_iter().map(Item::Contact).collect())
}

/// Encodes the contacts among `items`. Other kinds are left out.
pub fn snapshot(items: &[Item]) -> Result<Vec<u8>, CacheError> {
    let contacts: Vec<Contact> = items
        .iter()
        .filter_map(|item| match item {
            Item::Contact(contact) => Some(contact.clone()),
            Item::Card(_) | Item::Transfer(_) => None,
        })
        .collect();
    offline_store::encode_snapshot(&contacts, Utc::now())
}
