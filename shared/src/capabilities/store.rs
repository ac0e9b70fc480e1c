use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// `Load` answers with the stored snapshot, `None` when nothing was ever
/// saved. `Save` answers `Ok(None)`.
pub type StoreResult = Result<Option<Vec<u8>>, CacheError>;

/// The shell keeps the snapshot as opaque bytes; encoding and integrity
/// checks happen in [`crate::offline_store`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContactStoreOperation {
    Load,
    Save {
        #[serde(with = "serde_bytes")]
        snapshot: Vec<u8>,
    },
}

impl Operation for ContactStoreOperation {
    type Output = StoreResult;
}

/// Offline copy of the contact list, shared across screens and sessions.
pub struct ContactStore<Ev> {
    context: CapabilityContext<ContactStoreOperation, Ev>,
}

impl<Ev> Capability<Ev> for ContactStore<Ev> {
    type Operation = ContactStoreOperation;
    type MappedSelf<MappedEv> = ContactStore<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        ContactStore::new(self.context.map_event(f))
    }
}

impl<Ev> ContactStore<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<ContactStoreOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn load<F>(&self, make_event: F)
    where
        F: FnOnce(StoreResult) -> Ev + Send + 'static,
    {
        self.request(ContactStoreOperation::Load, make_event);
    }

    pub fn save<F>(&self, snapshot: Vec<u8>, make_event: F)
    where
        F: FnOnce(StoreResult) -> Ev + Send + 'static,
    {
        self.request(ContactStoreOperation::Save { snapshot }, make_event);
    }

    fn request<F>(&self, operation: ContactStoreOperation, make_event: F)
    where
        F: FnOnce(StoreResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}
