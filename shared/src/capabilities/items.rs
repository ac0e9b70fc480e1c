use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::model::{Item, ItemKind};

/// Result the shell hands back for a fetch. Transfers come back as the
/// unfiltered union of sent and received.
pub type FetchResult = Result<Vec<Item>, FetchError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemsOperation {
    Fetch { kind: ItemKind },
}

impl Operation for ItemsOperation {
    type Output = FetchResult;
}

/// Remote source of list items. The shell owns transport and decoding.
pub struct Items<Ev> {
    context: CapabilityContext<ItemsOperation, Ev>,
}

impl<Ev> Capability<Ev> for Items<Ev> {
    type Operation = ItemsOperation;
    type MappedSelf<MappedEv> = Items<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Items::new(self.context.map_event(f))
    }
}

impl<Ev> Items<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<ItemsOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn fetch<F>(&self, kind: ItemKind, make_event: F)
    where
        F: FnOnce(FetchResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(ItemsOperation::Fetch { kind }).await;
            ctx.update_app(make_event(result));
        });
    }
}
