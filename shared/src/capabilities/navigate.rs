use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::{Contact, PaymentCard, Transfer};
use crate::screen::PrimaryAction;

/// Detail screens and bar actions the shell presents. Fire-and-forget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum NavigateOperation {
    ShowContact(Contact),
    ShowCard(PaymentCard),
    ShowTransfer(Transfer),
    Perform(PrimaryAction),
}

impl Operation for NavigateOperation {
    type Output = ();
}

pub struct Navigate<Ev> {
    context: CapabilityContext<NavigateOperation, Ev>,
}

impl<Ev> Capability<Ev> for Navigate<Ev> {
    type Operation = NavigateOperation;
    type MappedSelf<MappedEv> = Navigate<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Navigate::new(self.context.map_event(f))
    }
}

impl<Ev> Navigate<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<NavigateOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn go(&self, operation: NavigateOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
