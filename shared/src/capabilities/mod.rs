//! Effects the list core asks the shell to perform. The shell fetches items,
//! keeps the offline contact snapshot, navigates and renders.

mod items;
mod navigate;
mod store;

#[cfg(test)]
pub mod testing;

pub use self::items::{FetchResult, Items, ItemsOperation};
pub use self::navigate::{Navigate, NavigateOperation};
pub use self::store::{ContactStore, ContactStoreOperation, StoreResult};

pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub items: Items<Event>,
    pub contact_store: ContactStore<Event>,
    pub navigate: Navigate<Event>,
}
