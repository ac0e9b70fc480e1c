// lib.rs - list loading core shared by the iOS and Android shells

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod error;
pub mod event;
pub mod fallback;
pub mod format;
pub mod model;
pub mod offline_store;
pub mod projector;
pub mod retry;
pub mod rules;
pub mod screen;

pub use app::{ActionView, App, DataSource, Model, RowView, ViewModel};
pub use capabilities::{
    Capabilities, ContactStoreOperation, Effect, FetchResult, ItemsOperation, NavigateOperation,
    StoreResult,
};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{CacheError, ContractViolation, ErrorAlert, ErrorKind, FetchError, ListError};
pub use event::Event;
pub use format::{DateStyle, Formatter, LocaleFormatter};
pub use model::{Contact, Direction, Entitlement, Item, ItemKind, PaymentCard, Transfer};
pub use projector::DisplayEntry;
pub use retry::{Decision, RetryState};
pub use screen::{
    ConfigError, PrimaryAction, RetryPolicy, ScreenConfig, ScreenContext, ScreenKind,
    MAX_RETRY_ATTEMPTS,
};
