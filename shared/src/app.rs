//! List refresh orchestration.
//!
//! One [`App`] drives one list screen: fetch, narrow, project, publish.
//! Failed fetches go through the retry controller and, once retries are
//! spent, through the fallback cache when the user is entitled to it. Fetch
//! and cache failures end up as an alert in the view; nothing here panics.
//!
//! At most one refresh is outstanding per screen. A `Refresh` arriving while
//! one is in flight is dropped, and shell responses carry the id of the
//! refresh that asked for them so a late answer can never overwrite a newer
//! list.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::capabilities::{Capabilities, FetchResult, NavigateOperation, StoreResult};
use crate::error::{ErrorAlert, ErrorKind, ListError};
use crate::event::Event;
use crate::fallback;
use crate::format::LocaleFormatter;
use crate::model::{Entitlement, Item};
use crate::projector::{self, DisplayEntry};
use crate::retry::{self, Decision, RetryState};
use crate::rules;
use crate::screen::{PrimaryAction, ScreenConfig, ScreenContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Remote,
    Cache,
}

#[derive(Debug, Default)]
pub struct Model {
    screen: Option<ScreenContext>,
    formatter: LocaleFormatter,
    entitlement: Entitlement,
    retry: RetryState,
    entries: Vec<DisplayEntry>,
    source: Option<DataSource>,
    alert: Option<ErrorAlert>,
    // Id of the refresh in flight.
    cycle: Option<Uuid>,
    attempts: u32,
}

impl Model {
    pub fn screen(&self) -> Option<&ScreenContext> {
        self.screen.as_ref()
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn retry_state(&self) -> RetryState {
        self.retry
    }

    pub fn is_refreshing(&self) -> bool {
        self.cycle.is_some()
    }

    /// Fetches issued by the latest refresh, retries included.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub title: String,
    pub subtitle: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ActionView {
    pub action: PrimaryAction,
    pub label: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ViewModel {
    pub title: String,
    pub primary_action: Option<ActionView>,
    pub rows: Vec<RowView>,
    pub loading: bool,
    pub alert: Option<ErrorAlert>,
    /// Where the rows came from. Cached rows look the same as live ones;
    /// shells that want a marker read it here.
    pub source: Option<DataSource>,
}

#[derive(Default)]
pub struct App;

impl App {
    fn open(model: &mut Model, caps: &Capabilities, config: ScreenConfig, utc_offset_minutes: i32) {
        if let Some(ctx) = model.screen {
            warn!(screen = %ctx.kind(), "screen already opened");
            return;
        }

        match ScreenContext::new(config) {
            Ok(ctx) => {
                model.formatter = LocaleFormatter::from_utc_offset_minutes(utc_offset_minutes)
                    .unwrap_or_else(|| {
                        warn!(utc_offset_minutes, "offset out of range, dates render in UTC");
                        LocaleFormatter::utc()
                    });
                model.retry = RetryState::new(ctx.retry_policy());
                model.screen = Some(ctx);
                info!(screen = %ctx.kind(), "screen opened");
            }
            Err(e) => {
                error!(error = %e, "rejected screen config");
                model.alert = Some(ErrorAlert::from(ErrorKind::InvalidConfig));
            }
        }
        caps.render.render();
    }

    fn start_refresh(model: &mut Model, caps: &Capabilities) {
        let Some(ctx) = model.screen else {
            warn!("refresh before the screen was opened");
            return;
        };
        if let Some(cycle) = model.cycle {
            debug!(%cycle, "refresh already in flight");
            return;
        }

        let cycle = Uuid::new_v4();
        model.cycle = Some(cycle);
        model.attempts = 0;
        info!(screen = %ctx.kind(), %cycle, "refresh started");
        caps.render.render();

        Self::fetch(&ctx, model, caps, cycle);
    }

    fn fetch(ctx: &ScreenContext, model: &mut Model, caps: &Capabilities, cycle: Uuid) {
        model.attempts += 1;
        debug!(%cycle, attempt = model.attempts, "fetching");
        caps.items
            .fetch(ctx.item_kind(), move |result| Event::Fetched { cycle, result });
    }

    /// The screen, if `cycle` is the refresh still in flight.
    fn current(model: &Model, cycle: Uuid) -> Option<ScreenContext> {
        if model.cycle == Some(cycle) {
            model.screen
        } else {
            debug!(%cycle, "discarding response for a finished refresh");
            None
        }
    }

    fn fetched(model: &mut Model, caps: &Capabilities, cycle: Uuid, result: FetchResult) {
        let Some(ctx) = Self::current(model, cycle) else {
            return;
        };

        let err = match result {
            Ok(items) => return Self::complete(&ctx, model, caps, items),
            Err(err) => err,
        };

        match retry::on_failure(&ctx, &mut model.retry, model.entitlement, err) {
            Decision::Retry => Self::fetch(&ctx, model, caps, cycle),
            Decision::Fallback(err) => {
                warn!(error = %err, attempts = model.attempts, "fetch exhausted, serving cached data");
                let requested =
                    fallback::load_cached(ctx.item_kind(), &caps.contact_store, move |result| {
                        Event::CacheLoaded { cycle, result }
                    });
                if let Err(e) = requested {
                    Self::fail(model, caps, ListError::Cache(e));
                }
            }
            Decision::Fail(err) => {
                warn!(error = %err, attempts = model.attempts, "fetch failed");
                Self::fail(model, caps, ListError::Fetch(err));
            }
        }
    }

    fn complete(ctx: &ScreenContext, model: &mut Model, caps: &Capabilities, items: Vec<Item>) {
        model.retry.reset();

        if let Err(violation) = rules::check_kinds(&items, ctx) {
            error!(%violation, "item source broke its contract");
            Self::fail(model, caps, ListError::Contract(violation));
            return;
        }

        let snapshot = rules::should_cache(ctx, model.entitlement).then(|| fallback::snapshot(&items));

        let retained = rules::filter(items, ctx);
        let entries = projector::project_all(retained, ctx, &model.formatter);
        Self::publish(model, caps, entries, DataSource::Remote);

        // Written after the refresh has ended so a slow store never holds up
        // the next one.
        match snapshot {
            Some(Ok(bytes)) => caps.contact_store.save(bytes, Event::CacheSaved),
            Some(Err(e)) => warn!(error = %e, "could not encode contacts for caching"),
            None => {}
        }
    }

    fn cache_loaded(model: &mut Model, caps: &Capabilities, cycle: Uuid, result: StoreResult) {
        let Some(ctx) = Self::current(model, cycle) else {
            return;
        };

        match fallback::cached_items(result) {
            Ok(items) => {
                let entries = projector::project_all(items, &ctx, &model.formatter);
                Self::publish(model, caps, entries, DataSource::Cache);
            }
            Err(e) => {
                warn!(error = %e, "cache read failed");
                Self::fail(model, caps, ListError::Cache(e));
            }
        }
    }

    fn publish(
        model: &mut Model,
        caps: &Capabilities,
        entries: Vec<DisplayEntry>,
        source: DataSource,
    ) {
        info!(
            count = entries.len(),
            attempts = model.attempts,
            ?source,
            "published list"
        );
        model.entries = entries;
        model.source = Some(source);
        model.alert = None;
        model.cycle = None;
        caps.render.render();
    }

    // Previously published entries stay on screen under the alert.
    fn fail(model: &mut Model, caps: &Capabilities, error: ListError) {
        model.alert = Some(ErrorAlert::from(&error));
        model.cycle = None;
        caps.render.render();
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(
            event = event.name(),
            user = event.is_user_initiated(),
            "update"
        );

        match event {
            Event::ScreenOpened {
                config,
                utc_offset_minutes,
            } => Self::open(model, caps, config, utc_offset_minutes),

            Event::SessionChanged(entitlement) => {
                model.entitlement = entitlement;
            }

            Event::Appear => {
                if model.entries.is_empty() {
                    Self::start_refresh(model, caps);
                } else {
                    debug!(count = model.entries.len(), "entries already published");
                }
            }

            Event::Refresh => Self::start_refresh(model, caps),

            Event::Fetched { cycle, result } => Self::fetched(model, caps, cycle, result),

            Event::CacheLoaded { cycle, result } => Self::cache_loaded(model, caps, cycle, result),

            Event::CacheSaved(result) => match result {
                Ok(_) => debug!("cached contacts"),
                Err(e) => warn!(error = %e, "could not cache contacts"),
            },

            Event::Select { index } => match model.entries.get(index) {
                Some(entry) => caps.navigate.go(entry.destination()),
                None => warn!(index, "selected entry does not exist"),
            },

            Event::PrimaryActionTapped => match model.screen {
                Some(ctx) => caps
                    .navigate
                    .go(NavigateOperation::Perform(ctx.primary_action())),
                None => warn!("primary action before the screen was opened"),
            },

            Event::AlertDismissed => {
                model.alert = None;
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel {
            title: model
                .screen
                .map(|ctx| ctx.title().to_string())
                .unwrap_or_default(),
            primary_action: model.screen.map(|ctx| {
                let action = ctx.primary_action();
                ActionView {
                    action,
                    label: action.label().to_string(),
                }
            }),
            rows: model
                .entries
                .iter()
                .map(|entry| RowView {
                    title: entry.title.clone(),
                    subtitle: entry.subtitle.clone(),
                })
                .collect(),
            loading: model.cycle.is_some(),
            alert: model.alert.clone(),
            source: model.source,
        }
    }
}
