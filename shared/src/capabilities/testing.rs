//! Test shell: drives the app through `AppTester` and holds effects that
//! need an answer until a test resolves them.

use std::collections::VecDeque;

use crux_core::testing::AppTester;

use super::{ContactStoreOperation, Effect, FetchResult, NavigateOperation, StoreResult};
use crate::app::{App, Model, ViewModel};
use crate::event::Event;
use crate::model::Entitlement;
use crate::screen::{ScreenConfig, ScreenKind};

pub struct ShellHarness {
    app: AppTester<App, Effect>,
    pub model: Model,
    fetches: VecDeque<Effect>,
    store: VecDeque<Effect>,
    pub fetches_issued: usize,
    pub renders: usize,
    pub store_ops: Vec<ContactStoreOperation>,
    pub navigations: Vec<NavigateOperation>,
}

impl ShellHarness {
    pub fn new() -> Self {
        Self {
            app: AppTester::default(),
            model: Model::default(),
            fetches: VecDeque::new(),
            store: VecDeque::new(),
            fetches_issued: 0,
            renders: 0,
            store_ops: Vec::new(),
            navigations: Vec::new(),
        }
    }

    pub fn open(config: ScreenConfig, premium: bool) -> Self {
        let mut shell = Self::new();
        shell.send(Event::ScreenOpened {
            config,
            utc_offset_minutes: 0,
        });
        shell.send(Event::SessionChanged(Entitlement {
            is_premium: premium,
        }));
        shell.renders = 0;
        shell
    }

    pub fn preset(kind: ScreenKind, premium: bool) -> Self {
        Self::open(kind.preset(), premium)
    }

    pub fn send(&mut self, event: Event) {
        let update = self.app.update(event, &mut self.model);
        self.absorb(update.effects, update.events);
    }

    pub fn pending_fetches(&self) -> usize {
        self.fetches.len()
    }

    pub fn pending_store(&self) -> usize {
        self.store.len()
    }

    pub fn resolve_fetch(&mut self, result: FetchResult) {
        let Some(Effect::Items(mut request)) = self.fetches.pop_front() else {
            panic!("no fetch pending");
        };
        let update = self
            .app
            .resolve(&mut request, result)
            .expect("fetch resolves");
        self.absorb(update.effects, update.events);
    }

    pub fn resolve_store(&mut self, result: StoreResult) {
        let Some(Effect::ContactStore(mut request)) = self.store.pop_front() else {
            panic!("no store request pending");
        };
        let update = self
            .app
            .resolve(&mut request, result)
            .expect("store request resolves");
        self.absorb(update.effects, update.events);
    }

    /// Answers fetches until none is pending. `script` gets the 1-based
    /// attempt number.
    pub fn settle_fetches(&mut self, mut script: impl FnMut(usize) -> FetchResult) {
        let mut attempt = 0;
        while self.pending_fetches() > 0 {
            attempt += 1;
            self.resolve_fetch(script(attempt));
        }
    }

    pub fn view(&self) -> ViewModel {
        self.app.view(&self.model)
    }

    fn absorb(&mut self, effects: Vec<Effect>, events: Vec<Event>) {
        for effect in effects {
            match effect {
                Effect::Render(_) => self.renders += 1,
                Effect::Items(_) => {
                    self.fetches_issued += 1;
                    self.fetches.push_back(effect);
                }
                Effect::ContactStore(ref request) => {
                    self.store_ops.push(request.operation.clone());
                    self.store.push_back(effect);
                }
                Effect::Navigate(ref request) => self.navigations.push(request.operation.clone()),
            }
        }
        for event in events {
            self.send(event);
        }
    }
}
