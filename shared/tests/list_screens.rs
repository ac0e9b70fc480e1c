use chrono::{TimeZone, Utc};
use crux_core::testing::AppTester;
use shared::{
    App, Contact, ContactStoreOperation, DataSource, Direction, Effect, Entitlement, Event,
    FetchError, FetchResult, Item, ItemKind, ItemsOperation, Model, ScreenKind, Transfer,
    ViewModel,
};

/// Answers every effect as soon as the core asks, the way a native shell
/// with a synchronous backend would.
struct Shell {
    app: AppTester<App, Effect>,
    model: Model,
    contacts_online: bool,
    stored: Option<Vec<u8>>,
    fetches: usize,
}

impl Shell {
    fn open(kind: ScreenKind, premium: bool) -> Self {
        let mut shell = Self {
            app: AppTester::default(),
            model: Model::default(),
            contacts_online: true,
            stored: None,
            fetches: 0,
        };
        shell.send(Event::ScreenOpened {
            config: kind.preset(),
            utc_offset_minutes: 0,
        });
        shell.send(Event::SessionChanged(Entitlement {
            is_premium: premium,
        }));
        shell
    }

    fn send(&mut self, event: Event) {
        let update = self.app.update(event, &mut self.model);
        let mut effects = update.effects;
        let mut events = update.events;

        while !effects.is_empty() || !events.is_empty() {
            for event in std::mem::take(&mut events) {
                effects.extend(self.app.update(event, &mut self.model).effects);
            }
            for effect in std::mem::take(&mut effects) {
                let update = match effect {
                    Effect::Items(mut request) => {
                        let ItemsOperation::Fetch { kind } = request.operation;
                        let result = self.backend(kind);
                        self.app.resolve(&mut request, result).expect("fetch resolves")
                    }
                    Effect::ContactStore(mut request) => {
                        let result = match &request.operation {
                            ContactStoreOperation::Load => Ok(self.stored.clone()),
                            ContactStoreOperation::Save { snapshot } => {
                                self.stored = Some(snapshot.clone());
                                Ok(None)
                            }
                        };
                        self.app.resolve(&mut request, result).expect("store resolves")
                    }
                    Effect::Render(_) | Effect::Navigate(_) => continue,
                };
                effects.extend(update.effects);
                events.extend(update.events);
            }
        }
    }

    fn backend(&mut self, kind: ItemKind) -> FetchResult {
        self.fetches += 1;
        match kind {
            ItemKind::Contact if self.contacts_online => Ok(vec![
                Contact::new("Ann", "555-0100").into(),
                Contact::new("Ben", "555-0101").into(),
            ]),
            ItemKind::Contact => Err(FetchError::Network("offline".into())),
            ItemKind::Card => Err(FetchError::from_http_status(503, None)),
            ItemKind::Transfer => Ok(vec![
                lunch(Direction::Sent, "Bob"),
                lunch(Direction::Received, "Cat"),
            ]),
        }
    }

    fn view(&self) -> ViewModel {
        self.app.view(&self.model)
    }
}

fn lunch(direction: Direction, counterparty: &str) -> Item {
    Item::Transfer(Transfer {
        amount: 12.5,
        currency_code: "USD".into(),
        description: "Lunch".into(),
        date: Utc.with_ymd_and_hms(2024, 5, 17, 13, 45, 0).unwrap(),
        counterparty_name: counterparty.into(),
        direction,
    })
}

fn titles(view: &ViewModel) -> Vec<&str> {
    view.rows.iter().map(|row| row.title.as_str()).collect()
}

#[test]
fn premium_user_going_offline_sees_cached_friends() {
    let mut shell = Shell::open(ScreenKind::Friends, true);

    shell.send(Event::Appear);
    assert_eq!(titles(&shell.view()), ["Ann", "Ben"]);
    assert!(shell.stored.is_some());

    shell.contacts_online = false;
    shell.send(Event::Refresh);

    let view = shell.view();
    assert_eq!(titles(&view), ["Ann", "Ben"]);
    assert_eq!(view.source, Some(DataSource::Cache));
    assert_eq!(view.alert, None);
    assert!(!view.loading);
    // One success, then the first try and two retries.
    assert_eq!(shell.fetches, 4);
}

#[test]
fn free_user_going_offline_gets_an_alert() {
    let mut shell = Shell::open(ScreenKind::Friends, false);
    shell.contacts_online = false;

    shell.send(Event::Refresh);

    let view = shell.view();
    assert!(view.rows.is_empty());
    assert!(shell.stored.is_none());
    let alert = view.alert.expect("alert shown");
    assert_eq!(alert.title, "Error");
    assert_eq!(alert.error_code, "NETWORK_ERROR");
}

#[test]
fn cards_outage_is_not_retried() {
    let mut shell = Shell::open(ScreenKind::Cards, true);

    shell.send(Event::Refresh);

    assert_eq!(shell.fetches, 1);
    assert_eq!(shell.view().alert.expect("alert shown").error_code, "SERVER_ERROR");
}

#[test]
fn transfer_screens_split_one_feed() {
    let mut sent = Shell::open(ScreenKind::SentTransfers, false);
    sent.send(Event::Refresh);
    let view = sent.view();
    assert_eq!(view.title, "Sent");
    assert_eq!(titles(&view), ["$12.50 • Lunch"]);
    assert_eq!(view.rows[0].subtitle, "Sent to: Bob on May 17, 2024 at 1:45 PM");

    let mut received = Shell::open(ScreenKind::ReceivedTransfers, false);
    received.send(Event::Refresh);
    let view = received.view();
    assert_eq!(titles(&view), ["$12.50 • Lunch"]);
    assert_eq!(view.rows[0].subtitle, "Received from: Cat on 5/17/24, 1:45 PM");
}
