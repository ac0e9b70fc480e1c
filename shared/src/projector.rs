//! Projection of fetched items into display entries.

use serde::{Deserialize, Serialize};

use crate::capabilities::NavigateOperation;
use crate::format::Formatter;
use crate::model::{Contact, Item, PaymentCard, Transfer};
use crate::rules;
use crate::screen::ScreenContext;

pub const TITLE_SEPARATOR: &str = " • ";

/// Presentation-ready row. Keeps the originating item so selection can be
/// routed by kind without capturing the screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub title: String,
    pub subtitle: String,
    pub item: Item,
}

impl DisplayEntry {
    /// Detail screen selecting this entry opens.
    pub fn destination(&self) -> NavigateOperation {
        match &self.item {
            Item::Contact(contact) => NavigateOperation::ShowContact(contact.clone()),
            Item::Card(card) => NavigateOperation::ShowCard(card.clone()),
            Item::Transfer(transfer) => NavigateOperation::ShowTransfer(transfer.clone()),
        }
    }
}

pub fn project(item: Item, ctx: &ScreenContext, formatter: &dyn Formatter) -> DisplayEntry {
    let (title, subtitle) = match &item {
        Item::Contact(contact) => contact_text(contact),
        Item::Card(card) => card_text(card),
        Item::Transfer(transfer) => transfer_text(transfer, ctx, formatter),
    };
    DisplayEntry {
        title,
        subtitle,
        item,
    }
}

pub fn project_all(
    items: Vec<Item>,
    ctx: &ScreenContext,
    formatter: &dyn Formatter,
) -> Vec<DisplayEntry> {
    items
        .into_iter()
        .map(|item| project(item, ctx, formatter))
        .collect()
}

fn contact_text(contact: &Contact) -> (String, String) {
    (contact.name.clone(), contact.phone.clone())
}

fn card_text(card: &PaymentCard) -> (String, String) {
    (card.number.clone(), card.holder.clone())
}

fn transfer_text(
    transfer: &Transfer,
    ctx: &ScreenContext,
    formatter: &dyn Formatter,
) -> (String, String) {
    let amount = formatter.format_currency(transfer.amount, &transfer.currency_code);
    let title = format!("{amount}{TITLE_SEPARATOR}{}", transfer.description);

    let style = rules::date_style(ctx);
    let date = formatter.format_date(transfer.date, style);
    let subtitle = if ctx.long_date_style() {
        format!("Sent to: {} on {date}", transfer.counterparty_name)
    } else {
        format!("Received from: {} on {date}", transfer.counterparty_name)
    };

    (title, subtitle)
}
