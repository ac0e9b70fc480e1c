use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Contact,
    Card,
    Transfer,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Contact => "contact",
            ItemKind::Card => "card",
            ItemKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

// Redact debug output: card numbers end up in logs otherwise.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    pub number: String,
    pub holder: String,
}

impl PaymentCard {
    pub fn new(number: impl Into<String>, holder: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
        }
    }

    pub fn last_four(&self) -> &str {
        let digits = self.number.trim_end();
        let start = digits
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(idx, _)| idx);
        digits.get(start..).unwrap_or_default()
    }
}

impl fmt::Debug for PaymentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentCard")
            .field("number", &format_args!("**** {}", self.last_four()))
            .field("holder", &self.holder)
            .finish()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Sent,
    Received,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub amount: f64,
    pub currency_code: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub counterparty_name: String,
    pub direction: Direction,
}

/// What the signed-in user is entitled to. Signed-out sessions get the
/// default, which is not premium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub is_premium: bool,
}

/// One record fetched from a remote service. Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Contact(Contact),
    Card(PaymentCard),
    Transfer(Transfer),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Contact(_) => ItemKind::Contact,
            Item::Card(_) => ItemKind::Card,
            Item::Transfer(_) => ItemKind::Transfer,
        }
    }
}

impl From<Contact> for Item {
    fn from(contact: Contact) -> Self {
        Item::Contact(contact)
    }
}

impl From<PaymentCard> for Item {
    fn from(card: PaymentCard) -> Self {
        Item::Card(card)
    }
}

impl From<Transfer> for Item {
    fn from(transfer: Transfer) -> Self {
        Item::Transfer(transfer)
    }
}
