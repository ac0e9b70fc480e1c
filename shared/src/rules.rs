//! Per-screen filtering and presentation rules.

use crate::error::ContractViolation;
use crate::format::DateStyle;
use crate::model::{Entitlement, Item};
use crate::screen::ScreenContext;

/// Every fetched item must be of the kind the screen lists.
pub fn check_kinds(items: &[Item], ctx: &ScreenContext) -> Result<(), ContractViolation> {
    let expected = ctx.item_kind();
    match items.iter().find(|item| item.kind() != expected) {
        Some(item) => Err(ContractViolation {
            expected,
            found: item.kind(),
        }),
        None => Ok(()),
    }
}

/// Narrows a fetch result to what the screen shows, keeping fetch order.
/// Only transfer screens narrow; the rest pass items through untouched.
pub fn filter(items: Vec<Item>, ctx: &ScreenContext) -> Vec<Item> {
    let Some(direction) = ctx.kind().direction() else {
        return items;
    };

    items
        .into_iter()
        .filter(|item| match item {
            Item::Transfer(transfer) => transfer.direction == direction,
            Item::Contact(_) | Item::Card(_) => true,
        })
        .collect()
}

pub fn date_style(ctx: &ScreenContext) -> DateStyle {
    if ctx.long_date_style() {
        DateStyle::Long
    } else {
        DateStyle::Short
    }
}

/// Cached data may stand in for a failed fetch only on screens that keep a
/// cache, and only for premium users.
pub fn fallback_permitted(ctx: &ScreenContext, entitlement: Entitlement) -> bool {
    ctx.fallback_to_cache() && entitlement.is_premium
}

/// Whether a successful fetch should be written through to the offline cache.
pub fn should_cache(ctx: &ScreenContext, entitlement: Entitlement) -> bool {
    fallback_permitted(ctx, entitlement)
}
