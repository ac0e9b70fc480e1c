use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capabilities::{FetchResult, StoreResult};
use crate::model::Entitlement;
use crate::screen::ScreenConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    /// Fixes the screen this core drives. Only the first one is accepted.
    ScreenOpened {
        config: ScreenConfig,
        utc_offset_minutes: i32,
    },
    SessionChanged(Entitlement),

    Appear,
    Refresh,
    Select {
        index: usize,
    },
    PrimaryActionTapped,
    AlertDismissed,

    // Shell responses. `cycle` ties them to the refresh that asked.
    #[serde(skip)]
    Fetched {
        cycle: Uuid,
        result: FetchResult,
    },
    #[serde(skip)]
    CacheLoaded {
        cycle: Uuid,
        result: StoreResult,
    },
    #[serde(skip)]
    CacheSaved(StoreResult),
}

impl Event {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScreenOpened { .. } => "screen_opened",
            Self::SessionChanged(_) => "session_changed",
            Self::Appear => "appear",
            Self::Refresh => "refresh",
            Self::Select { .. } => "select",
            Self::PrimaryActionTapped => "primary_action_tapped",
            Self::AlertDismissed => "alert_dismissed",
            Self::Fetched { .. } => "fetched",
            Self::CacheLoaded { .. } => "cache_loaded",
            Self::CacheSaved(_) => "cache_saved",
        }
    }

    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::Refresh | Self::Select { .. } | Self::PrimaryActionTapped | Self::AlertDismissed
        )
    }
}
