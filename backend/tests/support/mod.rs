//! Shared harness for the listing integration tests.
//!
//! Services run over the in-memory store with a clock the test can move.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use phongtro::domain::{
    CodeGenerator, ExpiryService, ListingPolicy, ListingStores, PostDraft, PostLifecycleService,
    PostQueryService, SatelliteRetention, UserId, WishlistService,
};
use phongtro::inbound::http::state::{HttpState, HttpStatePorts};
use phongtro::outbound::memory::InMemoryListingStore;

/// Clock that stays put until advanced.
pub struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// 1 May 2024, 03:00 UTC.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0)
        .single()
        .expect("valid start time")
}

/// Store, clock and services wired the way the server wires them.
pub struct Harness {
    pub store: Arc<InMemoryListingStore>,
    pub clock: Arc<SteppingClock>,
    pub queries: PostQueryService,
    pub commands: PostLifecycleService,
    pub expiry: ExpiryService,
    pub wishlist: WishlistService,
}

impl Harness {
    pub fn new(retention: SatelliteRetention) -> Self {
        let store = Arc::new(InMemoryListingStore::new());
        let clock = Arc::new(SteppingClock::starting_at(start_time()));
        let stores = ListingStores::from_single(store.clone());
        let policy = ListingPolicy {
            retention,
            ..ListingPolicy::default()
        };
        Self {
            queries: PostQueryService::new(stores.clone(), policy),
            commands: PostLifecycleService::new(
                stores.clone(),
                CodeGenerator::default(),
                clock.clone(),
                policy,
            ),
            expiry: ExpiryService::new(stores.clone(), clock.clone()),
            wishlist: WishlistService::new(stores),
            store,
            clock,
        }
    }

    /// The same services as HTTP state.
    pub fn http_state(&self) -> HttpState {
        let wishlist = Arc::new(self.wishlist.clone());
        HttpState::new(HttpStatePorts {
            posts: Arc::new(self.queries.clone()),
            post_commands: Arc::new(self.commands.clone()),
            expired_posts: Arc::new(self.expiry.clone()),
            wishlist: wishlist.clone(),
            wishlist_query: wishlist,
        })
    }
}

pub fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

/// A complete draft for a room in Hà Nội.
pub fn draft(title: &str, price_number: f64, area_number: f64) -> PostDraft {
    PostDraft {
        title: title.to_owned(),
        label: "Cho thuê phòng trọ Hà Nội".to_owned(),
        category_code: "CTPT".to_owned(),
        category: Some("Cho thuê phòng trọ".to_owned()),
        province: "Thành phố Hà Nội".to_owned(),
        address: Some("Số 1 Tràng Tiền, Hoàn Kiếm".to_owned()),
        description: Some(serde_json::json!(["Phòng sạch", "Gần chợ"])),
        area_code: None,
        price_code: None,
        price_number,
        area_number,
        images: vec!["https://img.example/1.jpg".to_owned()],
        target: Some("Tất cả".to_owned()),
        expired: None,
    }
}
