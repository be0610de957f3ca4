//! Shared builders for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Attribute, ImageSet, Overview, Post, PostId, PostStatus, STANDARD_BONUS, UserId, UserSummary,
};

/// Fixed instant used as "now" across service tests.
pub(crate) fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

pub(crate) fn post_id(raw: &str) -> PostId {
    PostId::new(raw).expect("fixture post id")
}

pub(crate) fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id")
}

/// A post whose satellite ids derive from its own id, tweaked by `mutate`.
pub(crate) fn post_with(id: &str, mutate: impl FnOnce(&mut Post)) -> Post {
    let created = fixture_now();
    let mut post = Post {
        id: post_id(id),
        title: format!("Phòng {id}"),
        star: 0,
        address: Some("12 Nguyễn Trãi".to_owned()),
        description: Some("[\"Thoáng mát\"]".to_owned()),
        label_code: "OOPN".to_owned(),
        category_code: "CTPT".to_owned(),
        province_code: Some("NHON".to_owned()),
        area_code: None,
        price_code: None,
        price_number: 2.5,
        area_number: 20.0,
        attributes_id: format!("attr-{id}"),
        images_id: format!("img-{id}"),
        overview_id: format!("ov-{id}"),
        user_id: user_id("u-1"),
        expired: None,
        status: PostStatus::Active,
        created_at: created,
        updated_at: created,
    };
    mutate(&mut post);
    post
}

pub(crate) fn attribute_for(post: &Post) -> Attribute {
    Attribute {
        id: post.attributes_id.clone(),
        price: "2.5 triệu/tháng".to_owned(),
        acreage: "20 m2".to_owned(),
        published: "01/05/2024".to_owned(),
        hashtag: "#123456".to_owned(),
    }
}

pub(crate) fn images_for(post: &Post) -> ImageSet {
    ImageSet {
        id: post.images_id.clone(),
        urls: vec![format!("https://cdn.example/{}.jpg", post.id)],
    }
}

pub(crate) fn overview_for(post: &Post) -> Overview {
    Overview {
        id: post.overview_id.clone(),
        code: "#123456".to_owned(),
        area: "Cho thuê phòng trọ Hà Nội".to_owned(),
        kind: Some("Phòng trọ".to_owned()),
        target: None,
        bonus: STANDARD_BONUS.to_owned(),
        created: "Thứ 4, 10:00 1/5/2024".to_owned(),
        expired: "Thứ 7, 10:00 11/5/2024".to_owned(),
    }
}

pub(crate) fn user_summary(raw: &str) -> UserSummary {
    UserSummary {
        id: user_id(raw),
        name: format!("User {raw}"),
        phone: Some("0900000000".to_owned()),
        zalo: None,
        avatar: None,
        role_code: Some("R3".to_owned()),
    }
}
