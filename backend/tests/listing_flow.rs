//! End-to-end behaviour of the listing services over the in-memory store.

mod support;

use chrono::Duration;
use rstest::{fixture, rstest};

use phongtro::domain::ports::{
    ExpiredPostsQuery, ExpiredPostsRequest, ListPostsRequest, LookupRepository, PostCommand,
    PostQuery, ReportRequest, SatelliteRepository, WishlistCommand, WishlistQuery,
};
use phongtro::domain::{
    ErrorCode, LookupKind, NumericRange, PostFilter, PostId, PostStatus, SatelliteRetention,
    UserSummary, Vote,
};

use support::{Harness, draft, user};

#[fixture]
fn harness() -> Harness {
    Harness::new(SatelliteRetention::Retain)
}

async fn publish(harness: &Harness, title: &str, price: f64, area: f64) -> PostId {
    harness
        .commands
        .create_post(draft(title, price, area), &user("u-1"))
        .await
        .expect("create post")
}

#[rstest]
#[tokio::test]
async fn created_post_is_listed_with_its_relations(harness: Harness) {
    let id = publish(&harness, "Phòng trọ gần hồ", 0.5, 18.0).await;

    let page = harness
        .queries
        .list_posts(ListPostsRequest::default())
        .await
        .expect("list posts");

    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);
    let listing = page.items.first().expect("one listing");
    assert_eq!(listing.post.id, id);
    let attributes = listing.attributes.as_ref().expect("attributes row");
    assert_eq!(attributes.price, "500000 đồng/tháng");
    assert!(attributes.hashtag.starts_with('#'));
    assert_eq!(attributes.hashtag.len(), 7);
    let overview = listing.overview.as_ref().expect("overview row");
    assert_eq!(overview.code, attributes.hashtag);
    assert_eq!(overview.area, "Cho thuê phòng trọ Hà Nội");
    let label = listing.label.as_ref().expect("label lookup");
    assert_eq!(label.code, listing.post.label_code);
    assert_eq!(
        listing.images.as_ref().map(|images| images.urls.len()),
        Some(1)
    );
}

#[rstest]
#[tokio::test]
async fn price_range_filter_is_inclusive(harness: Harness) {
    publish(&harness, "Phòng rẻ", 1.0, 15.0).await;
    publish(&harness, "Phòng vừa", 3.0, 20.0).await;
    publish(&harness, "Phòng đắt", 5.0, 40.0).await;

    let request = ListPostsRequest {
        filter: PostFilter {
            price_number: Some(NumericRange::new(1.0, 3.0).expect("range")),
            ..PostFilter::default()
        },
        sort: Some("priceNumber:asc".parse().expect("sort")),
        ..ListPostsRequest::default()
    };
    let page = harness.queries.list_posts(request).await.expect("list");

    let titles: Vec<&str> = page.items.iter().map(|l| l.post.title.as_str()).collect();
    assert_eq!(titles, vec!["Phòng rẻ", "Phòng vừa"]);
    assert_eq!(page.total, 2);
}

#[rstest]
#[tokio::test]
async fn pages_split_totals(harness: Harness) {
    for index in 0..5 {
        publish(&harness, &format!("Phòng {index}"), 2.0, 20.0).await;
    }

    let request = ListPostsRequest {
        page: Some(3),
        limit: Some(2),
        ..ListPostsRequest::default()
    };
    let page = harness.queries.list_posts(request).await.expect("list");

    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 1);
}

#[rstest]
#[tokio::test]
async fn shared_label_is_stored_once(harness: Harness) {
    let first = publish(&harness, "Phòng A", 2.0, 20.0).await;
    let second = publish(&harness, "Phòng B", 2.5, 22.0).await;

    let a = harness.queries.get_post(&first).await.expect("first");
    let b = harness.queries.get_post(&second).await.expect("second");
    assert_eq!(a.listing.post.label_code, b.listing.post.label_code);

    let labels = LookupRepository::find(
        harness.store.as_ref(),
        LookupKind::Label,
        &[a.listing.post.label_code.clone()],
    )
    .await
    .expect("labels");
    assert_eq!(labels.len(), 1);
    let province = a.province.expect("province lookup");
    assert_eq!(province.value, "Hà Nội");
}

#[rstest]
#[tokio::test]
async fn category_lookup_is_written_with_the_post(harness: Harness) {
    let id = publish(&harness, "Phòng có danh mục", 2.0, 20.0).await;

    let categories = LookupRepository::find(
        harness.store.as_ref(),
        LookupKind::Category,
        &["CTPT".to_owned()],
    )
    .await
    .expect("categories");
    assert_eq!(categories.len(), 1);

    let detail = harness.queries.get_post(&id).await.expect("detail");
    let category = detail.listing.category.expect("category relation");
    assert_eq!(category.code, "CTPT");
    assert_eq!(category.value, "Cho thuê phòng trọ");
}

#[rstest]
#[tokio::test]
async fn detail_embeds_votes_with_voters(harness: Harness) {
    let id = publish(&harness, "Phòng có đánh giá", 2.0, 20.0).await;
    harness
        .store
        .insert_user(UserSummary {
            id: user("u-2"),
            name: "Lan".to_owned(),
            phone: Some("0900000000".to_owned()),
            zalo: None,
            avatar: None,
            role_code: None,
        })
        .expect("seed user");
    harness
        .store
        .insert_vote(Vote {
            post_id: id.clone(),
            user_id: user("u-2"),
            value: 4,
        })
        .expect("seed vote");

    let detail = harness.queries.get_post(&id).await.expect("detail");

    let vote = detail.votes.first().expect("one vote");
    assert_eq!(vote.vote.value, 4);
    assert_eq!(
        vote.user_data.as_ref().map(|u| u.name.as_str()),
        Some("Lan")
    );
    assert!(detail.comments.is_empty());
}

#[rstest]
#[tokio::test]
async fn update_rewrites_satellites_in_place(harness: Harness) {
    let id = publish(&harness, "Phòng cũ", 2.0, 20.0).await;
    let before = harness.queries.get_post(&id).await.expect("before");

    let mut edit = draft("Phòng mới sửa", 5.0, 30.0);
    edit.images = vec![
        "https://img.example/a.jpg".to_owned(),
        "https://img.example/b.jpg".to_owned(),
    ];
    harness.commands.update_post(&id, edit).await.expect("update");

    let after = harness.queries.get_post(&id).await.expect("after");
    assert_eq!(after.listing.post.title, "Phòng mới sửa");
    assert_eq!(after.listing.post.attributes_id, before.listing.post.attributes_id);
    let attributes = after.listing.attributes.expect("attributes");
    assert_eq!(attributes.price, "5 triệu/tháng");
    assert_eq!(
        attributes.hashtag,
        before.listing.attributes.expect("attributes before").hashtag
    );
    assert_eq!(after.listing.images.expect("images").urls.len(), 2);
}

#[rstest]
#[tokio::test]
async fn updating_a_missing_post_is_not_found(harness: Harness) {
    let missing = PostId::new("p-missing").expect("post id");
    let err = harness
        .commands
        .update_post(&missing, draft("Không có", 1.0, 10.0))
        .await
        .expect_err("missing post");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(SatelliteRetention::Retain, 1)]
#[case(SatelliteRetention::Cascade, 0)]
#[tokio::test]
async fn delete_honours_retention(#[case] retention: SatelliteRetention, #[case] kept: usize) {
    let harness = Harness::new(retention);
    let id = publish(&harness, "Phòng sắp xoá", 2.0, 20.0).await;
    let stored = harness.queries.get_post(&id).await.expect("stored");

    harness.commands.delete_post(&id).await.expect("delete");

    let err = harness.queries.get_post(&id).await.expect_err("gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
    let attributes = SatelliteRepository::find_attributes(
        harness.store.as_ref(),
        &[stored.listing.post.attributes_id.clone()],
    )
    .await
    .expect("attributes");
    assert_eq!(attributes.len(), kept);
    let again = harness.commands.delete_post(&id).await.expect_err("second delete");
    assert_eq!(again.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn wishlist_keeps_order_and_rejects_duplicates(harness: Harness) {
    let first = publish(&harness, "Phòng một", 2.0, 20.0).await;
    let second = publish(&harness, "Phòng hai", 3.0, 25.0).await;
    let owner = user("u-9");

    harness.wishlist.add_to_wishlist(&owner, &second).await.expect("add second");
    let wishlist = harness.wishlist.add_to_wishlist(&owner, &first).await.expect("add first");
    assert_eq!(wishlist.post_ids, vec![second.clone(), first.clone()]);

    let err = harness
        .wishlist
        .add_to_wishlist(&owner, &first)
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::AlreadyExists);

    let saved = harness.wishlist.saved_posts(&owner).await.expect("saved");
    let titles: Vec<&str> = saved.iter().map(|l| l.post.title.as_str()).collect();
    assert_eq!(titles, vec!["Phòng hai", "Phòng một"]);

    let remaining = harness
        .wishlist
        .remove_from_wishlist(&owner, &second)
        .await
        .expect("remove");
    assert_eq!(remaining.post_ids, vec![first]);
}

#[rstest]
#[tokio::test]
async fn removing_without_a_wishlist_is_not_found(harness: Harness) {
    let id = publish(&harness, "Phòng lẻ", 2.0, 20.0).await;
    let err = harness
        .wishlist
        .remove_from_wishlist(&user("u-nobody"), &id)
        .await
        .expect_err("no wishlist");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn expired_posts_appear_after_their_lifetime(harness: Harness) {
    let kept = publish(&harness, "Phòng hết hạn", 2.0, 20.0).await;
    let archived = publish(&harness, "Phòng lưu trữ", 2.0, 20.0).await;
    harness
        .store
        .set_status(&archived, PostStatus::Archived)
        .expect("archive");

    let fresh = harness
        .expiry
        .list_expired_posts(ExpiredPostsRequest::default())
        .await
        .expect("fresh");
    assert!(fresh.is_empty());

    harness.clock.advance(Duration::days(11));
    let all = harness
        .expiry
        .list_expired_posts(ExpiredPostsRequest::default())
        .await
        .expect("expired");
    assert_eq!(all.len(), 2);

    let active_only = harness
        .expiry
        .list_expired_posts(ExpiredPostsRequest {
            as_of: None,
            exclude_archived: true,
        })
        .await
        .expect("active only");
    let ids: Vec<&PostId> = active_only.iter().map(|l| &l.post.id).collect();
    assert_eq!(ids, vec![&kept]);
}

#[rstest]
#[tokio::test]
async fn reports_are_recorded_against_existing_posts(harness: Harness) {
    let id = publish(&harness, "Phòng bị báo cáo", 2.0, 20.0).await;

    let report = harness
        .commands
        .report_post(ReportRequest {
            post_id: id.clone(),
            user_id: user("u-3"),
            title: "Sai giá".to_owned(),
            reason: "Giá thực tế cao hơn".to_owned(),
        })
        .await
        .expect("report");

    assert_eq!(report.post_id, id);
    let stored = harness.store.reports().expect("reports");
    assert_eq!(stored.len(), 1);

    let blank = harness
        .commands
        .report_post(ReportRequest {
            post_id: id,
            user_id: user("u-3"),
            title: String::new(),
            reason: "   ".to_owned(),
        })
        .await
        .expect_err("blank reason");
    assert_eq!(blank.code(), ErrorCode::InvalidRequest);
}
