//! Post lifecycle orchestration: create, update, delete and report.
//!
//! Every write validates its input first, derives lookup codes and display
//! strings, and hands the store one bundle to apply atomically.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use rand::Rng;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AttributePatch, LookupUpsert, OverviewPatch, PostBundle, PostBundlePatch, PostCommand,
    PostPatch, ReportRequest,
};
use crate::domain::post_draft::non_blank;
use crate::domain::stores::map_store_error;
use crate::domain::{
    Attribute, CodeGenerator, Error, ImageSet, ListingPolicy, ListingStores, LookupEntry,
    LookupKind, Overview, Post, PostDraft, PostDraftError, PostId, PostStatus, Report,
    STANDARD_BONUS, UserId, format_acreage, format_price, generate_id, overview_date,
    province_name, published_date,
};

/// Codes and display values derived from a draft.
struct Derived {
    label_code: String,
    province_code: String,
    lookups: Vec<LookupUpsert>,
}

/// Lifecycle commands over the relation store.
#[derive(Clone)]
pub struct PostLifecycleService {
    stores: ListingStores,
    codes: CodeGenerator,
    clock: Arc<dyn Clock>,
    policy: ListingPolicy,
}

impl PostLifecycleService {
    /// Create a lifecycle service.
    pub fn new(
        stores: ListingStores,
        codes: CodeGenerator,
        clock: Arc<dyn Clock>,
        policy: ListingPolicy,
    ) -> Self {
        Self {
            stores,
            codes,
            clock,
            policy,
        }
    }

    fn invalid_draft(err: PostDraftError) -> Error {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
        }))
    }

    fn derive(&self, draft: &PostDraft) -> Result<Derived, Error> {
        draft.validate().map_err(Self::invalid_draft)?;

        let label = draft.label.trim();
        let label_code = self
            .codes
            .generate(label)
            .ok_or_else(|| Self::invalid_draft(PostDraftError::Blank { field: "label" }))?;
        let province = province_name(draft.province.trim());
        let province_code = self
            .codes
            .generate(province)
            .ok_or_else(|| Self::invalid_draft(PostDraftError::Blank { field: "province" }))?;
        let category_code = draft.category_code.trim();
        let category =
            non_blank(draft.category.as_deref()).unwrap_or_else(|| category_code.to_owned());

        let lookups = vec![
            LookupUpsert {
                kind: LookupKind::Province,
                entry: LookupEntry::new(province_code.clone(), province),
            },
            LookupUpsert {
                kind: LookupKind::Label,
                entry: LookupEntry::new(label_code.clone(), label),
            },
            LookupUpsert {
                kind: LookupKind::Category,
                entry: LookupEntry::new(category_code, category),
            },
        ];
        Ok(Derived {
            label_code,
            province_code,
            lookups,
        })
    }

    fn hashtag() -> String {
        format!("#{:06}", rand::thread_rng().gen_range(0..1_000_000))
    }

    fn expiry(&self, draft: &PostDraft, now: DateTime<Utc>) -> DateTime<Utc> {
        draft
            .expired
            .unwrap_or_else(|| now + Duration::days(i64::from(self.policy.post_lifetime_days)))
    }

    fn build_bundle(
        &self,
        draft: PostDraft,
        owner: &UserId,
        derived: Derived,
        now: DateTime<Utc>,
    ) -> PostBundle {
        let post_id = PostId::random();
        let hashtag = Self::hashtag();
        let expired = self.expiry(&draft, now);
        let attribute = Attribute {
            id: generate_id(),
            price: format_price(draft.price_number),
            acreage: format_acreage(draft.area_number),
            published: published_date(now),
            hashtag: hashtag.clone(),
        };
        let images = ImageSet {
            id: generate_id(),
            urls: draft.images.clone(),
        };
        let overview = Overview {
            id: generate_id(),
            code: hashtag,
            area: draft.label.trim().to_owned(),
            kind: non_blank(draft.category.as_deref()),
            target: non_blank(draft.target.as_deref()),
            bonus: STANDARD_BONUS.to_owned(),
            created: overview_date(now),
            expired: overview_date(expired),
        };
        let post = Post {
            id: post_id,
            title: draft.title.trim().to_owned(),
            star: 0,
            address: draft.address_text(),
            description: draft.description_text(),
            label_code: derived.label_code,
            category_code: draft.category_code.trim().to_owned(),
            province_code: Some(derived.province_code),
            area_code: non_blank(draft.area_code.as_deref()),
            price_code: non_blank(draft.price_code.as_deref()),
            price_number: draft.price_number,
            area_number: draft.area_number,
            attributes_id: attribute.id.clone(),
            images_id: images.id.clone(),
            overview_id: overview.id.clone(),
            user_id: owner.clone(),
            expired: Some(expired),
            status: PostStatus::Active,
            created_at: now,
            updated_at: now,
        };
        PostBundle {
            post,
            attribute,
            images,
            overview,
            lookups: derived.lookups,
        }
    }

    fn build_patch(draft: PostDraft, derived: Derived, now: DateTime<Utc>) -> PostBundlePatch {
        PostBundlePatch {
            post: PostPatch {
                title: draft.title.trim().to_owned(),
                label_code: derived.label_code,
                address: draft.address_text(),
                category_code: draft.category_code.trim().to_owned(),
                description: draft.description_text(),
                area_code: non_blank(draft.area_code.as_deref()),
                price_code: non_blank(draft.price_code.as_deref()),
                province_code: Some(derived.province_code),
                price_number: draft.price_number,
                area_number: draft.area_number,
                updated_at: now,
            },
            attribute: AttributePatch {
                price: format_price(draft.price_number),
                acreage: format_acreage(draft.area_number),
            },
            overview: OverviewPatch {
                area: draft.label.trim().to_owned(),
                kind: non_blank(draft.category.as_deref()),
                target: non_blank(draft.target.as_deref()),
            },
            image_urls: draft.images,
            lookups: derived.lookups,
        }
    }
}

#[async_trait]
impl PostCommand for PostLifecycleService {
    async fn create_post(&self, draft: PostDraft, user_id: &UserId) -> Result<PostId, Error> {
        let derived = self.derive(&draft)?;
        let bundle = self.build_bundle(draft, user_id, derived, self.clock.utc());
        self.stores
            .posts
            .create(&bundle)
            .await
            .map_err(map_store_error)?;
        info!(post_id = %bundle.post.id, user_id = %user_id, "post created");
        Ok(bundle.post.id)
    }

    async fn update_post(&self, post_id: &PostId, draft: PostDraft) -> Result<(), Error> {
        let derived = self.derive(&draft)?;
        let stored = self
            .stores
            .posts
            .find_one(post_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("post {post_id} not found")))?;

        let patch = Self::build_patch(draft, derived, self.clock.utc());
        let updated = self
            .stores
            .posts
            .update(&stored.linkage(), &patch)
            .await
            .map_err(map_store_error)?;
        if updated == 0 {
            return Err(Error::not_found(format!("post {post_id} not found")));
        }
        info!(post_id = %post_id, "post updated");
        Ok(())
    }

    async fn delete_post(&self, post_id: &PostId) -> Result<(), Error> {
        let removed = self
            .stores
            .posts
            .delete_one(post_id, self.policy.retention)
            .await
            .map_err(map_store_error)?;
        if removed == 0 {
            return Err(Error::not_found(format!("post {post_id} not found")));
        }
        info!(post_id = %post_id, retention = %self.policy.retention, "post deleted");
        Ok(())
    }

    async fn report_post(&self, request: ReportRequest) -> Result<Report, Error> {
        let title = request.title.trim();
        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(Error::invalid_request("reason must not be empty")
                .with_details(json!({ "field": "reason" })));
        }

        let exists = self
            .stores
            .posts
            .find_one(&request.post_id)
            .await
            .map_err(map_store_error)?
            .is_some();
        if !exists {
            return Err(Error::not_found(format!(
                "post {} not found",
                request.post_id
            )));
        }

        let report = Report {
            id: generate_id(),
            post_id: request.post_id.clone(),
            user_id: request.user_id.clone(),
            title: title.to_owned(),
            reason: reason.to_owned(),
            created_at: self.clock.utc(),
        };
        self.stores
            .reports
            .insert(&report)
            .await
            .map_err(map_store_error)?;
        info!(post_id = %report.post_id, report_id = %report.id, "post reported");
        Ok(report)
    }
}

#[cfg(test)]
#[path = "post_lifecycle_service_tests.rs"]
mod tests;
