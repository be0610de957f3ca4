//! Keyed batch resolution of post relations.
//!
//! Each relation is fetched once per batch with the distinct keys of the
//! posts in hand, indexed by key, and joined back in memory. Keys with no
//! matching row resolve to `None`.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use futures_util::try_join;

use crate::domain::stores::map_store_error;
use crate::domain::{
    CommentView, Error, ListingStores, LookupEntry, LookupKind, Post, PostCard, PostDetail,
    PostListing, UserId, UserSummary, VoteView,
};

fn distinct<T, F>(posts: &[Post], key: F) -> Vec<T>
where
    T: Ord + Clone,
    F: Fn(&Post) -> &T,
{
    posts
        .iter()
        .map(key)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn index_by<K, V, F>(rows: Vec<V>, key: F) -> HashMap<K, V>
where
    K: Eq + Hash,
    F: Fn(&V) -> K,
{
    rows.into_iter().map(|row| (key(&row), row)).collect()
}

/// Resolves foreign-keyed relations for batches of posts.
pub(crate) struct RelationResolver<'a> {
    stores: &'a ListingStores,
}

impl<'a> RelationResolver<'a> {
    pub(crate) fn new(stores: &'a ListingStores) -> Self {
        Self { stores }
    }

    async fn lookups(
        &self,
        kind: LookupKind,
        codes: &[String],
    ) -> Result<HashMap<String, LookupEntry>, Error> {
        if codes.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = self
            .stores
            .lookups
            .find(kind, codes)
            .await
            .map_err(map_store_error)?;
        Ok(index_by(rows, |entry| entry.code.clone()))
    }

    async fn users(&self, ids: &[UserId]) -> Result<HashMap<UserId, UserSummary>, Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = self
            .stores
            .users
            .find_many(ids)
            .await
            .map_err(map_store_error)?;
        Ok(index_by(rows, |user| user.id.clone()))
    }

    /// Attach images, attributes, owner, overview, label and category.
    ///
    /// Output order follows `posts`.
    pub(crate) async fn listings(&self, posts: Vec<Post>) -> Result<Vec<PostListing>, Error> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let image_ids = distinct(&posts, |post| &post.images_id);
        let attribute_ids = distinct(&posts, |post| &post.attributes_id);
        let overview_ids = distinct(&posts, |post| &post.overview_id);
        let user_ids = distinct(&posts, |post| &post.user_id);
        let label_codes = distinct(&posts, |post| &post.label_code);
        let category_codes = distinct(&posts, |post| &post.category_code);

        let satellites = &self.stores.satellites;
        let (images, attributes, overviews, users, labels, categories) = try_join!(
            async {
                satellites
                    .find_images(&image_ids)
                    .await
                    .map(|rows| index_by(rows, |row| row.id.clone()))
                    .map_err(map_store_error)
            },
            async {
                satellites
                    .find_attributes(&attribute_ids)
                    .await
                    .map(|rows| index_by(rows, |row| row.id.clone()))
                    .map_err(map_store_error)
            },
            async {
                satellites
                    .find_overviews(&overview_ids)
                    .await
                    .map(|rows| index_by(rows, |row| row.id.clone()))
                    .map_err(map_store_error)
            },
            self.users(&user_ids),
            self.lookups(LookupKind::Label, &label_codes),
            self.lookups(LookupKind::Category, &category_codes),
        )?;

        Ok(posts
            .into_iter()
            .map(|post| PostListing {
                images: images.get(&post.images_id).cloned(),
                attributes: attributes.get(&post.attributes_id).cloned(),
                user: users.get(&post.user_id).cloned(),
                overview: overviews.get(&post.overview_id).cloned(),
                label: labels.get(&post.label_code).cloned(),
                category: categories.get(&post.category_code).cloned(),
                post,
            })
            .collect())
    }

    /// Attach only images and attributes.
    pub(crate) async fn cards(&self, posts: Vec<Post>) -> Result<Vec<PostCard>, Error> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let image_ids = distinct(&posts, |post| &post.images_id);
        let attribute_ids = distinct(&posts, |post| &post.attributes_id);
        let satellites = &self.stores.satellites;
        let (images, attributes) = try_join!(
            satellites.find_images(&image_ids),
            satellites.find_attributes(&attribute_ids),
        )
        .map_err(map_store_error)?;
        let images = index_by(images, |row| row.id.clone());
        let attributes = index_by(attributes, |row| row.id.clone());

        Ok(posts
            .into_iter()
            .map(|post| {
                let image = images.get(&post.images_id).cloned();
                let attribute = attributes.get(&post.attributes_id).cloned();
                PostCard::new(post, image, attribute)
            })
            .collect())
    }

    /// Everything on the post page: listing relations, province, votes with
    /// voters and comments with commentators.
    pub(crate) async fn detail(&self, post: Post) -> Result<PostDetail, Error> {
        let engagement = &self.stores.engagement;
        let province_codes: Vec<String> = post.province_code.iter().cloned().collect();
        let (votes, comments, provinces) = try_join!(
            async {
                engagement
                    .votes_for(&post.id)
                    .await
                    .map_err(map_store_error)
            },
            async {
                engagement
                    .comments_for(&post.id)
                    .await
                    .map_err(map_store_error)
            },
            self.lookups(LookupKind::Province, &province_codes),
        )?;

        let mut people: BTreeSet<UserId> = votes.iter().map(|vote| vote.user_id.clone()).collect();
        people.extend(comments.iter().map(|comment| comment.commentator_id.clone()));
        let people: Vec<UserId> = people.into_iter().collect();
        let profiles = self.users(&people).await?;

        let province = post
            .province_code
            .as_ref()
            .and_then(|code| provinces.get(code).cloned());
        let mut listings = self.listings(vec![post]).await?;
        let listing = listings
            .pop()
            .ok_or_else(|| Error::internal("relation resolution dropped the post"))?;

        Ok(PostDetail {
            listing,
            province,
            votes: votes
                .into_iter()
                .map(|vote| VoteView {
                    user_data: profiles.get(&vote.user_id).cloned(),
                    vote,
                })
                .collect(),
            comments: comments
                .into_iter()
                .map(|comment| CommentView {
                    commentator: profiles.get(&comment.commentator_id).cloned(),
                    comment,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stores::test_support::StoreMocks;
    use crate::domain::test_fixtures::{
        attribute_for, images_for, overview_for, post_with, user_summary,
    };
    use crate::domain::{Comment, Vote};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn mocks_for(posts: &[Post]) -> StoreMocks {
        let mut mocks = StoreMocks::default();
        let images: Vec<_> = posts.iter().map(images_for).collect();
        let attributes: Vec<_> = posts.iter().map(attribute_for).collect();
        let overviews: Vec<_> = posts.iter().map(overview_for).collect();
        mocks
            .satellites
            .expect_find_images()
            .returning(move |_| Ok(images.clone()));
        mocks
            .satellites
            .expect_find_attributes()
            .returning(move |_| Ok(attributes.clone()));
        mocks
            .satellites
            .expect_find_overviews()
            .returning(move |_| Ok(overviews.clone()));
        mocks
            .users
            .expect_find_many()
            .returning(|ids| Ok(ids.iter().map(|id| user_summary(id.as_str())).collect()));
        mocks
            .lookups
            .expect_find()
            .returning(|kind, codes| {
                Ok(codes
                    .iter()
                    .map(|code| LookupEntry::new(code.clone(), format!("{kind} {code}")))
                    .collect())
            });
        mocks
    }

    #[tokio::test]
    async fn listings_join_relations_in_post_order() {
        let posts = vec![post_with("p-2", |_| {}), post_with("p-1", |_| {})];
        let stores = mocks_for(&posts).into_stores();

        let listings = RelationResolver::new(&stores)
            .listings(posts)
            .await
            .expect("listings");

        let ids: Vec<&str> = listings.iter().map(|l| l.post.id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-1"]);
        let first = &listings[0];
        assert_eq!(first.images.as_ref().map(|i| i.id.as_str()), Some("img-p-2"));
        assert_eq!(first.overview.as_ref().map(|o| o.id.as_str()), Some("ov-p-2"));
        assert_eq!(first.user.as_ref().map(|u| u.id.as_str()), Some("u-1"));
        assert_eq!(first.label.as_ref().map(|l| l.value.as_str()), Some("label OOPN"));
        assert_eq!(
            first.category.as_ref().map(|c| c.value.as_str()),
            Some("category CTPT")
        );
    }

    #[tokio::test]
    async fn dangling_references_resolve_to_none() {
        let posts = vec![post_with("p-1", |post| post.images_id = "gone".to_owned())];
        let mut mocks = StoreMocks::default();
        mocks.satellites.expect_find_images().returning(|_| Ok(Vec::new()));
        mocks.satellites.expect_find_attributes().returning(|_| Ok(Vec::new()));
        mocks.satellites.expect_find_overviews().returning(|_| Ok(Vec::new()));
        mocks.users.expect_find_many().returning(|_| Ok(Vec::new()));
        mocks.lookups.expect_find().returning(|_, _| Ok(Vec::new()));
        let stores = mocks.into_stores();

        let listings = RelationResolver::new(&stores)
            .listings(posts)
            .await
            .expect("listings");

        let listing = &listings[0];
        assert!(listing.images.is_none());
        assert!(listing.attributes.is_none());
        assert!(listing.user.is_none());
        assert!(listing.label.is_none());
    }

    #[tokio::test]
    async fn shared_keys_are_fetched_once() {
        let posts = vec![post_with("p-1", |_| {}), post_with("p-2", |_| {})];
        let mut mocks = mocks_for(&posts);
        mocks.users.checkpoint();
        mocks
            .users
            .expect_find_many()
            .withf(|ids| ids.len() == 1)
            .times(1)
            .returning(|ids| Ok(ids.iter().map(|id| user_summary(id.as_str())).collect()));
        let stores = mocks.into_stores();

        RelationResolver::new(&stores)
            .listings(posts)
            .await
            .expect("listings");
    }

    #[tokio::test]
    async fn empty_batch_touches_no_store() {
        let stores = StoreMocks::default().into_stores();
        let resolver = RelationResolver::new(&stores);

        assert!(resolver.listings(Vec::new()).await.expect("listings").is_empty());
        assert!(resolver.cards(Vec::new()).await.expect("cards").is_empty());
    }

    #[tokio::test]
    async fn cards_carry_images_and_attributes() {
        let posts = vec![post_with("p-1", |_| {})];
        let stores = mocks_for(&posts).into_stores();

        let cards = RelationResolver::new(&stores).cards(posts).await.expect("cards");

        assert_eq!(cards.len(), 1);
        assert!(cards[0].images.is_some());
        assert!(cards[0].attributes.is_some());
    }

    #[tokio::test]
    async fn detail_attaches_engagement_profiles() {
        let post = post_with("p-1", |_| {});
        let mut mocks = mocks_for(std::slice::from_ref(&post));
        let post_id = post.id.clone();
        let voter = UserId::new("u-7").expect("user id");
        let vote = Vote {
            post_id: post_id.clone(),
            user_id: voter.clone(),
            value: 4,
        };
        let comment = Comment {
            id: "c-1".to_owned(),
            post_id: post_id.clone(),
            commentator_id: UserId::new("u-9").expect("user id"),
            content: "Phòng đẹp".to_owned(),
            created_at: Utc::now(),
        };
        mocks
            .engagement
            .expect_votes_for()
            .with(eq(post_id.clone()))
            .return_once(move |_| Ok(vec![vote]));
        mocks
            .engagement
            .expect_comments_for()
            .return_once(move |_| Ok(vec![comment]));
        let stores = mocks.into_stores();

        let detail = RelationResolver::new(&stores).detail(post).await.expect("detail");

        assert_eq!(
            detail.province.as_ref().map(|p| p.value.as_str()),
            Some("province NHON")
        );
        assert_eq!(detail.votes[0].user_data.as_ref().map(|u| &u.id), Some(&voter));
        assert_eq!(
            detail.comments[0].commentator.as_ref().map(|u| u.id.as_str()),
            Some("u-9")
        );
    }
}
