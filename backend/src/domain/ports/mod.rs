//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`UserDirectory`]) are implemented by the
//! outbound adapters. Driving ports (`*Query`, `*Command`) are implemented
//! by the domain services and called by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod engagement_repository;
mod expired_posts_query;
mod lookup_repository;
mod post_command;
mod post_query;
mod post_repository;
mod report_repository;
mod satellite_repository;
mod store_error;
mod user_directory;
mod wishlist_command;
mod wishlist_query;
mod wishlist_repository;

#[cfg(test)]
pub use engagement_repository::MockEngagementRepository;
pub use engagement_repository::{EngagementRepository, FixtureEngagementRepository};
#[cfg(test)]
pub use expired_posts_query::MockExpiredPostsQuery;
pub use expired_posts_query::{ExpiredPostsQuery, ExpiredPostsRequest};
#[cfg(test)]
pub use lookup_repository::MockLookupRepository;
pub use lookup_repository::{FixtureLookupRepository, LookupRepository};
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{PostCommand, ReportRequest};
#[cfg(test)]
pub use post_query::MockPostQuery;
pub use post_query::{ListPostsRequest, PostQuery};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{
    AttributePatch, FixturePostRepository, LookupUpsert, OverviewPatch, PostBundle,
    PostBundlePatch, PostPatch, PostRepository,
};
#[cfg(test)]
pub use report_repository::MockReportRepository;
pub use report_repository::{FixtureReportRepository, ReportRepository};
#[cfg(test)]
pub use satellite_repository::MockSatelliteRepository;
pub use satellite_repository::{FixtureSatelliteRepository, SatelliteRepository};
pub use store_error::StoreError;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory};
#[cfg(test)]
pub use wishlist_command::MockWishlistCommand;
pub use wishlist_command::WishlistCommand;
#[cfg(test)]
pub use wishlist_query::MockWishlistQuery;
pub use wishlist_query::WishlistQuery;
#[cfg(test)]
pub use wishlist_repository::MockWishlistRepository;
pub use wishlist_repository::{FixtureWishlistRepository, WishlistRepository};
