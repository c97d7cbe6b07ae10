pub mod ability;
pub mod featured_works;
pub mod member_classifier;
pub mod membership_resolver;
pub mod user_directory;

pub use ability::{Ability, AbilityTarget, Action, PermissionSet};
pub use featured_works::{FeaturedWorkStore, InMemoryFeaturedWorks};
pub use member_classifier::MemberClassifier;
pub use membership_resolver::MembershipResolver;
pub use user_directory::{InMemoryUsers, UserDirectory};
