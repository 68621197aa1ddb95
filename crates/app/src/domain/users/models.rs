//! User Models

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<SellerProfile>;

/// Minimal public profile of a user, shown next to their listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerProfile {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}
