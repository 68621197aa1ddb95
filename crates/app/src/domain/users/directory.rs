//! User directory lookups.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, PgPool, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::StoreError,
    domain::users::models::{SellerProfile, UserUuid},
};

const FETCH_PROFILE_SQL: &str = include_str!("sql/fetch_profile.sql");
const FETCH_PROFILES_SQL: &str = include_str!("sql/fetch_profiles.sql");
const INSERT_USER_SQL: &str = include_str!("sql/insert_user.sql");

/// Read-only resolution of user identities to public profiles.
///
/// A dangling reference resolves to `None` rather than an error; the user
/// table is maintained by the auth subsystem and may lag behind.
#[automock]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a single profile.
    async fn profile(&self, user: UserUuid) -> Result<Option<SellerProfile>, StoreError>;

    /// Resolve a batch of profiles; absent users are simply missing from the
    /// returned map.
    async fn profiles(
        &self,
        users: &[UserUuid],
    ) -> Result<FxHashMap<UserUuid, SellerProfile>, StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a local-development user. Not part of [`UserDirectory`]; the
    /// production user table is written by the auth subsystem.
    ///
    /// # Errors
    ///
    /// Returns an error when the insert fails.
    pub async fn seed_user(&self, profile: &SellerProfile) -> Result<(), StoreError> {
        sqlx::query(INSERT_USER_SQL)
            .bind(profile.uuid.into_uuid())
            .bind(&profile.name)
            .bind(&profile.email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn profile(&self, user: UserUuid) -> Result<Option<SellerProfile>, StoreError> {
        let profile = query_as::<_, SellerProfile>(FETCH_PROFILE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn profiles(
        &self,
        users: &[UserUuid],
    ) -> Result<FxHashMap<UserUuid, SellerProfile>, StoreError> {
        let uuids: Vec<Uuid> = users.iter().copied().map(UserUuid::into_uuid).collect();

        let profiles = query_as::<_, SellerProfile>(FETCH_PROFILES_SQL)
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles
            .into_iter()
            .map(|profile| (profile.uuid, profile))
            .collect())
    }
}

impl<'r> FromRow<'r, PgRow> for SellerProfile {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }
}

/// In-memory directory used by service tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    profiles: FxHashMap<UserUuid, SellerProfile>,
}

impl MemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile, replacing any previous entry for the same user.
    pub fn put(&mut self, profile: SellerProfile) {
        self.profiles.insert(profile.uuid, profile);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn profile(&self, user: UserUuid) -> Result<Option<SellerProfile>, StoreError> {
        Ok(self.profiles.get(&user).cloned())
    }

    async fn profiles(
        &self,
        users: &[UserUuid],
    ) -> Result<FxHashMap<UserUuid, SellerProfile>, StoreError> {
        Ok(users
            .iter()
            .filter_map(|uuid| self.profiles.get(uuid).cloned())
            .map(|profile| (profile.uuid, profile))
            .collect())
    }
}
