//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::{
    listings::{
        errors::{CatalogServiceError, ValidationError},
        models::{
            CatalogEntry, Condition, Listing, ListingPatch, ListingStatus, ListingUuid, NewListing,
        },
        store::{CatalogStore, ListingFilter},
    },
    users::{UserDirectory, models::UserUuid},
};

/// Catalog service over a [`CatalogStore`] and a [`UserDirectory`].
#[derive(Clone)]
pub struct StoreCatalogService {
    store: Arc<dyn CatalogStore>,
    users: Arc<dyn UserDirectory>,
}

impl StoreCatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { store, users }
    }

    async fn resolve_sellers(
        &self,
        listings: Vec<Listing>,
    ) -> Result<Vec<CatalogEntry>, CatalogServiceError> {
        let mut sellers: Vec<UserUuid> = listings.iter().map(|listing| listing.seller).collect();

        sellers.sort_unstable();
        sellers.dedup();

        let profiles = self.users.profiles(&sellers).await?;

        Ok(listings
            .into_iter()
            .map(|listing| {
                let seller = profiles.get(&listing.seller).cloned();

                CatalogEntry { listing, seller }
            })
            .collect())
    }
}

fn sort_newest_first(listings: &mut [Listing]) {
    listings.sort_by(|a, b| (b.created_at, b.uuid).cmp(&(a.created_at, a.uuid)));
}

fn validate_text(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }

    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price < Decimal::ZERO {
        return Err(ValidationError::NegativePrice);
    }

    Ok(())
}

fn validate_draft(draft: &NewListing) -> Result<(), ValidationError> {
    if draft.images.is_empty() {
        return Err(ValidationError::NoImages);
    }

    validate_text(&draft.name, ValidationError::EmptyName)?;
    validate_text(&draft.description, ValidationError::EmptyDescription)?;
    validate_text(&draft.category, ValidationError::EmptyCategory)?;
    validate_text(&draft.sub_category, ValidationError::EmptySubCategory)?;
    validate_price(draft.price)?;

    Ok(())
}

/// Case-insensitive substring match over the four text fields.
fn matches_query(listing: &Listing, query: &str) -> bool {
    let query = query.to_lowercase();

    [
        &listing.name,
        &listing.description,
        &listing.category,
        &listing.sub_category,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(&query))
}

#[async_trait]
impl CatalogService for StoreCatalogService {
    async fn create(
        &self,
        requester: UserUuid,
        draft: NewListing,
    ) -> Result<Listing, CatalogServiceError> {
        validate_draft(&draft)?;

        let listing = Listing {
            uuid: ListingUuid::new(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            sub_category: draft.sub_category,
            condition: draft.condition.unwrap_or(Condition::Good),
            sizes: draft.sizes,
            bestseller: draft.bestseller,
            stock: draft.stock.unwrap_or(1),
            images: draft.images,
            seller: requester,
            status: ListingStatus::Active,
            created_at: Timestamp::now(),
        };

        self.store.insert(&listing).await?;

        Ok(listing)
    }

    async fn list(&self) -> Result<Vec<CatalogEntry>, CatalogServiceError> {
        let mut listings = self.store.find(&ListingFilter::active()).await?;

        sort_newest_first(&mut listings);

        self.resolve_sellers(listings).await
    }

    async fn list_by_owner(&self, requester: UserUuid) -> Result<Vec<Listing>, CatalogServiceError> {
        let mut listings = self.store.find(&ListingFilter::owned_by(requester)).await?;

        sort_newest_first(&mut listings);

        Ok(listings)
    }

    async fn list_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<CatalogEntry>, CatalogServiceError> {
        let mut listings = self
            .store
            .find(&ListingFilter::active_in_category(category))
            .await?;

        sort_newest_first(&mut listings);

        self.resolve_sellers(listings).await
    }

    async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, CatalogServiceError> {
        let mut listings = self.store.find(&ListingFilter::active()).await?;

        listings.retain(|listing| matches_query(listing, query));

        sort_newest_first(&mut listings);

        self.resolve_sellers(listings).await
    }

    async fn get(&self, uuid: ListingUuid) -> Result<CatalogEntry, CatalogServiceError> {
        let listing = self
            .store
            .fetch(uuid)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        let seller = self.users.profile(listing.seller).await?;

        Ok(CatalogEntry { listing, seller })
    }

    async fn update(
        &self,
        requester: UserUuid,
        uuid: ListingUuid,
        patch: ListingPatch,
    ) -> Result<Listing, CatalogServiceError> {
        let mut listing = self
            .store
            .fetch(uuid)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        if listing.seller != requester {
            warn!(%uuid, %requester, "rejected update by non-owner");

            return Err(CatalogServiceError::Forbidden);
        }

        if let Some(name) = patch.name {
            validate_text(&name, ValidationError::EmptyName)?;
            listing.name = name;
        }

        if let Some(description) = patch.description {
            validate_text(&description, ValidationError::EmptyDescription)?;
            listing.description = description;
        }

        if let Some(price) = patch.price {
            validate_price(price)?;
            listing.price = price;
        }

        if let Some(category) = patch.category {
            validate_text(&category, ValidationError::EmptyCategory)?;
            listing.category = category;
        }

        if let Some(sub_category) = patch.sub_category {
            validate_text(&sub_category, ValidationError::EmptySubCategory)?;
            listing.sub_category = sub_category;
        }

        if let Some(condition) = patch.condition {
            listing.condition = condition;
        }

        if let Some(sizes) = patch.sizes {
            listing.sizes = sizes;
        }

        if let Some(bestseller) = patch.bestseller {
            listing.bestseller = bestseller;
        }

        if let Some(stock) = patch.stock {
            listing.stock = stock;
        }

        if let Some(status) = patch.status {
            listing.status = status;
        }

        if let Some(images) = patch.images {
            if images.is_empty() {
                return Err(ValidationError::NoImages.into());
            }

            listing.images = images;
        }

        if !self.store.replace(&listing).await? {
            return Err(CatalogServiceError::NotFound);
        }

        Ok(listing)
    }

    async fn delete(
        &self,
        requester: UserUuid,
        uuid: ListingUuid,
    ) -> Result<(), CatalogServiceError> {
        let listing = self
            .store
            .fetch(uuid)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        if listing.seller != requester {
            warn!(%uuid, %requester, "rejected delete by non-owner");

            return Err(CatalogServiceError::Forbidden);
        }

        if !self.store.remove(uuid).await? {
            return Err(CatalogServiceError::NotFound);
        }

        Ok(())
    }
}

/// The listing lifecycle and ownership model.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Create a listing owned by the requester. The seller is always the
    /// authenticated requester, never a payload value.
    async fn create(
        &self,
        requester: UserUuid,
        draft: NewListing,
    ) -> Result<Listing, CatalogServiceError>;

    /// Active listings, newest-first, sellers resolved.
    async fn list(&self) -> Result<Vec<CatalogEntry>, CatalogServiceError>;

    /// Everything the requester owns regardless of status, newest-first.
    async fn list_by_owner(&self, requester: UserUuid)
    -> Result<Vec<Listing>, CatalogServiceError>;

    /// Active listings in one category, newest-first, sellers resolved.
    async fn list_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<CatalogEntry>, CatalogServiceError>;

    /// Active listings whose name, description, category or sub-category
    /// contains the query, case-insensitively.
    async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, CatalogServiceError>;

    /// One listing by id, seller resolved. No status or ownership
    /// restriction: an inactive or foreign listing stays fetchable by id.
    async fn get(&self, uuid: ListingUuid) -> Result<CatalogEntry, CatalogServiceError>;

    /// Apply the present fields of the patch to an owned listing.
    async fn update(
        &self,
        requester: UserUuid,
        uuid: ListingUuid,
        patch: ListingPatch,
    ) -> Result<Listing, CatalogServiceError>;

    /// Permanently remove an owned listing.
    async fn delete(&self, requester: UserUuid, uuid: ListingUuid)
    -> Result<(), CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn draft(name: &str) -> NewListing {
        NewListing {
            name: name.to_string(),
            description: format!("{name} in decent shape"),
            price: Decimal::new(1500, 2),
            category: "Home & Garden".to_string(),
            sub_category: "Decor".to_string(),
            condition: Some(Condition::Good),
            sizes: smallvec![],
            bestseller: false,
            stock: None,
            images: vec!["https://img.example/1.jpg".to_string()],
        }
    }

    #[tokio::test]
    async fn create_assigns_seller_from_requester() -> TestResult {
        let ctx = TestContext::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        assert_eq!(listing.seller, ctx.user);
        assert_eq!(listing.status, ListingStatus::Active);
        assert_eq!(listing.stock, 1, "stock should default to one");

        Ok(())
    }

    #[tokio::test]
    async fn create_without_images_is_rejected() {
        let ctx = TestContext::new();

        let mut empty = draft("Desk Lamp");
        empty.images.clear();

        let result = ctx.catalog.create(ctx.user, empty).await;

        assert!(
            matches!(
                result,
                Err(CatalogServiceError::Validation(ValidationError::NoImages))
            ),
            "expected NoImages, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_defaults_condition_to_good() -> TestResult {
        let ctx = TestContext::new();

        let mut no_condition = draft("Desk Lamp");
        no_condition.condition = None;

        let listing = ctx.catalog.create(ctx.user, no_condition).await?;

        assert_eq!(listing.condition, Condition::Good);

        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_negative_price() {
        let ctx = TestContext::new();

        let mut negative = draft("Desk Lamp");
        negative.price = Decimal::new(-1, 2);

        let result = ctx.catalog.create(ctx.user, negative).await;

        assert!(
            matches!(
                result,
                Err(CatalogServiceError::Validation(
                    ValidationError::NegativePrice
                ))
            ),
            "expected NegativePrice, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let ctx = TestContext::new();

        let mut blank = draft("Desk Lamp");
        blank.name = "   ".to_string();

        let result = ctx.catalog.create(ctx.user, blank).await;

        assert!(
            matches!(
                result,
                Err(CatalogServiceError::Validation(ValidationError::EmptyName))
            ),
            "expected EmptyName, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_returns_newest_first_with_profiles() -> TestResult {
        let ctx = TestContext::new();

        let older = ctx.catalog.create(ctx.user, draft("Older")).await?;
        let newer = ctx.catalog.create(ctx.user, draft("Newer")).await?;

        let entries = ctx.catalog.list().await?;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].listing.uuid, newer.uuid);
        assert_eq!(entries[1].listing.uuid, older.uuid);

        let profile = entries[0].seller.as_ref().expect("profile resolved");

        assert_eq!(profile.uuid, ctx.user);

        Ok(())
    }

    #[tokio::test]
    async fn list_excludes_inactive_listings() -> TestResult {
        let ctx = TestContext::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        ctx.catalog
            .update(
                ctx.user,
                listing.uuid,
                ListingPatch {
                    status: Some(ListingStatus::Inactive),
                    ..ListingPatch::default()
                },
            )
            .await?;

        assert!(ctx.catalog.list().await?.is_empty());

        let owned = ctx.catalog.list_by_owner(ctx.user).await?;

        assert_eq!(owned.len(), 1, "owner still sees the inactive listing");
        assert_eq!(owned[0].status, ListingStatus::Inactive);

        Ok(())
    }

    #[tokio::test]
    async fn list_by_category_filters_and_keeps_active_only() -> TestResult {
        let ctx = TestContext::new();

        ctx.catalog.create(ctx.user, draft("Lamp")).await?;

        let mut other = draft("Jacket");
        other.category = "Clothing".to_string();

        ctx.catalog.create(ctx.user, other).await?;

        let entries = ctx.catalog.list_by_category("Home & Garden").await?;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].listing.name, "Lamp");

        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_across_fields() -> TestResult {
        let ctx = TestContext::new();

        ctx.catalog.create(ctx.user, draft("Vintage Lamp")).await?;

        for query in ["lamp", "LAMP", "decor", "garden", "decent shape"] {
            let entries = ctx.catalog.search(query).await?;

            assert_eq!(entries.len(), 1, "query {query:?} should match");
        }

        assert!(ctx.catalog.search("bicycle").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn search_skips_inactive_listings() -> TestResult {
        let ctx = TestContext::new();

        let listing = ctx.catalog.create(ctx.user, draft("Vintage Lamp")).await?;

        ctx.catalog
            .update(
                ctx.user,
                listing.uuid,
                ListingPatch {
                    status: Some(ListingStatus::Inactive),
                    ..ListingPatch::default()
                },
            )
            .await?;

        assert!(ctx.catalog.search("lamp").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn get_returns_inactive_and_foreign_listings() -> TestResult {
        let ctx = TestContext::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        ctx.catalog
            .update(
                ctx.user,
                listing.uuid,
                ListingPatch {
                    status: Some(ListingStatus::Inactive),
                    ..ListingPatch::default()
                },
            )
            .await?;

        let entry = ctx.catalog.get(listing.uuid).await?;

        assert_eq!(entry.listing.status, ListingStatus::Inactive);

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.catalog.get(ListingUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() -> TestResult {
        let ctx = TestContext::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        let updated = ctx
            .catalog
            .update(
                ctx.user,
                listing.uuid,
                ListingPatch {
                    price: Some(Decimal::new(500, 2)),
                    ..ListingPatch::default()
                },
            )
            .await?;

        assert_eq!(updated.price, Decimal::new(500, 2));
        assert_eq!(updated.name, "Desk Lamp");
        assert_eq!(updated.category, "Home & Garden");
        assert_eq!(updated.images, listing.images);
        assert_eq!(updated.created_at, listing.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_by_non_owner_changes_nothing() -> TestResult {
        let ctx = TestContext::new();
        let intruder = UserUuid::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        let result = ctx
            .catalog
            .update(
                intruder,
                listing.uuid,
                ListingPatch {
                    price: Some(Decimal::ZERO),
                    ..ListingPatch::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let entry = ctx.catalog.get(listing.uuid).await?;

        assert_eq!(entry.listing.price, listing.price, "price must be unchanged");

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_images_wholesale() -> TestResult {
        let ctx = TestContext::new();

        let mut two_images = draft("Desk Lamp");
        two_images.images.push("https://img.example/2.jpg".to_string());

        let listing = ctx.catalog.create(ctx.user, two_images).await?;

        let updated = ctx
            .catalog
            .update(
                ctx.user,
                listing.uuid,
                ListingPatch {
                    images: Some(vec!["https://img.example/3.jpg".to_string()]),
                    ..ListingPatch::default()
                },
            )
            .await?;

        assert_eq!(updated.images, vec!["https://img.example/3.jpg".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn update_with_empty_image_set_is_rejected() -> TestResult {
        let ctx = TestContext::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        let result = ctx
            .catalog
            .update(
                ctx.user,
                listing.uuid,
                ListingPatch {
                    images: Some(vec![]),
                    ..ListingPatch::default()
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CatalogServiceError::Validation(ValidationError::NoImages))
            ),
            "expected NoImages, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_non_owner_leaves_listing_in_place() -> TestResult {
        let ctx = TestContext::new();
        let intruder = UserUuid::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        let result = ctx.catalog.delete(intruder, listing.uuid).await;

        assert!(
            matches!(result, Err(CatalogServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        assert!(ctx.catalog.get(listing.uuid).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn delete_is_permanent() -> TestResult {
        let ctx = TestContext::new();

        let listing = ctx.catalog.create(ctx.user, draft("Desk Lamp")).await?;

        ctx.catalog.delete(ctx.user, listing.uuid).await?;

        let result = ctx.catalog.get(listing.uuid).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound after delete, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn listing_lifecycle_end_to_end() -> TestResult {
        let ctx = TestContext::new();
        let other_user = UserUuid::new();

        let mut desk_lamp = draft("Desk Lamp");
        desk_lamp.price = Decimal::new(1500, 2);

        let listing = ctx.catalog.create(ctx.user, desk_lamp).await?;

        let entry = ctx.catalog.get(listing.uuid).await?;

        assert_eq!(entry.listing.seller, ctx.user);
        assert_eq!(entry.listing.status, ListingStatus::Active);

        // A stranger cannot reprice it.
        let result = ctx
            .catalog
            .update(
                other_user,
                listing.uuid,
                ListingPatch {
                    price: Some(Decimal::new(500, 2)),
                    ..ListingPatch::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogServiceError::Forbidden)));
        assert_eq!(
            ctx.catalog.get(listing.uuid).await?.listing.price,
            Decimal::new(1500, 2)
        );

        // The owner can.
        ctx.catalog
            .update(
                ctx.user,
                listing.uuid,
                ListingPatch {
                    price: Some(Decimal::new(500, 2)),
                    ..ListingPatch::default()
                },
            )
            .await?;

        let entry = ctx.catalog.get(listing.uuid).await?;

        assert_eq!(entry.listing.price, Decimal::new(500, 2));
        assert_eq!(entry.listing.name, "Desk Lamp");

        ctx.catalog.delete(ctx.user, listing.uuid).await?;

        assert!(matches!(
            ctx.catalog.get(listing.uuid).await,
            Err(CatalogServiceError::NotFound)
        ));

        Ok(())
    }
}
