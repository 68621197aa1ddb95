//! PostgreSQL catalog store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::StoreError,
    domain::{
        listings::{
            models::{Listing, ListingUuid},
            store::{CatalogStore, ListingFilter},
        },
        users::models::UserUuid,
    },
};

const INSERT_LISTING_SQL: &str = include_str!("sql/insert_listing.sql");
const FETCH_LISTING_SQL: &str = include_str!("sql/fetch_listing.sql");
const REPLACE_LISTING_SQL: &str = include_str!("sql/replace_listing.sql");
const DELETE_LISTING_SQL: &str = include_str!("sql/delete_listing.sql");
const FIND_LISTINGS_SQL: &str = include_str!("sql/find_listings.sql");

#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn stock_to_i32(stock: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(stock).map_err(|error| sqlx::Error::ColumnDecode {
        index: "stock".to_string(),
        source: Box::new(error),
    })
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn insert(&self, listing: &Listing) -> Result<(), StoreError> {
        query(INSERT_LISTING_SQL)
            .bind(listing.uuid.into_uuid())
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(listing.price)
            .bind(&listing.category)
            .bind(&listing.sub_category)
            .bind(listing.condition.as_str())
            .bind(listing.sizes.as_slice())
            .bind(listing.bestseller)
            .bind(stock_to_i32(listing.stock).map_err(StoreError::from)?)
            .bind(&listing.images)
            .bind(listing.seller.into_uuid())
            .bind(listing.status.as_str())
            .bind(SqlxTimestamp::from(listing.created_at))
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }

    async fn fetch(&self, uuid: ListingUuid) -> Result<Option<Listing>, StoreError> {
        let listing = query_as::<_, Listing>(FETCH_LISTING_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(listing)
    }

    async fn replace(&self, listing: &Listing) -> Result<bool, StoreError> {
        let rows_affected = query(REPLACE_LISTING_SQL)
            .bind(listing.uuid.into_uuid())
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(listing.price)
            .bind(&listing.category)
            .bind(&listing.sub_category)
            .bind(listing.condition.as_str())
            .bind(listing.sizes.as_slice())
            .bind(listing.bestseller)
            .bind(stock_to_i32(listing.stock).map_err(StoreError::from)?)
            .bind(&listing.images)
            .bind(listing.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn remove(&self, uuid: ListingUuid) -> Result<bool, StoreError> {
        let rows_affected = query(DELETE_LISTING_SQL)
            .bind(uuid.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        let listings = query_as::<_, Listing>(FIND_LISTINGS_SQL)
            .bind(filter.status.map(|status| status.as_str()))
            .bind(filter.seller.map(UserUuid::into_uuid))
            .bind(filter.category.as_deref())
            .fetch_all(&self.pool)
            .await?;

        Ok(listings)
    }
}

impl<'r> FromRow<'r, PgRow> for Listing {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let condition: String = row.try_get("condition")?;
        let condition = condition
            .parse()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "condition".to_string(),
                source: Box::new(error),
            })?;

        let status: String = row.try_get("status")?;
        let status = status.parse().map_err(|error| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(error),
        })?;

        let stock: i32 = row.try_get("stock")?;
        let stock = u32::try_from(stock).map_err(|error| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(error),
        })?;

        let sizes: Vec<String> = row.try_get("sizes")?;

        Ok(Self {
            uuid: ListingUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            category: row.try_get("category")?,
            sub_category: row.try_get("sub_category")?,
            condition,
            sizes: sizes.into_iter().collect(),
            bestseller: row.try_get("bestseller")?,
            stock,
            images: row.try_get("images")?,
            seller: UserUuid::from_uuid(row.try_get::<Uuid, _>("seller_uuid")?),
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
