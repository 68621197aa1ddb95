//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use smallvec::smallvec;
use uuid::Uuid;

use bazaar_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::MockCartsService,
        listings::{
            MockCatalogService,
            models::{CatalogEntry, Condition, Listing, ListingStatus, ListingUuid},
        },
        users::models::{SellerProfile, UserUuid},
        wishlists::MockWishlistsService,
    },
    media::MockMediaGateway,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn make_listing(uuid: ListingUuid, seller: UserUuid) -> Listing {
    Listing {
        uuid,
        name: "Desk Lamp".to_string(),
        description: "Warm light, small dent".to_string(),
        price: Decimal::new(1500, 2),
        category: "Home & Garden".to_string(),
        sub_category: "Decor".to_string(),
        condition: Condition::Good,
        sizes: smallvec![],
        bestseller: false,
        stock: 1,
        images: vec!["https://img.example/1.jpg".to_string()],
        seller,
        status: ListingStatus::Active,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_entry(uuid: ListingUuid, seller: UserUuid) -> CatalogEntry {
    CatalogEntry {
        listing: make_listing(uuid, seller),
        seller: Some(SellerProfile {
            uuid: seller,
            name: "Test Seller".to_string(),
            email: "seller@example.test".to_string(),
        }),
    }
}

/// Stand-in for the auth middleware: every request runs as [`TEST_USER_UUID`].
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Assemble a [`State`]; unset services are fresh mocks that panic when
/// touched, which keeps every handler test honest about what it calls.
#[derive(Default)]
pub(crate) struct StateBuilder {
    catalog: Option<MockCatalogService>,
    carts: Option<MockCartsService>,
    wishlists: Option<MockWishlistsService>,
    auth: Option<MockAuthService>,
    media: Option<MockMediaGateway>,
}

impl StateBuilder {
    pub(crate) fn catalog(mut self, catalog: MockCatalogService) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub(crate) fn carts(mut self, carts: MockCartsService) -> Self {
        self.carts = Some(carts);
        self
    }

    pub(crate) fn wishlists(mut self, wishlists: MockWishlistsService) -> Self {
        self.wishlists = Some(wishlists);
        self
    }

    pub(crate) fn auth(mut self, auth: MockAuthService) -> Self {
        self.auth = Some(auth);
        self
    }

    pub(crate) fn media(mut self, media: MockMediaGateway) -> Self {
        self.media = Some(media);
        self
    }

    pub(crate) fn build(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            catalog: Arc::new(self.catalog.unwrap_or_default()),
            carts: Arc::new(self.carts.unwrap_or_default()),
            wishlists: Arc::new(self.wishlists.unwrap_or_default()),
            auth: Arc::new(self.auth.unwrap_or_default()),
            media: Arc::new(self.media.unwrap_or_default()),
        }))
    }
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    StateBuilder::default().catalog(catalog).build()
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    StateBuilder::default().auth(auth).build()
}

/// Route wired behind injected state and a pre-authenticated user.
pub(crate) fn authed_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// Route wired behind injected state only.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// Hand-rolled multipart body for exercising the upload handlers.
pub(crate) fn multipart_body(
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "bazaar-test-boundary";

    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (slot, filename, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{slot}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}
