//! App Router

use salvo::Router;

use crate::{auth, carts, products, wishlist};

/// The `/api` route tree. Public catalog reads sit outside the auth hoop;
/// everything that mutates or is owner-scoped sits behind it.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("product")
                .push(Router::with_path("list").get(products::list::handler))
                .push(Router::with_path("single").post(products::single::handler))
                .push(Router::with_path("category/{category}").get(products::category::handler))
                .push(Router::with_path("search/{query}").get(products::search::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .push(Router::with_path("add").post(products::add::handler))
                        .push(Router::with_path("my-products").get(products::my_products::handler))
                        .push(Router::with_path("update").post(products::update::handler))
                        .push(Router::with_path("remove").post(products::remove::handler)),
                ),
        )
        .push(
            Router::with_path("cart")
                .hoop(auth::middleware::handler)
                .push(Router::with_path("get").post(carts::get::handler))
                .push(Router::with_path("add").post(carts::add::handler))
                .push(Router::with_path("update").post(carts::update::handler)),
        )
        .push(
            Router::with_path("user/wishlist")
                .hoop(auth::middleware::handler)
                .push(Router::with_path("get").post(wishlist::get::handler))
                .push(Router::with_path("add").post(wishlist::add::handler))
                .push(Router::with_path("remove").post(wishlist::remove::handler)),
        )
}
