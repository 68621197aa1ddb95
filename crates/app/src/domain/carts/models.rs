//! Cart Models

use rustc_hash::FxHashMap;

use crate::domain::listings::models::ListingUuid;

/// Quantity per size label for one listing.
pub type SizeQuantities = FxHashMap<String, u32>;

/// A user's cart: listing id to per-size quantities. A listing entry never
/// holds an empty size map and a size entry never holds a zero quantity.
pub type CartData = FxHashMap<ListingUuid, SizeQuantities>;

/// Total number of items across all listings and sizes.
#[must_use]
pub fn item_count(cart: &CartData) -> u32 {
    cart.values()
        .flat_map(SizeQuantities::values)
        .copied()
        .sum()
}

/// Add one unit of `(listing, size)`.
pub fn bump(cart: &mut CartData, listing: ListingUuid, size: &str) {
    let quantity = cart.entry(listing).or_default().entry(size.to_string()).or_insert(0);

    *quantity += 1;
}

/// Set the quantity for `(listing, size)`; zero removes the size entry, and
/// the listing entry once no sizes remain.
pub fn set_quantity(cart: &mut CartData, listing: ListingUuid, size: &str, quantity: u32) {
    if quantity == 0 {
        if let Some(sizes) = cart.get_mut(&listing) {
            sizes.remove(size);

            if sizes.is_empty() {
                cart.remove(&listing);
            }
        }

        return;
    }

    cart.entry(listing).or_default().insert(size.to_string(), quantity);
}
