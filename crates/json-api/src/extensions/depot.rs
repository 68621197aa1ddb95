//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::Depot;

use bazaar_app::domain::users::models::UserUuid;

use crate::state::State;

const USER_UUID_KEY: &str = "bazaar::user_uuid";

/// Typed access to the per-request values stashed in the depot.
pub(crate) trait DepotExt {
    fn shared_state(&self) -> Option<Arc<State>>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    /// The identity established by the auth middleware, if any.
    fn user_uuid(&self) -> Option<UserUuid>;
}

impl DepotExt for Depot {
    fn shared_state(&self) -> Option<Arc<State>> {
        self.obtain::<Arc<State>>().ok().cloned()
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_KEY, user);
    }

    fn user_uuid(&self) -> Option<UserUuid> {
        self.get::<UserUuid>(USER_UUID_KEY).ok().copied()
    }
}
