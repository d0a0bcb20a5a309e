//! Store façade: per-aggregate data-access traits.
//!
//! Handlers depend only on these traits, never on a concrete database
//! driver. Each trait covers one aggregate so a test can double any of them
//! independently. Every operation takes an owned parameter struct and
//! returns a record, a list, or a [`StoreError`].
//!
//! Cancellation follows the caller: dropping the returned future abandons
//! the operation.

mod admins;
mod app_policy;
mod carts;
mod catalog;
mod dashboard;
mod error;
mod notifications;
mod users;
mod wish_lists;

pub use admins::{Admin, AdminStore, CreateAdminParams};
pub use app_policy::{AppPolicy, AppPolicyStore, CreateAppPolicyParams, UpdateAppPolicyParams};
pub use carts::{
    CreateShoppingCartItemParams, FinishPurchaseParams, ShopOrder, ShoppingCartItem,
    ShoppingCartItemKey, ShoppingCartScope, ShoppingCartStore, UpdateShoppingCartItemParams,
};
pub use catalog::{CatalogStore, ProductItemDetails, ProductSize, Promotion};
pub use dashboard::{DailyRevenue, DashboardStore, EntityCounts, OrderStatusCount};
pub use error::{ConstraintKind, StoreError, StoreResult};
pub use notifications::{
    CreateNotificationParams, Notification, NotificationKey, NotificationStore,
    UpdateNotificationParams,
};
pub use users::{CreateUserParams, ListUsersParams, UpdateUserParams, User, UserStore};
pub use wish_lists::{
    CreateWishListItemParams, UpdateWishListItemParams, WishListItem, WishListItemKey,
    WishListStore,
};

/// Every store trait at once.
///
/// Backends that serve all aggregates (the in-memory store, test doubles)
/// get this for free through the blanket implementation.
pub trait Store:
    UserStore
    + AdminStore
    + AppPolicyStore
    + NotificationStore
    + ShoppingCartStore
    + WishListStore
    + CatalogStore
    + DashboardStore
{
}

impl<T> Store for T where
    T: UserStore
        + AdminStore
        + AppPolicyStore
        + NotificationStore
        + ShoppingCartStore
        + WishListStore
        + CatalogStore
        + DashboardStore
{
}
