//! Recording test double for every store trait.
//!
//! Expectations name a store method, optionally the exact arguments it must
//! receive (compared as JSON), how many times it may be called, and what it
//! returns. Calls that match no expectation are recorded and fail with
//! `StoreError::Internal`; [`MockStore::verify`] asserts that nothing
//! unexpected happened and every expectation was met exactly.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use bazaar_core::store::{
    Admin, AdminStore, AppPolicy, AppPolicyStore, CatalogStore, CreateAdminParams,
    CreateAppPolicyParams, CreateNotificationParams, CreateShoppingCartItemParams,
    CreateUserParams, CreateWishListItemParams, DailyRevenue, DashboardStore, EntityCounts,
    FinishPurchaseParams, ListUsersParams, Notification, NotificationKey, NotificationStore,
    OrderStatusCount, ProductItemDetails, ProductSize, ShopOrder, ShoppingCartItem,
    ShoppingCartItemKey, ShoppingCartScope, ShoppingCartStore, StoreError, StoreResult,
    UpdateAppPolicyParams, UpdateNotificationParams, UpdateShoppingCartItemParams,
    UpdateUserParams, UpdateWishListItemParams, User, UserStore, WishListItem, WishListItemKey,
    WishListStore,
};
use bazaar_core::{AdminId, AppPolicyId, ProductItemId, SizeId, UserId};

/// One call received by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub args: Value,
}

#[derive(Debug)]
struct Expectation {
    method: &'static str,
    args: Option<Value>,
    times: usize,
    calls: usize,
    result: Result<Value, StoreError>,
}

#[derive(Debug, Default)]
struct Ledger {
    expectations: Vec<Expectation>,
    calls: Vec<Call>,
    unexpected: Vec<Call>,
}

/// Store double that answers from registered expectations.
#[derive(Debug, Default)]
pub struct MockStore {
    ledger: Mutex<Ledger>,
}

/// Builder returned by [`MockStore::expect`].
///
/// Nothing is registered until `returning`, `succeeding` or `failing` is called.
#[must_use = "an expectation is only registered by returning/succeeding/failing"]
pub struct ExpectationBuilder<'a> {
    store: &'a MockStore,
    method: &'static str,
    args: Option<Value>,
    times: usize,
}

impl ExpectationBuilder<'_> {
    /// Require the call's arguments to equal `args`.
    pub fn with<A: Serialize>(mut self, args: &A) -> Self {
        self.args = Some(to_json(args));
        self
    }

    /// Expect exactly `times` calls (default 1).
    pub fn times(mut self, times: usize) -> Self {
        self.times = times;
        self
    }

    /// Answer with `value`.
    pub fn returning<T: Serialize>(self, value: &T) {
        let value = to_json(value);
        self.register(Ok(value));
    }

    /// Answer with `()`, for delete operations.
    pub fn succeeding(self) {
        self.register(Ok(Value::Null));
    }

    /// Answer with `error`.
    pub fn failing(self, error: StoreError) {
        self.register(Err(error));
    }

    fn register(self, result: Result<Value, StoreError>) {
        self.store.lock().expectations.push(Expectation {
            method: self.method,
            args: self.args,
            times: self.times,
            calls: 0,
            result,
        });
    }
}

impl MockStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an expectation for `method`.
    pub const fn expect(&self, method: &'static str) -> ExpectationBuilder<'_> {
        ExpectationBuilder {
            store: self,
            method,
            args: None,
            times: 1,
        }
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls received for `method`.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Number of calls received across all methods.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.lock().calls.len()
    }

    /// Assert that no call went unanswered and every expectation was met.
    ///
    /// # Panics
    ///
    /// Panics describing the first unmet or unexpected call.
    pub fn verify(&self) {
        let ledger = self.lock();
        assert!(
            ledger.unexpected.is_empty(),
            "unexpected store calls: {:?}",
            ledger.unexpected
        );
        for expectation in &ledger.expectations {
            assert_eq!(
                expectation.calls, expectation.times,
                "{} expected {} call(s) with {:?}, got {}",
                expectation.method, expectation.times, expectation.args, expectation.calls
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn call<A: Serialize, R: DeserializeOwned>(
        &self,
        method: &'static str,
        args: &A,
    ) -> StoreResult<R> {
        let args = to_json(args);
        let mut ledger = self.lock();
        ledger.calls.push(Call {
            method,
            args: args.clone(),
        });

        let answer = ledger
            .expectations
            .iter_mut()
            .find(|e| {
                e.method == method
                    && e.calls < e.times
                    && e.args.as_ref().is_none_or(|expected| *expected == args)
            })
            .map(|e| {
                e.calls += 1;
                e.result.clone()
            });

        match answer {
            Some(Ok(value)) => serde_json::from_value(value).map_err(|e| {
                StoreError::Internal(format!("canned result for {method} has wrong shape: {e}"))
            }),
            Some(Err(error)) => Err(error),
            None => {
                ledger.unexpected.push(Call { method, args });
                Err(StoreError::Internal(format!("unexpected call to {method}")))
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| Value::String(format!("<unserializable: {e}>")))
}

#[async_trait]
impl UserStore for MockStore {
    async fn create_user(&self, params: CreateUserParams) -> StoreResult<User> {
        self.call("create_user", &params)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        self.call("get_user", &id)
    }

    async fn get_user_by_username(&self, username: String) -> StoreResult<User> {
        self.call("get_user_by_username", &username)
    }

    async fn update_user(&self, params: UpdateUserParams) -> StoreResult<User> {
        self.call("update_user", &params)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        self.call("delete_user", &id)
    }

    async fn list_users(&self, params: ListUsersParams) -> StoreResult<Vec<User>> {
        self.call("list_users", &params)
    }
}

#[async_trait]
impl AdminStore for MockStore {
    async fn create_admin(&self, params: CreateAdminParams) -> StoreResult<Admin> {
        self.call("create_admin", &params)
    }

    async fn get_admin(&self, id: AdminId) -> StoreResult<Admin> {
        self.call("get_admin", &id)
    }

    async fn get_admin_by_username(&self, username: String) -> StoreResult<Admin> {
        self.call("get_admin_by_username", &username)
    }
}

#[async_trait]
impl AppPolicyStore for MockStore {
    async fn create_app_policy(&self, params: CreateAppPolicyParams) -> StoreResult<AppPolicy> {
        self.call("create_app_policy", &params)
    }

    async fn get_app_policy(&self, id: AppPolicyId) -> StoreResult<AppPolicy> {
        self.call("get_app_policy", &id)
    }

    async fn get_latest_app_policy(&self) -> StoreResult<AppPolicy> {
        self.call("get_latest_app_policy", &())
    }

    async fn update_app_policy(&self, params: UpdateAppPolicyParams) -> StoreResult<AppPolicy> {
        self.call("update_app_policy", &params)
    }

    async fn delete_app_policy(&self, id: AppPolicyId) -> StoreResult<()> {
        self.call("delete_app_policy", &id)
    }
}

#[async_trait]
impl NotificationStore for MockStore {
    async fn create_notification(
        &self,
        params: CreateNotificationParams,
    ) -> StoreResult<Notification> {
        self.call("create_notification", &params)
    }

    async fn get_notification(&self, key: NotificationKey) -> StoreResult<Notification> {
        self.call("get_notification", &key)
    }

    async fn update_notification(
        &self,
        params: UpdateNotificationParams,
    ) -> StoreResult<Notification> {
        self.call("update_notification", &params)
    }

    async fn delete_notification(&self, key: NotificationKey) -> StoreResult<()> {
        self.call("delete_notification", &key)
    }
}

#[async_trait]
impl ShoppingCartStore for MockStore {
    async fn create_shopping_cart_item(
        &self,
        params: CreateShoppingCartItemParams,
    ) -> StoreResult<ShoppingCartItem> {
        self.call("create_shopping_cart_item", &params)
    }

    async fn list_shopping_cart_items(
        &self,
        scope: ShoppingCartScope,
    ) -> StoreResult<Vec<ShoppingCartItem>> {
        self.call("list_shopping_cart_items", &scope)
    }

    async fn update_shopping_cart_item(
        &self,
        params: UpdateShoppingCartItemParams,
    ) -> StoreResult<ShoppingCartItem> {
        self.call("update_shopping_cart_item", &params)
    }

    async fn delete_shopping_cart_item(&self, key: ShoppingCartItemKey) -> StoreResult<()> {
        self.call("delete_shopping_cart_item", &key)
    }

    async fn finish_purchase(&self, params: FinishPurchaseParams) -> StoreResult<ShopOrder> {
        self.call("finish_purchase", &params)
    }
}

#[async_trait]
impl WishListStore for MockStore {
    async fn create_wish_list_item(
        &self,
        params: CreateWishListItemParams,
    ) -> StoreResult<WishListItem> {
        self.call("create_wish_list_item", &params)
    }

    async fn get_wish_list_item(&self, key: WishListItemKey) -> StoreResult<WishListItem> {
        self.call("get_wish_list_item", &key)
    }

    async fn list_wish_list_items_by_user(
        &self,
        user_id: UserId,
    ) -> StoreResult<Vec<WishListItem>> {
        self.call("list_wish_list_items_by_user", &user_id)
    }

    async fn update_wish_list_item(
        &self,
        params: UpdateWishListItemParams,
    ) -> StoreResult<WishListItem> {
        self.call("update_wish_list_item", &params)
    }

    async fn delete_wish_list_item(&self, key: WishListItemKey) -> StoreResult<()> {
        self.call("delete_wish_list_item", &key)
    }
}

#[async_trait]
impl CatalogStore for MockStore {
    async fn list_product_items_by_ids(
        &self,
        ids: Vec<ProductItemId>,
    ) -> StoreResult<Vec<ProductItemDetails>> {
        self.call("list_product_items_by_ids", &ids)
    }

    async fn list_product_sizes_by_ids(&self, ids: Vec<SizeId>) -> StoreResult<Vec<ProductSize>> {
        self.call("list_product_sizes_by_ids", &ids)
    }
}

#[async_trait]
impl DashboardStore for MockStore {
    async fn count_products(&self) -> StoreResult<EntityCounts> {
        self.call("count_products", &())
    }

    async fn count_users(&self) -> StoreResult<EntityCounts> {
        self.call("count_users", &())
    }

    async fn count_orders_by_status(&self) -> StoreResult<Vec<OrderStatusCount>> {
        self.call("count_orders_by_status", &())
    }

    async fn list_completed_daily_revenue(&self, days: u32) -> StoreResult<Vec<DailyRevenue>> {
        self.call("list_completed_daily_revenue", &days)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answers_matching_expectation() {
        let store = MockStore::new();
        store
            .expect("delete_app_policy")
            .with(&AppPolicyId::new(7))
            .failing(StoreError::NotFound);

        let result = store.delete_app_policy(AppPolicyId::new(7)).await;
        assert_eq!(result, Err(StoreError::NotFound));
        store.verify();
    }

    #[tokio::test]
    async fn test_argument_mismatch_is_unexpected() {
        let store = MockStore::new();
        store
            .expect("delete_app_policy")
            .with(&AppPolicyId::new(7))
            .succeeding();

        let result = store.delete_app_policy(AppPolicyId::new(8)).await;
        assert!(matches!(result, Err(StoreError::Internal(_))));
        assert_eq!(store.call_count("delete_app_policy"), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "expected 2 call(s)")]
    async fn test_verify_checks_call_count() {
        let store = MockStore::new();
        store.expect("count_users").times(2).returning(&EntityCounts::default());

        store.count_users().await.unwrap();
        store.verify();
    }
}
