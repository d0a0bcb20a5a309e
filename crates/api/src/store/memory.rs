//! In-memory implementation of every store trait.
//!
//! All tables live behind one `RwLock`, so each operation (checkout
//! included) sees and leaves a consistent snapshot. Integrity rules follow
//! the relational schema: foreign keys are checked on write, natural keys
//! are unique, and owner-scoped rows are invisible to other users.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::instrument;

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
use bazaar_core::{
    AddressId, AdminId, AppPolicyId, Money, OrderId, OrderStatusId, PaymentTypeId,
    ProductItemId, ShippingMethodId, ShoppingCartId, ShoppingCartItemId, SizeId, UserId,
    WishListId, WishListItemId,
};

use super::catalog::{COMPLETED_STATUS, CatalogSeed};

/// Monotonic ID counters, one per table.
#[derive(Debug, Default)]
struct Sequences {
    user: i64,
    admin: i64,
    app_policy: i64,
    shopping_cart: i64,
    shopping_cart_item: i64,
    wish_list: i64,
    wish_list_item: i64,
    order: i64,
    address: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Default)]
struct Tables {
    seq: Sequences,
    users: BTreeMap<UserId, User>,
    admins: BTreeMap<AdminId, Admin>,
    app_policies: BTreeMap<AppPolicyId, AppPolicy>,
    notifications: BTreeMap<(UserId, String), Notification>,
    shopping_carts: HashMap<ShoppingCartId, UserId>,
    shopping_cart_items: BTreeMap<ShoppingCartItemId, ShoppingCartItem>,
    wish_lists: HashMap<WishListId, UserId>,
    wish_list_items: BTreeMap<WishListItemId, WishListItem>,
    orders: BTreeMap<OrderId, ShopOrder>,
    addresses: HashMap<AddressId, UserId>,
    products: BTreeMap<ProductItemId, ProductItemDetails>,
    sizes: BTreeMap<SizeId, ProductSize>,
    payment_types: HashSet<PaymentTypeId>,
    shipping_methods: HashSet<ShippingMethodId>,
    order_statuses: BTreeMap<OrderStatusId, String>,
}

impl Tables {
    fn owns_cart(&self, user_id: UserId, cart_id: ShoppingCartId) -> bool {
        self.shopping_carts.get(&cart_id) == Some(&user_id)
    }

    fn owns_wish_list(&self, user_id: UserId, wish_list_id: WishListId) -> bool {
        self.wish_lists.get(&wish_list_id) == Some(&user_id)
    }

    fn check_product(&self, id: ProductItemId) -> StoreResult<()> {
        if self.products.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::foreign_key(format!("product item {id} does not exist")))
        }
    }

    fn check_size(&self, id: SizeId) -> StoreResult<()> {
        if self.sizes.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::foreign_key(format!("size {id} does not exist")))
        }
    }

    fn check_admin(&self, id: AdminId) -> StoreResult<()> {
        if self.admins.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::foreign_key(format!("admin {id} does not exist")))
        }
    }

    fn check_user_unique(
        &self,
        username: &str,
        email: &str,
        except: Option<UserId>,
    ) -> StoreResult<()> {
        let others = self.users.values().filter(|u| Some(u.id) != except);
        for user in others {
            if user.username == username {
                return Err(StoreError::unique("username is already taken"));
            }
            if user.email.as_str() == email {
                return Err(StoreError::unique("email is already registered"));
            }
        }
        Ok(())
    }

    fn check_cart_line_unique(
        &self,
        cart_id: ShoppingCartId,
        product_item_id: ProductItemId,
        size_id: SizeId,
        except: Option<ShoppingCartItemId>,
    ) -> StoreResult<()> {
        let duplicate = self.shopping_cart_items.values().any(|item| {
            Some(item.id) != except
                && item.shopping_cart_id == cart_id
                && item.product_item_id == product_item_id
                && item.size_id == size_id
        });
        if duplicate {
            return Err(StoreError::unique("item is already in the shopping cart"));
        }
        Ok(())
    }

    fn check_wish_line_unique(
        &self,
        wish_list_id: WishListId,
        product_item_id: ProductItemId,
        except: Option<WishListItemId>,
    ) -> StoreResult<()> {
        let duplicate = self.wish_list_items.values().any(|item| {
            Some(item.id) != except
                && item.wish_list_id == wish_list_id
                && item.product_item_id == product_item_id
        });
        if duplicate {
            return Err(StoreError::unique("product is already on the wish list"));
        }
        Ok(())
    }

    fn cart_item_mut(&mut self, key: ShoppingCartItemKey) -> StoreResult<&mut ShoppingCartItem> {
        if !self.owns_cart(key.user_id, key.shopping_cart_id) {
            return Err(StoreError::NotFound);
        }
        self.shopping_cart_items
            .get_mut(&key.id)
            .filter(|item| item.shopping_cart_id == key.shopping_cart_id)
            .ok_or(StoreError::NotFound)
    }

    fn wish_list_item(&self, key: WishListItemKey) -> StoreResult<&WishListItem> {
        if !self.owns_wish_list(key.user_id, key.wish_list_id) {
            return Err(StoreError::NotFound);
        }
        self.wish_list_items
            .get(&key.id)
            .filter(|item| item.wish_list_id == key.wish_list_id)
            .ok_or(StoreError::NotFound)
    }
}

/// Store backend that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with catalog and reference rows.
    #[must_use]
    pub fn with_catalog(seed: CatalogSeed) -> Self {
        let tables = Tables {
            products: seed.products.into_iter().map(|p| (p.id, p)).collect(),
            sizes: seed.sizes.into_iter().map(|s| (s.id, s)).collect(),
            payment_types: seed.payment_types.into_iter().collect(),
            shipping_methods: seed.shipping_methods.into_iter().collect(),
            order_statuses: seed.order_statuses.into_iter().collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Record a shipping address for a user.
    ///
    /// # Errors
    ///
    /// Returns a foreign-key error if the user does not exist.
    pub async fn add_address(&self, user_id: UserId) -> StoreResult<AddressId> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::foreign_key(format!("user {user_id} does not exist")));
        }
        let id = AddressId::new(next(&mut tables.seq.address));
        tables.addresses.insert(id, user_id);
        Ok(id)
    }

    /// Block or unblock a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub async fn set_user_blocked(&self, user_id: UserId, blocked: bool) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        user.is_blocked = blocked;
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    #[instrument(skip(self, params), fields(username = %params.username))]
    async fn create_user(&self, params: CreateUserParams) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        tables.check_user_unique(&params.username, params.email.as_str(), None)?;

        let id = UserId::new(next(&mut tables.seq.user));
        let shopping_cart_id = ShoppingCartId::new(next(&mut tables.seq.shopping_cart));
        let wish_list_id = WishListId::new(next(&mut tables.seq.wish_list));
        let now = Utc::now();

        let user = User {
            id,
            username: params.username,
            email: params.email,
            telephone: params.telephone,
            hashed_password: params.hashed_password,
            is_blocked: false,
            is_email_verified: false,
            shopping_cart_id,
            wish_list_id,
            created_at: now,
            updated_at: now,
        };

        tables.shopping_carts.insert(shopping_cart_id, id);
        tables.wish_lists.insert(wish_list_id, id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_user_by_username(&self, username: String) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self, params), fields(user_id = %params.id))]
    async fn update_user(&self, params: UpdateUserParams) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let current = tables.users.get(&params.id).ok_or(StoreError::NotFound)?;

        let username = params.username.unwrap_or_else(|| current.username.clone());
        let email = params.email.unwrap_or_else(|| current.email.clone());
        tables.check_user_unique(&username, email.as_str(), Some(params.id))?;

        let user = tables.users.get_mut(&params.id).ok_or(StoreError::NotFound)?;
        user.username = username;
        user.email = email;
        if let Some(telephone) = params.telephone {
            user.telephone = Some(telephone);
        }
        if let Some(hashed_password) = params.hashed_password {
            user.hashed_password = hashed_password;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables.users.remove(&id).ok_or(StoreError::NotFound)?;

        tables.shopping_carts.remove(&user.shopping_cart_id);
        tables
            .shopping_cart_items
            .retain(|_, item| item.shopping_cart_id != user.shopping_cart_id);
        tables.wish_lists.remove(&user.wish_list_id);
        tables
            .wish_list_items
            .retain(|_, item| item.wish_list_id != user.wish_list_id);
        tables.notifications.retain(|(owner, _), _| *owner != id);
        tables.addresses.retain(|_, owner| *owner != id);
        Ok(())
    }

    async fn list_users(&self, params: ListUsersParams) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(params.offset).unwrap_or(0);
        let limit = usize::try_from(params.limit).unwrap_or(0);
        Ok(tables
            .users
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    #[instrument(skip(self, params), fields(username = %params.username))]
    async fn create_admin(&self, params: CreateAdminParams) -> StoreResult<Admin> {
        let mut tables = self.tables.write().await;
        for admin in tables.admins.values() {
            if admin.username == params.username {
                return Err(StoreError::unique("admin username is already taken"));
            }
            if admin.email == params.email {
                return Err(StoreError::unique("admin email is already registered"));
            }
        }

        let admin = Admin {
            id: AdminId::new(next(&mut tables.seq.admin)),
            username: params.username,
            email: params.email,
            hashed_password: params.hashed_password,
            admin_type: params.admin_type,
            active: true,
            created_at: Utc::now(),
        };
        tables.admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn get_admin(&self, id: AdminId) -> StoreResult<Admin> {
        let tables = self.tables.read().await;
        tables.admins.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_admin_by_username(&self, username: String) -> StoreResult<Admin> {
        let tables = self.tables.read().await;
        tables
            .admins
            .values()
            .find(|a| a.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl AppPolicyStore for MemoryStore {
    #[instrument(skip(self, params), fields(admin_id = %params.admin_id))]
    async fn create_app_policy(&self, params: CreateAppPolicyParams) -> StoreResult<AppPolicy> {
        let mut tables = self.tables.write().await;
        tables.check_admin(params.admin_id)?;

        let policy = AppPolicy {
            id: AppPolicyId::new(next(&mut tables.seq.app_policy)),
            policy: params.policy,
            created_by: params.admin_id,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.app_policies.insert(policy.id, policy.clone());
        Ok(policy)
    }

    async fn get_app_policy(&self, id: AppPolicyId) -> StoreResult<AppPolicy> {
        let tables = self.tables.read().await;
        tables.app_policies.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_latest_app_policy(&self) -> StoreResult<AppPolicy> {
        let tables = self.tables.read().await;
        tables
            .app_policies
            .values()
            .next_back()
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self, params), fields(policy_id = %params.id))]
    async fn update_app_policy(&self, params: UpdateAppPolicyParams) -> StoreResult<AppPolicy> {
        let mut tables = self.tables.write().await;
        tables.check_admin(params.admin_id)?;

        let policy = tables
            .app_policies
            .get_mut(&params.id)
            .ok_or(StoreError::NotFound)?;
        if let Some(text) = params.policy {
            policy.policy = text;
        }
        policy.updated_by = Some(params.admin_id);
        policy.updated_at = Some(Utc::now());
        Ok(policy.clone())
    }

    #[instrument(skip(self))]
    async fn delete_app_policy(&self, id: AppPolicyId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .app_policies
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    async fn create_notification(
        &self,
        params: CreateNotificationParams,
    ) -> StoreResult<Notification> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&params.user_id) {
            return Err(StoreError::foreign_key(format!(
                "user {} does not exist",
                params.user_id
            )));
        }

        let key = (params.user_id, params.device_id.clone());
        if tables.notifications.contains_key(&key) {
            return Err(StoreError::unique("device is already registered"));
        }

        let notification = Notification {
            user_id: params.user_id,
            device_id: params.device_id,
            enabled: params.enabled,
            order_updates: params.order_updates,
            promotions: params.promotions,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.notifications.insert(key, notification.clone());
        Ok(notification)
    }

    async fn get_notification(&self, key: NotificationKey) -> StoreResult<Notification> {
        let tables = self.tables.read().await;
        tables
            .notifications
            .get(&(key.user_id, key.device_id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_notification(
        &self,
        params: UpdateNotificationParams,
    ) -> StoreResult<Notification> {
        let mut tables = self.tables.write().await;
        let notification = tables
            .notifications
            .get_mut(&(params.user_id, params.device_id))
            .ok_or(StoreError::NotFound)?;

        if let Some(enabled) = params.enabled {
            notification.enabled = enabled;
        }
        if let Some(order_updates) = params.order_updates {
            notification.order_updates = order_updates;
        }
        if let Some(promotions) = params.promotions {
            notification.promotions = promotions;
        }
        notification.updated_at = Some(Utc::now());
        Ok(notification.clone())
    }

    async fn delete_notification(&self, key: NotificationKey) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .notifications
            .remove(&(key.user_id, key.device_id))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl ShoppingCartStore for MemoryStore {
    #[instrument(skip(self))]
    async fn create_shopping_cart_item(
        &self,
        params: CreateShoppingCartItemParams,
    ) -> StoreResult<ShoppingCartItem> {
        let mut tables = self.tables.write().await;
        if !tables.owns_cart(params.user_id, params.shopping_cart_id) {
            return Err(StoreError::NotFound);
        }
        tables.check_product(params.product_item_id)?;
        tables.check_size(params.size_id)?;
        tables.check_cart_line_unique(
            params.shopping_cart_id,
            params.product_item_id,
            params.size_id,
            None,
        )?;

        let item = ShoppingCartItem {
            id: ShoppingCartItemId::new(next(&mut tables.seq.shopping_cart_item)),
            shopping_cart_id: params.shopping_cart_id,
            product_item_id: params.product_item_id,
            size_id: params.size_id,
            qty: params.qty,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.shopping_cart_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn list_shopping_cart_items(
        &self,
        scope: ShoppingCartScope,
    ) -> StoreResult<Vec<ShoppingCartItem>> {
        let tables = self.tables.read().await;
        if !tables.owns_cart(scope.user_id, scope.shopping_cart_id) {
            return Err(StoreError::NotFound);
        }
        Ok(tables
            .shopping_cart_items
            .values()
            .filter(|item| item.shopping_cart_id == scope.shopping_cart_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn update_shopping_cart_item(
        &self,
        params: UpdateShoppingCartItemParams,
    ) -> StoreResult<ShoppingCartItem> {
        let mut tables = self.tables.write().await;
        if let Some(product_item_id) = params.product_item_id {
            tables.check_product(product_item_id)?;
        }
        if let Some(size_id) = params.size_id {
            tables.check_size(size_id)?;
        }

        let key = ShoppingCartItemKey {
            user_id: params.user_id,
            shopping_cart_id: params.shopping_cart_id,
            id: params.id,
        };
        let current = tables.cart_item_mut(key)?;
        let product_item_id = params.product_item_id.unwrap_or(current.product_item_id);
        let size_id = params.size_id.unwrap_or(current.size_id);
        tables.check_cart_line_unique(
            params.shopping_cart_id,
            product_item_id,
            size_id,
            Some(params.id),
        )?;

        let item = tables.cart_item_mut(key)?;
        item.product_item_id = product_item_id;
        item.size_id = size_id;
        if let Some(qty) = params.qty {
            item.qty = qty;
        }
        item.updated_at = Some(Utc::now());
        Ok(item.clone())
    }

    #[instrument(skip(self))]
    async fn delete_shopping_cart_item(&self, key: ShoppingCartItemKey) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.cart_item_mut(key)?;
        tables.shopping_cart_items.remove(&key.id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn finish_purchase(&self, params: FinishPurchaseParams) -> StoreResult<ShopOrder> {
        let mut tables = self.tables.write().await;
        if !tables.owns_cart(params.user_id, params.shopping_cart_id) {
            return Err(StoreError::NotFound);
        }
        if tables.addresses.get(&params.user_address_id) != Some(&params.user_id) {
            return Err(StoreError::foreign_key(format!(
                "address {} does not belong to user {}",
                params.user_address_id, params.user_id
            )));
        }
        if !tables.payment_types.contains(&params.payment_type_id) {
            return Err(StoreError::foreign_key(format!(
                "payment type {} does not exist",
                params.payment_type_id
            )));
        }
        if !tables.shipping_methods.contains(&params.shipping_method_id) {
            return Err(StoreError::foreign_key(format!(
                "shipping method {} does not exist",
                params.shipping_method_id
            )));
        }
        if !tables.order_statuses.contains_key(&params.order_status_id) {
            return Err(StoreError::foreign_key(format!(
                "order status {} does not exist",
                params.order_status_id
            )));
        }

        let has_items = tables
            .shopping_cart_items
            .values()
            .any(|item| item.shopping_cart_id == params.shopping_cart_id);
        if !has_items {
            return Err(StoreError::check(format!(
                "shopping cart {} is empty",
                params.shopping_cart_id
            )));
        }

        let before = tables.shopping_cart_items.len();
        tables
            .shopping_cart_items
            .retain(|_, item| item.shopping_cart_id != params.shopping_cart_id);
        let line_count = i64::try_from(before - tables.shopping_cart_items.len())
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        let order = ShopOrder {
            id: OrderId::new(next(&mut tables.seq.order)),
            user_id: params.user_id,
            payment_type_id: params.payment_type_id,
            shipping_address_id: params.user_address_id,
            shipping_method_id: params.shipping_method_id,
            order_status_id: params.order_status_id,
            order_total: params.order_total,
            line_count,
            created_at: Utc::now(),
        };
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }
}

#[async_trait]
impl WishListStore for MemoryStore {
    #[instrument(skip(self))]
    async fn create_wish_list_item(
        &self,
        params: CreateWishListItemParams,
    ) -> StoreResult<WishListItem> {
        let mut tables = self.tables.write().await;
        if !tables.owns_wish_list(params.user_id, params.wish_list_id) {
            return Err(StoreError::NotFound);
        }
        tables.check_product(params.product_item_id)?;
        tables.check_wish_line_unique(params.wish_list_id, params.product_item_id, None)?;

        let item = WishListItem {
            id: WishListItemId::new(next(&mut tables.seq.wish_list_item)),
            wish_list_id: params.wish_list_id,
            product_item_id: params.product_item_id,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.wish_list_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get_wish_list_item(&self, key: WishListItemKey) -> StoreResult<WishListItem> {
        let tables = self.tables.read().await;
        tables.wish_list_item(key).cloned()
    }

    async fn list_wish_list_items_by_user(
        &self,
        user_id: UserId,
    ) -> StoreResult<Vec<WishListItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .wish_list_items
            .values()
            .filter(|item| tables.owns_wish_list(user_id, item.wish_list_id))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn update_wish_list_item(
        &self,
        params: UpdateWishListItemParams,
    ) -> StoreResult<WishListItem> {
        let mut tables = self.tables.write().await;
        let key = WishListItemKey {
            user_id: params.user_id,
            wish_list_id: params.wish_list_id,
            id: params.id,
        };
        tables.wish_list_item(key)?;
        if let Some(product_item_id) = params.product_item_id {
            tables.check_product(product_item_id)?;
            tables.check_wish_line_unique(params.wish_list_id, product_item_id, Some(params.id))?;
        }

        let item = tables
            .wish_list_items
            .get_mut(&params.id)
            .ok_or(StoreError::NotFound)?;
        if let Some(product_item_id) = params.product_item_id {
            item.product_item_id = product_item_id;
        }
        item.updated_at = Some(Utc::now());
        Ok(item.clone())
    }

    #[instrument(skip(self))]
    async fn delete_wish_list_item(&self, key: WishListItemKey) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.wish_list_item(key)?;
        tables.wish_list_items.remove(&key.id);
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_product_items_by_ids(
        &self,
        ids: Vec<ProductItemId>,
    ) -> StoreResult<Vec<ProductItemDetails>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.products.get(id))
            .cloned()
            .collect())
    }

    async fn list_product_sizes_by_ids(&self, ids: Vec<SizeId>) -> StoreResult<Vec<ProductSize>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.sizes.get(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn count_products(&self) -> StoreResult<EntityCounts> {
        let tables = self.tables.read().await;
        Ok(counts(tables.products.values().map(|p| p.active)))
    }

    async fn count_users(&self) -> StoreResult<EntityCounts> {
        let tables = self.tables.read().await;
        Ok(counts(tables.users.values().map(|u| !u.is_blocked)))
    }

    async fn count_orders_by_status(&self) -> StoreResult<Vec<OrderStatusCount>> {
        let tables = self.tables.read().await;
        Ok(tables
            .order_statuses
            .iter()
            .map(|(id, status)| OrderStatusCount {
                status: status.clone(),
                count: count_i64(tables.orders.values().filter(|o| o.order_status_id == *id)),
            })
            .collect())
    }

    async fn list_completed_daily_revenue(&self, days: u32) -> StoreResult<Vec<DailyRevenue>> {
        let tables = self.tables.read().await;
        let completed: HashSet<OrderStatusId> = tables
            .order_statuses
            .iter()
            .filter(|(_, name)| name.as_str() == COMPLETED_STATUS)
            .map(|(id, _)| *id)
            .collect();

        let today = Utc::now().date_naive();
        let first_day = today - TimeDelta::days(i64::from(days.saturating_sub(1)));

        let mut revenue: BTreeMap<NaiveDate, Money> = first_day
            .iter_days()
            .take_while(|day| *day <= today)
            .map(|day| (day, Money::ZERO))
            .collect();

        for order in tables
            .orders
            .values()
            .filter(|o| completed.contains(&o.order_status_id))
        {
            if let Some(total) = revenue.get_mut(&order.created_at.date_naive()) {
                *total = total.checked_add(order.order_total).ok_or_else(|| {
                    StoreError::Internal(format!(
                        "daily revenue for {} overflowed",
                        order.created_at.date_naive()
                    ))
                })?;
            }
        }

        Ok(revenue
            .into_iter()
            .map(|(day, revenue)| DailyRevenue { day, revenue })
            .collect())
    }
}

fn count_i64<I: Iterator>(iter: I) -> i64 {
    i64::try_from(iter.count()).unwrap_or(i64::MAX)
}

fn counts(active_flags: impl Iterator<Item = bool>) -> EntityCounts {
    active_flags.fold(EntityCounts::default(), |acc, active| EntityCounts {
        total: acc.total + 1,
        active: acc.active + i64::from(active),
    })
}
