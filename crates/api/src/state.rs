//! Application state shared across handlers.

use std::sync::Arc;

use bazaar_core::store::{
    AdminStore, AppPolicyStore, CatalogStore, DashboardStore, NotificationStore,
    ShoppingCartStore, Store, UserStore, WishListStore,
};

use crate::config::ApiConfig;
use crate::services::tasks::TaskDistributor;
use crate::services::token::TokenMaker;

/// One handle per store aggregate.
///
/// Handlers reach only the aggregates they use, so each can be replaced by
/// its own test double.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub admins: Arc<dyn AdminStore>,
    pub app_policies: Arc<dyn AppPolicyStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub carts: Arc<dyn ShoppingCartStore>,
    pub wish_lists: Arc<dyn WishListStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub dashboard: Arc<dyn DashboardStore>,
}

impl Stores {
    /// Serve every aggregate from one backend.
    pub fn shared<S: Store + 'static>(store: Arc<S>) -> Self {
        Self {
            users: store.clone(),
            admins: store.clone(),
            app_policies: store.clone(),
            notifications: store.clone(),
            carts: store.clone(),
            wish_lists: store.clone(),
            catalog: store.clone(),
            dashboard: store,
        }
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the stores, the token maker and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    stores: Stores,
    token_maker: Arc<dyn TokenMaker>,
    tasks: Arc<dyn TaskDistributor>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        config: ApiConfig,
        stores: Stores,
        token_maker: Arc<dyn TokenMaker>,
        tasks: Arc<dyn TaskDistributor>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                stores,
                token_maker,
                tasks,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get the store handles.
    #[must_use]
    pub fn stores(&self) -> &Stores {
        &self.inner.stores
    }

    /// Get the bearer token maker.
    #[must_use]
    pub fn token_maker(&self) -> &dyn TokenMaker {
        self.inner.token_maker.as_ref()
    }

    /// Get the background task distributor.
    #[must_use]
    pub fn tasks(&self) -> &dyn TaskDistributor {
        self.inner.tasks.as_ref()
    }
}
