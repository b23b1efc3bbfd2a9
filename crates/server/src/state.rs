use std::sync::Arc;

use service::currency::CurrencyProvider;
use service::customer::{repository::CustomerRepository, CustomerService};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<CustomerService<dyn CustomerRepository>>,
    /// Outbound client behind `/currency-client/currencies`.
    pub currency_client: Arc<dyn CurrencyProvider>,
    /// Bundled feed behind `/currency-server/currencies`.
    pub currency_store: Arc<dyn CurrencyProvider>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn CustomerRepository>,
        currency_client: Arc<dyn CurrencyProvider>,
        currency_store: Arc<dyn CurrencyProvider>,
    ) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(repo)),
            currency_client,
            currency_store,
        }
    }
}
