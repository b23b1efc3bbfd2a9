use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{require_present, validate_names, Customer, CustomerDto, CustomerId};
use super::errors::CustomerError;
use super::repository::CustomerRepository;

/// Customer business service independent of web framework
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and store a new customer.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{domain::CustomerDto, repository::memory::InMemoryCustomerRepository, CustomerService};
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::default()));
    /// let created = tokio_test::block_on(svc.create(Some(CustomerDto::new("Ming", "Li")))).unwrap();
    /// assert_eq!(created.id, Some(1));
    /// assert_eq!(created.first_name.as_deref(), Some("Ming"));
    /// ```
    #[instrument(skip(self, dto))]
    pub async fn create(&self, dto: Option<CustomerDto>) -> Result<CustomerDto, CustomerError> {
        let dto = require_present("customer", dto)?;
        let new = validate_names(&dto)?;
        let created = self.repo.insert(new).await?;
        info!(customer_id = created.id, "customer_created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<CustomerDto>, CustomerError> {
        let found = self.repo.find_by_id(id).await?;
        if found.is_none() {
            debug!(customer_id = id, "customer_not_found");
        }
        Ok(found.map(CustomerDto::from))
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<CustomerDto>, CustomerError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(CustomerDto::from).collect())
    }

    /// Overwrite the names of an existing customer. Unknown ids yield `None`
    /// and never create a row.
    ///
    /// # Examples
    /// ```
    /// use service::customer::{domain::CustomerDto, repository::memory::InMemoryCustomerRepository, CustomerService};
    /// use std::sync::Arc;
    /// let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::default()));
    /// let created = tokio_test::block_on(svc.create(Some(CustomerDto::new("Hong", "Wang")))).unwrap();
    /// let renamed = CustomerDto::new("John", "Wang").with_id(created.id.unwrap());
    /// let updated = tokio_test::block_on(svc.update(Some(renamed.clone()))).unwrap();
    /// assert_eq!(updated, Some(renamed));
    /// assert_eq!(tokio_test::block_on(svc.update(Some(CustomerDto::new("A", "B").with_id(42)))).unwrap(), None);
    /// ```
    #[instrument(skip(self, dto))]
    pub async fn update(&self, dto: Option<CustomerDto>) -> Result<Option<CustomerDto>, CustomerError> {
        let dto = require_present("customer", dto)?;
        let names = validate_names(&dto)?;
        let id = require_present("id", dto.id)?;

        let customer = Customer { id, first_name: names.first_name, last_name: names.last_name };
        let saved = self.repo.save(&customer).await?;
        match &saved {
            Some(_) => info!(customer_id = id, "customer_updated"),
            None => debug!(customer_id = id, "update_target_missing"),
        }
        Ok(saved.map(CustomerDto::from))
    }

    /// Remove a customer; unknown ids are a no-op.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: CustomerId) -> Result<(), CustomerError> {
        if self.repo.delete_by_id(id).await? {
            info!(customer_id = id, "customer_deleted");
        }
        Ok(())
    }
}
