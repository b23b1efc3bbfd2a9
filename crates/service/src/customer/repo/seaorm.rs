use sea_orm::{DatabaseConnection, EntityTrait};

use crate::customer::domain::{Customer, CustomerId, NewCustomer};
use crate::customer::errors::CustomerError;
use crate::customer::repository::{check_argument, check_names, CustomerRepository};

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

fn into_domain(rows: Vec<models::customer::Model>) -> Vec<Customer> {
    rows.into_iter().map(Customer::from).collect()
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn insert(&self, customer: NewCustomer) -> Result<Customer, CustomerError> {
        check_names(&customer.first_name, &customer.last_name)?;
        let created = models::customer::create(&self.db, &customer.first_name, &customer.last_name).await?;
        Ok(created.into())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
        let res = models::customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CustomerError::Repository(e.to_string()))?;
        Ok(res.map(Customer::from))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(into_domain(models::customer::find_all(&self.db).await?))
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Customer>, CustomerError> {
        check_argument("firstName", first_name)?;
        Ok(into_domain(models::customer::find_by_first_name(&self.db, first_name).await?))
    }

    async fn find_by_last_name_order_by_first_name(&self, last_name: &str) -> Result<Vec<Customer>, CustomerError> {
        check_argument("lastName", last_name)?;
        Ok(into_domain(models::customer::find_by_last_name_order_by_first_name(&self.db, last_name).await?))
    }

    async fn find_by_first_name_starting_with(&self, prefix: &str) -> Result<Vec<Customer>, CustomerError> {
        check_argument("prefix", prefix)?;
        Ok(into_domain(models::customer::find_by_first_name_starting_with(&self.db, prefix).await?))
    }

    async fn save(&self, customer: &Customer) -> Result<Option<Customer>, CustomerError> {
        check_names(&customer.first_name, &customer.last_name)?;
        let updated = models::customer::update_names(&self.db, customer.id, &customer.first_name, &customer.last_name).await?;
        Ok(updated.map(Customer::from))
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<bool, CustomerError> {
        Ok(models::customer::hard_delete(&self.db, id).await?)
    }
}
