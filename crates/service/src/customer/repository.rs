use async_trait::async_trait;

use super::domain::{Customer, CustomerId, NewCustomer};
use super::errors::CustomerError;

/// Repository abstraction for customer persistence.
///
/// Finder arguments and stored names must not be blank; implementations
/// reject them with [`CustomerError::Validation`].
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Store a new row; the returned customer carries the assigned id.
    async fn insert(&self, customer: NewCustomer) -> Result<Customer, CustomerError>;
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError>;
    /// All rows in insertion order.
    async fn find_all(&self) -> Result<Vec<Customer>, CustomerError>;
    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Customer>, CustomerError>;
    async fn find_by_last_name_order_by_first_name(&self, last_name: &str) -> Result<Vec<Customer>, CustomerError>;
    async fn find_by_first_name_starting_with(&self, prefix: &str) -> Result<Vec<Customer>, CustomerError>;
    /// Overwrite the names of an existing row; `None` if the id is unknown.
    async fn save(&self, customer: &Customer) -> Result<Option<Customer>, CustomerError>;
    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: CustomerId) -> Result<bool, CustomerError>;
}

pub(crate) fn check_argument(field: &'static str, value: &str) -> Result<(), CustomerError> {
    super::domain::require_not_blank(field, Some(value))?;
    Ok(())
}

pub(crate) fn check_names(first_name: &str, last_name: &str) -> Result<(), CustomerError> {
    check_argument("firstName", first_name)?;
    check_argument("lastName", last_name)
}

/// Simple in-memory repository for tests and doc examples
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct MemoryState {
        rows: BTreeMap<CustomerId, Customer>,
        last_id: CustomerId,
    }

    #[derive(Default)]
    pub struct InMemoryCustomerRepository {
        state: Mutex<MemoryState>,
    }

    impl InMemoryCustomerRepository {
        fn state(&self) -> Result<MutexGuard<'_, MemoryState>, CustomerError> {
            self.state
                .lock()
                .map_err(|_| CustomerError::Repository("customer store lock poisoned".into()))
        }

        fn select<F>(&self, pred: F) -> Result<Vec<Customer>, CustomerError>
        where
            F: Fn(&Customer) -> bool,
        {
            let state = self.state()?;
            Ok(state.rows.values().filter(|c| pred(c)).cloned().collect())
        }
    }

    #[async_trait]
    impl CustomerRepository for InMemoryCustomerRepository {
        async fn insert(&self, customer: NewCustomer) -> Result<Customer, CustomerError> {
            check_names(&customer.first_name, &customer.last_name)?;
            let mut state = self.state()?;
            state.last_id += 1;
            let created = Customer {
                id: state.last_id,
                first_name: customer.first_name,
                last_name: customer.last_name,
            };
            state.rows.insert(created.id, created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError> {
            Ok(self.state()?.rows.get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Customer>, CustomerError> {
            self.select(|_| true)
        }

        async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Customer>, CustomerError> {
            check_argument("firstName", first_name)?;
            self.select(|c| c.first_name == first_name)
        }

        async fn find_by_last_name_order_by_first_name(&self, last_name: &str) -> Result<Vec<Customer>, CustomerError> {
            check_argument("lastName", last_name)?;
            let mut found = self.select(|c| c.last_name == last_name)?;
            // stable sort keeps insertion order among equal first names
            found.sort_by(|a, b| a.first_name.cmp(&b.first_name));
            Ok(found)
        }

        async fn find_by_first_name_starting_with(&self, prefix: &str) -> Result<Vec<Customer>, CustomerError> {
            check_argument("prefix", prefix)?;
            self.select(|c| c.first_name.starts_with(prefix))
        }

        async fn save(&self, customer: &Customer) -> Result<Option<Customer>, CustomerError> {
            check_names(&customer.first_name, &customer.last_name)?;
            let mut state = self.state()?;
            match state.rows.get_mut(&customer.id) {
                Some(existing) => {
                    existing.first_name = customer.first_name.clone();
                    existing.last_name = customer.last_name.clone();
                    Ok(Some(existing.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete_by_id(&self, id: CustomerId) -> Result<bool, CustomerError> {
            Ok(self.state()?.rows.remove(&id).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryCustomerRepository;
    use super::*;
    use crate::customer::domain::Rule;

    fn new_customer(first: &str, last: &str) -> NewCustomer {
        NewCustomer { first_name: first.into(), last_name: last.into() }
    }

    async fn seeded(names: &[(&str, &str)]) -> Result<InMemoryCustomerRepository, CustomerError> {
        let repo = InMemoryCustomerRepository::default();
        for (first, last) in names {
            repo.insert(new_customer(first, last)).await?;
        }
        Ok(repo)
    }

    fn first_names(found: &[Customer]) -> Vec<&str> {
        found.iter().map(|c| c.first_name.as_str()).collect()
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() -> anyhow::Result<()> {
        let repo = InMemoryCustomerRepository::default();
        let a = repo.insert(new_customer("Ming", "Li")).await?;
        let b = repo.insert(new_customer("Hong", "Wang")).await?;
        assert_eq!((a.id, b.id), (1, 2));
        assert!(repo.delete_by_id(b.id).await?);
        let c = repo.insert(new_customer("Lei", "Li")).await?;
        assert_eq!(c.id, 3);
        assert_eq!(repo.find_by_id(1).await?, Some(a));
        assert_eq!(repo.find_by_id(2).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn prefix_and_ordered_queries() -> anyhow::Result<()> {
        let repo = seeded(&[
            ("Ming", "Li"),
            ("Mei", "Li"),
            ("Meng", "Li"),
            ("An", "Li"),
            ("Mao", "Li"),
            ("Zheng", "Li"),
        ])
        .await?;

        let mut starts_with_m = first_names(&repo.find_by_first_name_starting_with("M").await?)
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        starts_with_m.sort();
        assert_eq!(starts_with_m, vec!["Mao", "Mei", "Meng", "Ming"]);
        assert_eq!(repo.find_by_first_name_starting_with("Me").await?.len(), 2);

        let ordered = repo.find_by_last_name_order_by_first_name("Li").await?;
        assert_eq!(first_names(&ordered), vec!["An", "Mao", "Mei", "Meng", "Ming", "Zheng"]);
        Ok(())
    }

    #[tokio::test]
    async fn exact_first_name_matches_across_last_names() -> anyhow::Result<()> {
        let repo = seeded(&[("Ming", "Li"), ("Lei", "Li"), ("Ming", "Wang")]).await?;
        let found = repo.find_by_first_name("Ming").await?;
        assert_eq!(found.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn blank_finder_arguments_are_rejected() -> anyhow::Result<()> {
        let repo = seeded(&[("Ming", "Li")]).await?;
        for blank in ["", " "] {
            match repo.find_by_first_name(blank).await {
                Err(CustomerError::Validation(v)) => {
                    assert_eq!(v.field, "firstName");
                    assert_eq!(v.rule, Rule::NotBlank);
                }
                other => panic!("expected validation error, got {other:?}"),
            }
            assert!(matches!(repo.find_by_last_name_order_by_first_name(blank).await, Err(CustomerError::Validation(_))));
            assert!(matches!(repo.find_by_first_name_starting_with(blank).await, Err(CustomerError::Validation(_))));
        }
        Ok(())
    }

    #[tokio::test]
    async fn save_only_touches_existing_rows() -> anyhow::Result<()> {
        let repo = seeded(&[("Ming", "Li")]).await?;
        let renamed = Customer { id: 1, first_name: "John".into(), last_name: "Li".into() };
        assert_eq!(repo.save(&renamed).await?, Some(renamed.clone()));
        let ghost = Customer { id: 9, ..renamed };
        assert_eq!(repo.save(&ghost).await?, None);
        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_unknown_id_is_a_no_op() -> anyhow::Result<()> {
        let repo = seeded(&[("Ming", "Li"), ("Hong", "Wang")]).await?;
        assert!(!repo.delete_by_id(3).await?);
        assert_eq!(repo.find_all().await?.len(), 2);
        Ok(())
    }
}
