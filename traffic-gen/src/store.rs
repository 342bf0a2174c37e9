use log::debug;
use postgres::Client;

use crate::customer::{AddressId, CustomerId, NewCustomer};
use crate::error::GenError;

/// The seam between the workload and the database.
pub trait CustomerStore {
    /// Picks one existing address uniformly at random.
    ///
    /// # Errors
    /// Errors when the `address` table is empty or the query fails.
    fn random_address_id(&mut self) -> Result<AddressId, GenError>;

    /// Picks one existing customer uniformly at random.
    ///
    /// # Errors
    /// Errors when the `customer` table is empty or the query fails.
    fn random_customer_id(&mut self) -> Result<CustomerId, GenError>;

    /// Inserts one customer row. The database assigns the id and stamps
    /// `create_date`/`last_update` itself.
    ///
    /// # Errors
    /// Errors on any database failure (constraint violation, lost
    /// connection). Nothing is retried.
    fn insert_customer(&mut self, customer: &NewCustomer) -> Result<CustomerId, GenError>;

    /// Rewrites one customer's email and refreshes `last_update`.
    ///
    /// # Errors
    /// Errors on any database failure.
    fn update_customer_email(&mut self, id: CustomerId, email: &str) -> Result<(), GenError>;
}

/// Blocking Postgres-backed store over the `address`/`customer` tables.
pub struct PgStore {
    client: Client,
}

impl PgStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        PgStore { client }
    }

    /// Escape hatch for ad-hoc statements outside the workload (tests,
    /// one-off inspection).
    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }
}

impl CustomerStore for PgStore {
    fn random_address_id(&mut self) -> Result<AddressId, GenError> {
        let row = self
            .client
            .query_opt(
                "SELECT address_id FROM address ORDER BY random() LIMIT 1",
                &[],
            )?
            .ok_or(GenError::EmptyTable("address"))?;
        Ok(AddressId(row.try_get(0)?))
    }

    fn random_customer_id(&mut self) -> Result<CustomerId, GenError> {
        let row = self
            .client
            .query_opt(
                "SELECT customer_id FROM customer ORDER BY random() LIMIT 1",
                &[],
            )?
            .ok_or(GenError::EmptyTable("customer"))?;
        Ok(CustomerId(row.try_get(0)?))
    }

    fn insert_customer(&mut self, customer: &NewCustomer) -> Result<CustomerId, GenError> {
        let row = self.client.query_one(
            "INSERT INTO customer \
             (store_id, first_name, last_name, email, address_id, activebool, create_date, last_update) \
             VALUES ($1, $2, $3, $4, $5, true, CURRENT_DATE, NOW()) \
             RETURNING customer_id",
            &[
                &customer.store_id,
                &customer.first_name,
                &customer.last_name,
                &customer.email,
                &customer.address_id.0,
            ],
        )?;
        Ok(CustomerId(row.try_get(0)?))
    }

    fn update_customer_email(&mut self, id: CustomerId, email: &str) -> Result<(), GenError> {
        let touched = self.client.execute(
            "UPDATE customer SET email = $1, last_update = NOW() WHERE customer_id = $2",
            &[&email, &id.0],
        )?;
        debug!("update of customer {id} touched {touched} row(s)");
        Ok(())
    }
}
