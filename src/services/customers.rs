use crate::{
    entities::{customer, Customer, CustomerModel},
    errors::ServiceError,
    events::{Event, EventSender},
};
use rand::RngCore;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

const MAX_DISCOUNT_PERCENT: i32 = 100;

/// Customer accounts over the legacy `user` table. Passwords are stored as
/// salted SHA-256 digests; the plaintext never leaves the request scope.
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
    events: EventSender,
}

/// Customer data handed to clients: everything except credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerProfile {
    pub id: i32,
    pub name: String,
    pub tel: String,
    /// Flat percentage discount applied at checkout
    pub sale: i32,
}

impl From<CustomerModel> for CustomerProfile {
    fn from(m: CustomerModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            tel: m.tel,
            sale: m.sale,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub tel: String,
    pub password: String,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>, events: EventSender) -> Self {
        Self { db, events }
    }

    #[instrument(skip(self, input), fields(tel = %input.tel))]
    pub async fn register(&self, input: RegisterInput) -> Result<CustomerProfile, ServiceError> {
        let existing = Customer::find()
            .filter(customer::Column::Tel.eq(input.tel.clone()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "phone number {} is already registered",
                input.tel
            )));
        }

        let salt = generate_salt();
        let model = customer::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            tel: Set(input.tel),
            sale: Set(0),
            password_hash: Set(hash_password(&salt, &input.password)),
            salt: Set(salt),
        };
        let customer = model.insert(&*self.db).await?;

        self.events
            .send_or_log(Event::CustomerRegistered {
                customer_id: customer.id,
            })
            .await;
        info!("registered customer {}", customer.id);
        Ok(customer.into())
    }

    /// Verify credentials. The error does not reveal whether the phone
    /// number or the password was wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, tel: &str, password: &str) -> Result<CustomerProfile, ServiceError> {
        let customer = Customer::find()
            .filter(customer::Column::Tel.eq(tel))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::AuthError("invalid phone number or password".to_string()))?;

        if hash_password(&customer.salt, password) != customer.password_hash {
            return Err(ServiceError::AuthError(
                "invalid phone number or password".to_string(),
            ));
        }
        Ok(customer.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, customer_id: i32) -> Result<CustomerProfile, ServiceError> {
        let customer = Customer::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("customer {customer_id} not found")))?;
        Ok(customer.into())
    }

    /// Admin: set the flat discount percentage for a customer.
    #[instrument(skip(self))]
    pub async fn set_discount(
        &self,
        customer_id: i32,
        sale: i32,
    ) -> Result<CustomerProfile, ServiceError> {
        if !(0..=MAX_DISCOUNT_PERCENT).contains(&sale) {
            return Err(ServiceError::InvalidInput(format!(
                "discount must be between 0 and {MAX_DISCOUNT_PERCENT}"
            )));
        }

        let customer = Customer::find_by_id(customer_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("customer {customer_id} not found")))?;

        let mut active: customer::ActiveModel = customer.into();
        active.sale = Set(sale);
        let customer = active.update(&*self.db).await?;
        Ok(customer.into())
    }
}

fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_per_salt() {
        let salt = generate_salt();
        assert_eq!(hash_password(&salt, "secret"), hash_password(&salt, "secret"));
        assert_ne!(hash_password(&salt, "secret"), hash_password(&salt, "other"));

        let other_salt = generate_salt();
        assert_ne!(salt, other_salt);
        assert_ne!(
            hash_password(&salt, "secret"),
            hash_password(&other_salt, "secret")
        );
    }
}
