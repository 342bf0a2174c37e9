use std::fmt;

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;

/// The two stores every customer belongs to, per the seeded schema.
pub const STORE_IDS: [i32; 2] = [1, 2];

/// Opaque key of a row in the `address` collaborator table. This program
/// only ever reads existing values; it never mints one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressId(pub i32);

/// Opaque key of a `customer` row, assigned by the database on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerId(pub i32);

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values for one customer insert. Timestamps are deliberately
/// absent; the database stamps them at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub store_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address_id: AddressId,
}

impl NewCustomer {
    /// Samples plausible field values and a uniform store pick. Nothing is
    /// checked against existing rows; duplicate emails are allowed.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, address_id: AddressId) -> Self {
        NewCustomer {
            store_id: STORE_IDS[rng.gen_range(0..STORE_IDS.len())],
            first_name: FirstName().fake_with_rng(rng),
            last_name: LastName().fake_with_rng(rng),
            email: SafeEmail().fake_with_rng(rng),
            address_id,
        }
    }
}

/// Fresh synthetic email for the update action.
pub fn sample_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    SafeEmail().fake_with_rng(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_produces_plausible_fields() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let customer = NewCustomer::sample(&mut rng, AddressId(42));
            assert!(STORE_IDS.contains(&customer.store_id));
            assert!(!customer.first_name.is_empty());
            assert!(!customer.last_name.is_empty());
            assert!(customer.email.contains('@'));
            assert_eq!(customer.address_id, AddressId(42));
        }
    }

    #[test]
    fn test_sample_is_deterministic_per_seed() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = NewCustomer::sample(&mut rng_a, AddressId(1));
        let b = NewCustomer::sample(&mut rng_b, AddressId(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_both_stores_get_picked() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false, false];
        for _ in 0..200 {
            let customer = NewCustomer::sample(&mut rng, AddressId(1));
            seen[usize::try_from(customer.store_id - 1).unwrap()] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_sample_email_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        let email = sample_email(&mut rng);
        assert!(email.contains('@'));
    }
}
