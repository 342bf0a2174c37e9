use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::customer::{sample_email, CustomerId, NewCustomer};
use crate::error::GenError;
use crate::store::CustomerStore;

/// Fraction of iterations that insert; the rest update.
pub const INSERT_WEIGHT: f64 = 0.6;

/// Bounds of the per-iteration pause, in milliseconds.
pub const PAUSE_MS: RangeInclusive<u64> = 300..=1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted(CustomerId),
    Updated,
}

/// Cooperative stop flag, checked once per loop iteration. Clones share
/// the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The randomized insert/update driver. Iterations are stateless with
/// respect to each other; the only state carried across them is the rng
/// and the shared database session owned by the caller.
#[derive(Debug)]
pub struct Workload<R> {
    rng: R,
    insert_weight: f64,
    pause_ms: RangeInclusive<u64>,
}

impl<R: Rng> Workload<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Workload {
            rng,
            insert_weight: INSERT_WEIGHT,
            pause_ms: PAUSE_MS,
        }
    }

    /// Same driver with a custom action weight and pause interval.
    #[must_use]
    pub fn with_timing(rng: R, insert_weight: f64, pause_ms: RangeInclusive<u64>) -> Self {
        Workload {
            rng,
            insert_weight,
            pause_ms,
        }
    }

    /// Draws a uniform fraction; below the insert weight means [`Action::Insert`].
    pub fn choose_action(&mut self) -> Action {
        if self.rng.gen::<f64>() < self.insert_weight {
            Action::Insert
        } else {
            Action::Update
        }
    }

    /// Uniform pause strictly within the configured interval.
    pub fn sample_pause(&mut self) -> Duration {
        Duration::from_millis(self.rng.gen_range(self.pause_ms.clone()))
    }

    /// Executes one action against the store.
    ///
    /// # Errors
    /// Propagates every store error unchanged; there is no per-iteration
    /// recovery.
    pub fn step<S: CustomerStore>(&mut self, store: &mut S) -> Result<Outcome, GenError> {
        match self.choose_action() {
            Action::Insert => {
                let address_id = store.random_address_id()?;
                let customer = NewCustomer::sample(&mut self.rng, address_id);
                let id = store.insert_customer(&customer)?;
                Ok(Outcome::Inserted(id))
            }
            Action::Update => {
                let id = store.random_customer_id()?;
                let email = sample_email(&mut self.rng);
                store.update_customer_email(id, &email)?;
                Ok(Outcome::Updated)
            }
        }
    }

    /// Drives the loop until `cancel` fires, `max_actions` is reached
    /// (`None` runs forever), or an error propagates. One line per
    /// iteration goes to stdout; that output is the tool's external
    /// interface. Returns the number of actions performed.
    ///
    /// # Errors
    /// Returns the first store error; no statement is retried.
    pub fn run<S: CustomerStore>(
        &mut self,
        store: &mut S,
        cancel: &CancelToken,
        max_actions: Option<u64>,
    ) -> Result<u64, GenError> {
        let mut performed = 0;
        while !cancel.is_cancelled() {
            if max_actions.is_some_and(|max| performed >= max) {
                break;
            }
            match self.step(store)? {
                Outcome::Inserted(id) => println!("Inserted customer {id}"),
                Outcome::Updated => println!("Updated a customer"),
            }
            performed += 1;
            let pause = self.sample_pause();
            let pause_ms = pause.as_millis();
            debug!("sleeping {pause_ms}ms");
            thread::sleep(pause);
        }
        Ok(performed)
    }
}
