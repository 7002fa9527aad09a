use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use serde_json::Value;

use super::dish_client::DishSubmitter;
use crate::data_types::dish_data_types::Dish;
use crate::errors::SubmissionError;

/// Loading/error bookkeeping around a submitter, owned by one form session.
pub struct DishMutation<S> {
    submitter: S,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

impl<S: DishSubmitter> DishMutation<S> {
    pub fn new(submitter: S) -> Self {
        DishMutation {
            submitter,
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        }
    }

    pub async fn execute(&self, dish: Dish) -> Result<Value, SubmissionError> {
        let result = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.submitter.submit(dish).await
        };

        let error = result.as_ref().err().map(|e| e.user_message());
        if let Ok(mut last_error) = self.last_error.lock() {
            *last_error = error;
        }

        result
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Message of the most recent execution, cleared by a success
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|e| e.clone())
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }
}

// counts a request as loading until it resolves or its future is dropped
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
