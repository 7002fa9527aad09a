use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use serde_json::Value;

use crate::constants::{ERROR_TITLE, SUCCESS_MSG, SUCCESS_TITLE, TOAST_DURATION};
use crate::data_backend::{DishMutation, DishSubmitter};
use crate::data_types::form_data_types::DishFormInput;
use crate::data_types::{DishType, FormField};
use crate::dish_mapper::map_dish;
use crate::errors::FieldErrors;
use crate::validation::validate;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
    Success,
    Failure,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub status: ToastStatus,
    pub duration: Duration,
    pub is_closable: bool,
}

impl Toast {
    fn success() -> Self {
        Toast {
            title: SUCCESS_TITLE.to_string(),
            description: SUCCESS_MSG.to_string(),
            status: ToastStatus::Success,
            duration: TOAST_DURATION,
            is_closable: true,
        }
    }

    fn error(description: String) -> Self {
        Toast {
            title: ERROR_TITLE.to_string(),
            description,
            status: ToastStatus::Error,
            duration: TOAST_DURATION,
            is_closable: true,
        }
    }
}

/// Where user-facing notifications go (toasts in a UI, stdout in the CLI)
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Backend accepted the dish; holds its (opaque) response body
    Submitted(Value),
    /// Schema rejected the input, nothing was sent
    Rejected(FieldErrors),
    /// Submission failed; holds the message that was shown
    Failed(String),
    /// Another submission of this form is still in flight
    Busy,
}

const BASE_FIELDS: [FormField; 3] = [FormField::Name, FormField::PreparationTime, FormField::Type];
const PIZZA_FIELDS: [FormField; 5] = [
    FormField::Name,
    FormField::PreparationTime,
    FormField::Type,
    FormField::NoOfSlices,
    FormField::Diameter,
];
const SOUP_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::PreparationTime,
    FormField::Type,
    FormField::SpicinessScale,
];
const SANDWICH_FIELDS: [FormField; 4] = [
    FormField::Name,
    FormField::PreparationTime,
    FormField::Type,
    FormField::SlicesOfBread,
];

/// Fields to render (and that get validated) for a selected dish type.
pub fn relevant_fields(dish_type: Option<DishType>) -> &'static [FormField] {
    match dish_type {
        None => &BASE_FIELDS,
        Some(DishType::Pizza) => &PIZZA_FIELDS,
        Some(DishType::Soup) => &SOUP_FIELDS,
        Some(DishType::Sandwich) => &SANDWICH_FIELDS,
    }
}

struct FormInner {
    values: DishFormInput,
    errors: FieldErrors,
    state: FormState,
}

impl FormInner {
    fn transition(&mut self, next: FormState) {
        log::debug!("Order form: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Drives one order form: input, validation, a single in-flight submission
/// and the notifications that follow it.
pub struct OrderForm<S, N> {
    mutation: Arc<DishMutation<S>>,
    notifier: N,
    inner: Mutex<FormInner>,
}

impl<S: DishSubmitter, N: Notifier> OrderForm<S, N> {
    pub fn new(mutation: Arc<DishMutation<S>>, notifier: N) -> Self {
        OrderForm {
            mutation,
            notifier,
            inner: Mutex::new(FormInner {
                values: DishFormInput::default(),
                errors: FieldErrors::default(),
                state: FormState::Idle,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> FormState {
        self.lock().state
    }

    pub fn is_loading(&self) -> bool {
        self.state() == FormState::Submitting
    }

    pub fn values(&self) -> DishFormInput {
        self.lock().values.clone()
    }

    pub fn field_errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.lock().values.set(field, value);
    }

    pub fn set_dish_type(&self, dish_type: Option<DishType>) {
        let value = dish_type.map(|t| t.as_str()).unwrap_or_default();
        self.set_field(FormField::Type, value);
    }

    /// Replaces the whole form input, e.g. when loaded from a file
    pub fn fill(&self, values: DishFormInput) {
        self.lock().values = values;
    }

    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.values = DishFormInput::default();
        inner.errors = FieldErrors::default();
    }

    pub fn relevant_fields(&self) -> &'static [FormField] {
        relevant_fields(self.lock().values.selected_type())
    }

    pub fn mutation(&self) -> &DishMutation<S> {
        &self.mutation
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let dish = {
            let mut inner = self.lock();
            if inner.state == FormState::Submitting {
                log::debug!("Order form busy, ignoring submit");
                return SubmitOutcome::Busy;
            }

            inner.transition(FormState::Validating);
            match validate(&inner.values) {
                Ok(validated) => {
                    inner.errors = FieldErrors::default();
                    inner.transition(FormState::Submitting);
                    map_dish(validated)
                }
                Err(errors) => {
                    inner.errors = errors.clone();
                    inner.transition(FormState::Idle);
                    return SubmitOutcome::Rejected(errors);
                }
            }
        };

        let guard = SubmittingGuard {
            form: self,
            armed: true,
        };
        let result = self.mutation.execute(dish).await;
        guard.disarm();

        match result {
            Ok(body) => {
                self.lock().transition(FormState::Success);
                self.reset();
                log::info!("Dish added");
                self.notifier.notify(Toast::success());
                self.lock().transition(FormState::Idle);
                SubmitOutcome::Submitted(body)
            }
            Err(e) => {
                log::error!("Adding dish failed: {:?}", e);
                let msg = e.user_message();
                self.lock().transition(FormState::Failure);
                self.notifier.notify(Toast::error(msg.clone()));
                self.lock().transition(FormState::Idle);
                SubmitOutcome::Failed(msg)
            }
        }
    }
}

// puts a form whose submit future was dropped mid-flight back to Idle
struct SubmittingGuard<'a, S: DishSubmitter, N: Notifier> {
    form: &'a OrderForm<S, N>,
    armed: bool,
}

impl<S: DishSubmitter, N: Notifier> SubmittingGuard<'_, S, N> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: DishSubmitter, N: Notifier> Drop for SubmittingGuard<'_, S, N> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.form.lock();
        if inner.state == FormState::Submitting {
            log::warn!("Dish submission abandoned");
            inner.transition(FormState::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::dish_data_types::Dish;
    use crate::errors::{SubmissionError, ValidationError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeBackend {
        calls: AtomicUsize,
        sent: Mutex<Vec<Dish>>,
        fail_with: Option<u16>,
        hold: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl DishSubmitter for FakeBackend {
        async fn submit(&self, dish: Dish) -> Result<Value, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(dish);
            if let Some(hold) = &self.hold {
                hold.notified().await;
            }
            match self.fail_with {
                Some(status) => Err(SubmissionError::Rejected {
                    status,
                    message: None,
                }),
                None => Ok(json!({ "id": 42 })),
            }
        }
    }

    #[derive(Default, Clone)]
    struct Toasts(Arc<Mutex<Vec<Toast>>>);

    impl Notifier for Toasts {
        fn notify(&self, toast: Toast) {
            self.0.lock().unwrap().push(toast);
        }
    }

    impl Toasts {
        fn all(&self) -> Vec<Toast> {
            self.0.lock().unwrap().clone()
        }
    }

    fn form_with(backend: FakeBackend) -> (OrderForm<FakeBackend, Toasts>, Toasts) {
        let toasts = Toasts::default();
        let form = OrderForm::new(Arc::new(DishMutation::new(backend)), toasts.clone());
        (form, toasts)
    }

    fn fill_margherita(form: &OrderForm<FakeBackend, Toasts>) {
        form.set_dish_type(Some(DishType::Pizza));
        form.set_field(FormField::Name, "Margherita");
        form.set_field(FormField::PreparationTime, "00:20:00");
        form.set_field(FormField::NoOfSlices, "8");
        form.set_field(FormField::Diameter, "30");
    }

    fn calls(form: &OrderForm<FakeBackend, Toasts>) -> usize {
        form.mutation().submitter().calls.load(Ordering::SeqCst)
    }

    #[test]
    fn relevant_fields_follow_discriminator() {
        assert_eq!(relevant_fields(None), &BASE_FIELDS);
        assert!(relevant_fields(Some(DishType::Pizza)).contains(&FormField::Diameter));
        assert!(!relevant_fields(Some(DishType::Soup)).contains(&FormField::Diameter));
        assert_eq!(
            relevant_fields(Some(DishType::Sandwich)).last(),
            Some(&FormField::SlicesOfBread)
        );
    }

    #[tokio::test]
    async fn successful_submission_resets_form() {
        let (form, toasts) = form_with(FakeBackend::default());
        fill_margherita(&form);
        assert_eq!(form.relevant_fields(), &PIZZA_FIELDS);

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::Submitted(json!({ "id": 42 })));
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.values(), DishFormInput::default());
        let sent = form.mutation().submitter().sent.lock().unwrap().clone();
        assert_eq!(
            serde_json::to_value(&sent[0]).unwrap(),
            json!({
                "type": "pizza",
                "name": "Margherita",
                "preparation_time": "00:20:00",
                "no_of_slices": 8,
                "diameter": 30
            })
        );
        let toasts = toasts.all();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].status, ToastStatus::Success);
        assert_eq!(toasts[0].title, "Dish added");
    }

    #[tokio::test]
    async fn success_after_rejection_clears_stale_errors() {
        let (form, _toasts) = form_with(FakeBackend::default());
        fill_margherita(&form);
        form.set_field(FormField::Diameter, "101");

        assert!(matches!(form.submit().await, SubmitOutcome::Rejected(_)));
        assert_eq!(form.field_errors().len(), 1);

        form.set_field(FormField::Diameter, "30");
        assert!(matches!(form.submit().await, SubmitOutcome::Submitted(_)));
        assert!(form.field_errors().is_empty());
        assert_eq!(form.values(), DishFormInput::default());
        assert_eq!(form.relevant_fields(), &BASE_FIELDS);
    }

    #[tokio::test]
    async fn missing_type_never_hits_network() {
        let (form, toasts) = form_with(FakeBackend::default());
        form.set_field(FormField::Name, "Margherita");

        let outcome = form.submit().await;

        match outcome {
            SubmitOutcome::Rejected(errors) => assert_eq!(
                errors.for_field(FormField::Type),
                vec![&ValidationError::MissingDiscriminator]
            ),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(calls(&form), 0);
        assert_eq!(form.state(), FormState::Idle);
        assert!(!form.field_errors().is_empty());
        assert!(toasts.all().is_empty());
    }

    #[tokio::test]
    async fn failed_submission_keeps_input() {
        let (form, toasts) = form_with(FakeBackend {
            fail_with: Some(500),
            ..Default::default()
        });
        fill_margherita(&form);
        let before = form.values();

        let outcome = form.submit().await;

        match outcome {
            SubmitOutcome::Failed(msg) => assert!(!msg.is_empty()),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(form.values(), before);
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(
            form.mutation().last_error().as_deref(),
            Some("Error: while adding dish (HTTP 500)")
        );
        let toasts = toasts.all();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].status, ToastStatus::Error);
        assert!(toasts[0].description.contains("500"));
    }

    #[tokio::test]
    async fn unexpected_error_without_message_gets_default_text() {
        struct Broken;

        #[async_trait]
        impl DishSubmitter for Broken {
            async fn submit(&self, _dish: Dish) -> Result<Value, SubmissionError> {
                Err(SubmissionError::Unexpected(String::new()))
            }
        }

        let toasts = Toasts::default();
        let form = OrderForm::new(Arc::new(DishMutation::new(Broken)), toasts.clone());
        form.fill(DishFormInput {
            name: "Minestrone".into(),
            dish_type: "soup".into(),
            spiciness_scale: "2".into(),
            ..Default::default()
        });

        let outcome = form.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(crate::constants::DEFAULT_ERROR_MSG.to_string())
        );
        assert_eq!(
            toasts.all()[0].description,
            crate::constants::DEFAULT_ERROR_MSG
        );
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_noop() {
        let hold = Arc::new(Notify::new());
        let (form, _toasts) = form_with(FakeBackend {
            hold: Some(hold.clone()),
            ..Default::default()
        });
        fill_margherita(&form);

        let (first, second) = tokio::join!(form.submit(), async {
            while form.state() != FormState::Submitting {
                tokio::task::yield_now().await;
            }
            assert!(form.is_loading());
            assert!(form.mutation().is_loading());
            let second = form.submit().await;
            hold.notify_one();
            second
        });

        assert_eq!(second, SubmitOutcome::Busy);
        assert!(matches!(first, SubmitOutcome::Submitted(_)));
        assert_eq!(calls(&form), 1);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn dropped_submission_releases_form() {
        let hold = Arc::new(Notify::new());
        let (form, _toasts) = form_with(FakeBackend {
            hold: Some(hold),
            ..Default::default()
        });
        fill_margherita(&form);

        let submit = form.submit();
        let timed_out = tokio::time::timeout(Duration::from_millis(20), submit).await;

        assert!(timed_out.is_err());
        assert_eq!(form.state(), FormState::Idle);
    }
}
