//! Contact-form submission pipeline.
//!
//! A submission runs through ordered gates (in-flight check, required
//! fields, email syntax) and only then reaches the delivery capability.
//! The first failing gate stops the pipeline with a localized message key
//! and no network traffic. Delivery is attempted exactly once; a failure is
//! reported back for the user to retry manually.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;

use crate::config::LocaleConfig;
use crate::emailjs::DeliveryError;

/// Fixed recipient name expected by the email template.
pub const RECIPIENT_NAME: &str = "JASPER Systems";

/// Raw field values collected from the form. Not persisted anywhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub service: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionUiState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a required field is empty")]
    MissingRequired,
    #[error("email address is malformed")]
    InvalidEmail,
}

impl ValidationError {
    /// The localized message shown for this gate failure.
    pub fn user_message(&self, config: &'static LocaleConfig) -> &'static str {
        match self {
            ValidationError::MissingRequired => config.form.validation.required,
            ValidationError::InvalidEmail => config.form.validation.email,
        }
    }
}

/// Parameter map of the delivery template, field names fixed by the
/// template on the EmailJS side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub company: String,
    pub service: String,
    pub message: String,
    pub to_name: String,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// A submission is already in flight; this trigger was dropped.
    AlreadyInFlight,
    /// A validation gate failed; no delivery was attempted.
    Rejected(ValidationError),
    Delivered,
    Failed(DeliveryError),
}

/// UI consequences of a finished pipeline run, applied by the page once the
/// outcome is known. Kept as plain data so the success/failure contract is
/// testable without a rendered form.
#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeEffects {
    /// Success clears the fields; failure keeps them for a manual retry.
    pub clear_fields: bool,
    pub success: bool,
    pub message: String,
    /// State reached by the outcome itself.
    pub transient: SubmissionUiState,
    /// Finalization state; always idle, restoring the submit button.
    pub settled: SubmissionUiState,
}

impl SubmissionOutcome {
    /// `None` for a dropped duplicate trigger, which must leave the page
    /// untouched.
    pub fn effects(&self, config: &'static LocaleConfig) -> Option<OutcomeEffects> {
        let effects = match self {
            SubmissionOutcome::AlreadyInFlight => return None,
            SubmissionOutcome::Rejected(err) => OutcomeEffects {
                clear_fields: false,
                success: false,
                message: err.user_message(config).to_string(),
                transient: SubmissionUiState::Idle,
                settled: SubmissionUiState::Idle,
            },
            SubmissionOutcome::Delivered => OutcomeEffects {
                clear_fields: true,
                success: true,
                message: config.form.success.to_string(),
                transient: SubmissionUiState::Succeeded,
                settled: SubmissionUiState::Idle,
            },
            SubmissionOutcome::Failed(_) => OutcomeEffects {
                clear_fields: false,
                success: false,
                message: config.form.error.to_string(),
                transient: SubmissionUiState::Failed,
                settled: SubmissionUiState::Idle,
            },
        };
        Some(effects)
    }
}

/// Matches the original `/^[^\s@]+@[^\s@]+\.[^\s@]+$/` check: exactly one
/// `@`, no whitespace, and a dot with something on both sides in the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() => match domain.rsplit_once('.') {
            Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
            None => false,
        },
        _ => false,
    }
}

impl FormSubmission {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(ValidationError::MissingRequired);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Maps the fields onto the template parameters. Empty optional fields
    /// are replaced with the locale's "not provided" placeholder.
    pub fn template_params(&self, config: &'static LocaleConfig) -> TemplateParams {
        let optional = |value: &str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                config.form.not_provided.to_string()
            } else {
                trimmed.to_string()
            }
        };
        TemplateParams {
            from_name: self.name.trim().to_string(),
            from_email: self.email.trim().to_string(),
            company: optional(&self.company),
            service: optional(&self.service),
            message: self.message.trim().to_string(),
            to_name: RECIPIENT_NAME.to_string(),
        }
    }
}

/// Runs the full pipeline. `on_accepted` fires once every gate has passed,
/// right before the delivery call, so the caller can flip its UI into the
/// submitting state. `deliver` is invoked at most once.
pub async fn run_submission<F, Fut>(
    values: &FormSubmission,
    state: SubmissionUiState,
    config: &'static LocaleConfig,
    on_accepted: impl FnOnce(),
    deliver: F,
) -> SubmissionOutcome
where
    F: FnOnce(TemplateParams) -> Fut,
    Fut: Future<Output = Result<(), DeliveryError>>,
{
    if state == SubmissionUiState::Submitting {
        return SubmissionOutcome::AlreadyInFlight;
    }
    if let Err(err) = values.validate() {
        return SubmissionOutcome::Rejected(err);
    }
    on_accepted();
    match deliver(values.template_params(config)).await {
        Ok(()) => SubmissionOutcome::Delivered,
        Err(err) => SubmissionOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{config_for, Locale};
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    fn filled() -> FormSubmission {
        FormSubmission {
            name: "Jan Novák".to_string(),
            email: "jan@example.com".to_string(),
            company: String::new(),
            service: String::new(),
            message: "Dobrý den, mám zájem o konzultaci.".to_string(),
        }
    }

    fn counting_delivery(
        calls: &Rc<Cell<usize>>,
        result: Result<(), DeliveryError>,
    ) -> impl FnOnce(TemplateParams) -> futures::future::Ready<Result<(), DeliveryError>> {
        let calls = calls.clone();
        move |_| {
            calls.set(calls.get() + 1);
            futures::future::ready(result)
        }
    }

    #[test]
    fn email_syntax_gate() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jan.novak@firma.example.cz"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn empty_message_never_reaches_delivery() {
        let config = config_for(Locale::Cs);
        let calls = Rc::new(Cell::new(0));
        let mut values = filled();
        values.message = "   ".to_string();

        let outcome = block_on(run_submission(
            &values,
            SubmissionUiState::Idle,
            config,
            || {},
            counting_delivery(&calls, Ok(())),
        ));

        assert!(matches!(
            outcome,
            SubmissionOutcome::Rejected(ValidationError::MissingRequired)
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn malformed_email_is_rejected_before_delivery() {
        let config = config_for(Locale::En);
        let calls = Rc::new(Cell::new(0));
        let mut values = filled();
        values.email = "not-an-email".to_string();

        let outcome = block_on(run_submission(
            &values,
            SubmissionUiState::Idle,
            config,
            || {},
            counting_delivery(&calls, Ok(())),
        ));

        match outcome {
            SubmissionOutcome::Rejected(err) => {
                assert_eq!(err, ValidationError::InvalidEmail);
                assert_eq!(err.user_message(config), config.form.validation.email);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn in_flight_submission_drops_the_duplicate() {
        let config = config_for(Locale::Cs);
        let calls = Rc::new(Cell::new(0));

        let first = block_on(run_submission(
            &filled(),
            SubmissionUiState::Idle,
            config,
            || {},
            counting_delivery(&calls, Ok(())),
        ));
        let second = block_on(run_submission(
            &filled(),
            SubmissionUiState::Submitting,
            config,
            || {},
            counting_delivery(&calls, Ok(())),
        ));

        assert!(matches!(first, SubmissionOutcome::Delivered));
        assert!(matches!(second, SubmissionOutcome::AlreadyInFlight));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn accepted_hook_fires_only_after_all_gates() {
        let config = config_for(Locale::Cs);
        let accepted = Rc::new(Cell::new(false));

        let mut values = filled();
        values.name.clear();
        let flag = accepted.clone();
        let _ = block_on(run_submission(
            &values,
            SubmissionUiState::Idle,
            config,
            move || flag.set(true),
            |_| futures::future::ready(Ok(())),
        ));
        assert!(!accepted.get());

        let flag = accepted.clone();
        let _ = block_on(run_submission(
            &filled(),
            SubmissionUiState::Idle,
            config,
            move || flag.set(true),
            |_| futures::future::ready(Ok(())),
        ));
        assert!(accepted.get());
    }

    #[test]
    fn delivery_failure_is_surfaced() {
        let config = config_for(Locale::Cs);
        let calls = Rc::new(Cell::new(0));

        let outcome = block_on(run_submission(
            &filled(),
            SubmissionUiState::Idle,
            config,
            || {},
            counting_delivery(
                &calls,
                Err(DeliveryError::Rejected {
                    status: 400,
                    body: "bad template".to_string(),
                }),
            ),
        ));

        assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn optional_fields_use_the_locale_placeholder() {
        let values = filled();

        let cs = values.template_params(config_for(Locale::Cs));
        assert_eq!(cs.company, "Neuvedeno");
        assert_eq!(cs.service, "Neuvedeno");

        let en = values.template_params(config_for(Locale::En));
        assert_eq!(en.company, "Not provided");
        assert_eq!(en.service, "Not provided");
        assert_eq!(en.to_name, RECIPIENT_NAME);
        assert_eq!(en.from_email, "jan@example.com");
    }

    #[test]
    fn success_clears_fields_and_failure_preserves_them() {
        let config = config_for(Locale::En);

        let delivered = SubmissionOutcome::Delivered.effects(config).unwrap();
        assert!(delivered.clear_fields);
        assert!(delivered.success);
        assert_eq!(delivered.message, config.form.success);
        assert_eq!(delivered.transient, SubmissionUiState::Succeeded);

        let failed = SubmissionOutcome::Failed(DeliveryError::TimedOut)
            .effects(config)
            .unwrap();
        assert!(!failed.clear_fields);
        assert!(!failed.success);
        assert_eq!(failed.message, config.form.error);
        assert_eq!(failed.transient, SubmissionUiState::Failed);

        // The submit button is restored either way.
        assert_eq!(delivered.settled, SubmissionUiState::Idle);
        assert_eq!(failed.settled, SubmissionUiState::Idle);
    }

    #[test]
    fn rejected_and_duplicate_outcomes_touch_nothing_but_the_message() {
        let config = config_for(Locale::Cs);

        let rejected = SubmissionOutcome::Rejected(ValidationError::InvalidEmail)
            .effects(config)
            .unwrap();
        assert!(!rejected.clear_fields);
        assert_eq!(rejected.message, config.form.validation.email);
        assert_eq!(rejected.settled, SubmissionUiState::Idle);

        assert!(SubmissionOutcome::AlreadyInFlight.effects(config).is_none());
    }

    #[test]
    fn provided_optional_fields_pass_through() {
        let mut values = filled();
        values.company = " Trading s.r.o. ".to_string();
        values.service = "Konzultace".to_string();

        let params = values.template_params(config_for(Locale::Cs));
        assert_eq!(params.company, "Trading s.r.o.");
        assert_eq!(params.service, "Konzultace");
    }
}
