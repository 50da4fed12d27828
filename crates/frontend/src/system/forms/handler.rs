use std::cell::Cell;

use contracts::system::forms::{FormSubmission, StatusMessage};
use uuid::Uuid;

use super::api::Transport;
use crate::shared::config::FormConfig;

/// Result of one call to [`FormSubmitHandler::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 2xx response
    Succeeded(StatusMessage),
    /// Non-2xx response; the backend's error is in the status
    Rejected(StatusMessage),
    /// No usable response (network failure or unparseable body)
    Failed(StatusMessage),
    /// Dropped because a submission of this form was still running
    Busy,
}

impl SubmitOutcome {
    pub fn status(&self) -> Option<&StatusMessage> {
        match self {
            SubmitOutcome::Succeeded(s) | SubmitOutcome::Rejected(s) | SubmitOutcome::Failed(s) => {
                Some(s)
            }
            SubmitOutcome::Busy => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    /// What the form does after this outcome, beyond showing the status.
    pub fn follow_up(&self, form: &FormConfig) -> FollowUp {
        if !self.is_success() {
            return FollowUp::default();
        }
        FollowUp {
            reset_form: form.reset_on_success,
            notice: form.success_notice.clone(),
        }
    }
}

/// Actions taken on a successful submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowUp {
    /// Clear every field of the form
    pub reset_form: bool,
    /// Confirmation to show in the notice region
    pub notice: Option<String>,
}

/// Posts a form's fields to one endpoint and reports the result as a
/// [`StatusMessage`].
///
/// One handler serves one form. It refuses to start a second request while
/// one is running; the flag is released when the running attempt ends,
/// whatever the outcome. Nothing is retried, timed out or cancelled.
pub struct FormSubmitHandler<T> {
    transport: T,
    url: String,
    in_flight: Cell<bool>,
}

impl<T: Transport> FormSubmitHandler<T> {
    pub fn new(transport: T, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
            in_flight: Cell::new(false),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Send `submission` and drive the status display through `show`.
    ///
    /// `show` receives `Processing...` before the request goes out and the
    /// final status once it resolves. It is not called for a busy drop.
    pub async fn submit<F>(&self, submission: FormSubmission, show: F) -> SubmitOutcome
    where
        F: Fn(StatusMessage),
    {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            log::debug!("{}: submission already in flight, ignoring", self.url);
            return SubmitOutcome::Busy;
        };

        let attempt = Uuid::new_v4();
        log::debug!(
            "{}: submitting {} field(s), attempt {}",
            self.url,
            submission.len(),
            attempt
        );
        show(StatusMessage::processing());

        let outcome = match self.transport.post_json(&self.url, &submission).await {
            Ok(response) if response.ok() => {
                SubmitOutcome::Succeeded(StatusMessage::from_reply(true, &response.reply))
            }
            Ok(response) => {
                log::error!(
                    "{}: backend error {} (attempt {}): {:?}",
                    self.url,
                    response.status,
                    attempt,
                    response.reply.error
                );
                SubmitOutcome::Rejected(StatusMessage::from_reply(false, &response.reply))
            }
            Err(e) => {
                log::error!("{}: fetch error (attempt {}): {}", self.url, attempt, e);
                SubmitOutcome::Failed(StatusMessage::network_failure())
            }
        };

        if let Some(status) = outcome.status() {
            show(status.clone());
        }
        outcome
    }
}

/// Holds the in-flight flag for the lifetime of one attempt.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
