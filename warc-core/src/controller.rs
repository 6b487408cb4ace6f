//! The request-form controller shared by every page.
//!
//! A submission runs in three steps so the network call does not borrow the
//! controller:
//!
//! 1. [`FormController::begin_submit`] validates the form, moves the status
//!    to loading and hands out a numbered [`Submission`].
//! 2. [`Submission::dispatch`] issues the single POST and produces a
//!    [`Completion`].
//! 3. [`FormController::complete`] applies the completion, or discards it when
//!    a newer submission has been issued since.
//!
//! [`FormController::submit`] chains the three for the common case.

use std::{fmt, marker::PhantomData};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    form::{FormError, FormState},
    pages::Page,
    service::{PredictionService, ServiceError},
    status::{Status, StatusEvent},
    view::ResultView,
};

/// Whether a completion changed the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// A newer submission was issued after this one; nothing changed.
    Stale,
}

pub struct FormController<P: Page> {
    form: FormState,
    endpoint: String,
    status: Status,
    result: Option<P::Response>,
    error: Option<&'static str>,
    /// Sequence number of the latest issued submission, 0 before the first.
    latest: u64,
}

impl<P: Page> FormController<P> {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            form: FormState::new(P::SCHEMA),
            endpoint: endpoint.into(),
            status: Status::Idle,
            result: None,
            error: None,
            latest: 0,
        }
    }

    /// Controller pointed at the page's default endpoint.
    pub fn with_default_endpoint() -> Self {
        Self::new(P::KIND.default_endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn result(&self) -> Option<&P::Response> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Presentation of the current result, if any.
    pub fn view(&self) -> Option<ResultView> {
        self.result.as_ref().map(P::view)
    }

    pub fn update_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.form.update_field(name, value)
    }

    /// Restores the form defaults. Result, error and status are kept.
    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// Validates the form and issues a new numbered submission.
    ///
    /// On a validation failure the controller is left exactly as it was.
    pub fn begin_submit(&mut self) -> Result<Submission<P>, FormError> {
        let valid = self.form.validate()?;
        let request = P::build_request(&valid)?;

        self.latest += 1;
        self.status = self.status.on(StatusEvent::Submitted);
        self.error = None;

        info!(
            page = %P::KIND,
            seq = self.latest,
            endpoint = %self.endpoint,
            "Submitting form"
        );

        Ok(Submission {
            seq: self.latest,
            endpoint: self.endpoint.clone(),
            request,
            _page: PhantomData,
        })
    }

    /// Applies a finished submission if it is the latest one issued.
    pub fn complete(
        &mut self,
        completion: Completion<P>,
    ) -> Applied {
        if completion.seq != self.latest {
            debug!(
                page = %P::KIND,
                seq = completion.seq,
                latest = self.latest,
                "Discarding stale completion"
            );
            return Applied::Stale;
        }

        match completion.outcome {
            Ok(response) => {
                info!(page = %P::KIND, seq = completion.seq, "Submission succeeded");
                self.result = Some(response);
                self.error = None;
                self.status = self.status.on(StatusEvent::Resolved);
            }
            Err(err) => {
                warn!(
                    page = %P::KIND,
                    seq = completion.seq,
                    error = %err,
                    "Submission failed"
                );
                self.result = None;
                self.error = Some(P::ERROR_MESSAGE);
                self.status = self.status.on(StatusEvent::Failed);
            }
        }

        Applied::Accepted
    }

    /// Validates, sends and applies one submission.
    ///
    /// Only form errors are returned; service failures end up in
    /// [`error`](Self::error) and [`status`](Self::status).
    pub async fn submit(
        &mut self,
        service: &dyn PredictionService,
    ) -> Result<Applied, FormError> {
        let submission = self.begin_submit()?;
        let completion = submission.dispatch(service).await;
        Ok(self.complete(completion))
    }
}

impl<P: Page> fmt::Debug for FormController<P> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("FormController")
            .field("page", &P::KIND)
            .field("endpoint", &self.endpoint)
            .field("status", &self.status)
            .field("result", &self.result)
            .field("error", &self.error)
            .field("latest", &self.latest)
            .finish()
    }
}

/// One issued request, detached from the controller.
pub struct Submission<P: Page> {
    seq: u64,
    endpoint: String,
    request: P::Request,
    _page: PhantomData<fn() -> P>,
}

impl<P: Page> Submission<P> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &P::Request {
        &self.request
    }

    /// Sends the request once and decodes the page response.
    pub async fn dispatch(
        self,
        service: &dyn PredictionService,
    ) -> Completion<P> {
        let outcome = self.send(service).await;
        Completion {
            seq: self.seq,
            outcome,
        }
    }

    async fn send(
        &self,
        service: &dyn PredictionService,
    ) -> Result<P::Response, ServiceError> {
        let body = serde_json::to_value(&self.request).map_err(|e| {
            ServiceError::Configuration(format!("request body could not be encoded: {e}"))
        })?;
        debug!(page = %P::KIND, seq = self.seq, body = %body, "Request payload");

        let response: Value = service.post_json(&self.endpoint, &body).await?;
        debug!(page = %P::KIND, seq = self.seq, body = %response, "Response payload");

        serde_json::from_value(response).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

/// Outcome of a dispatched [`Submission`].
pub struct Completion<P: Page> {
    seq: u64,
    outcome: Result<P::Response, ServiceError>,
}

impl<P: Page> Completion<P> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn outcome(&self) -> Result<&P::Response, &ServiceError> {
        self.outcome.as_ref()
    }
}
