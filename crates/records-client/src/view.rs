//! View state for list pages and entry forms.
//!
//! Lists re-fetch on demand and forms reset after a successful submission.
//! There is no cancellation; the last answer wins.

use std::future::Future;

use crate::error::ClientError;

/// State of a list page.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded(Vec<T>),
    /// The last fetch failed with this message.
    Failed(String),
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> ListView<T> {
    /// A page waiting for its first fetch.
    #[must_use]
    pub const fn new() -> Self {
        Self::Loading
    }

    /// Re-enter [`ListView::Loading`] ahead of a new fetch.
    pub fn refresh(&mut self) {
        *self = Self::Loading;
    }

    /// Record the outcome of a fetch.
    pub fn resolve(&mut self, result: Result<Vec<T>, ClientError>) {
        *self = match result {
            Ok(items) => Self::Loaded(items),
            Err(err) => Self::Failed(err.user_message()),
        };
    }

    /// Refresh, await `fetch`, then record its outcome.
    pub async fn load<F>(&mut self, fetch: F)
    where
        F: Future<Output = Result<Vec<T>, ClientError>>,
    {
        self.refresh();
        self.resolve(fetch.await);
    }

    /// Loaded items; empty while loading or after a failure.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items.as_slice(),
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    /// Failure message of the last fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            Self::Loading | Self::Loaded(_) => None,
        }
    }

    /// True while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Submission status of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The last submission succeeded and the form was reset.
    Succeeded,
    /// The last submission failed; the draft is kept for another attempt.
    Failed(String),
}

/// An entry form holding a draft of type `D`.
///
/// # Examples
/// ```
/// use records_client::{FormState, FormStatus, StudentInput};
///
/// let mut form = FormState::<StudentInput>::new();
/// form.draft_mut().name = "Ada".to_owned();
/// let draft = form.begin_submit().expect("idle form submits");
/// assert_eq!(draft.name, "Ada");
/// assert_eq!(form.status(), &FormStatus::Submitting);
/// assert!(form.begin_submit().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState<D> {
    draft: D,
    status: FormStatus,
}

impl<D: Clone + Default> FormState<D> {
    /// An idle form with a default draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft.
    #[must_use]
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    /// Draft for editing.
    pub const fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Enter [`FormStatus::Submitting`] and hand out the draft to send.
    ///
    /// Returns `None` while a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<D> {
        if self.status == FormStatus::Submitting {
            return None;
        }
        self.status = FormStatus::Submitting;
        Some(self.draft.clone())
    }

    /// Record the outcome of the in-flight submission.
    ///
    /// Success resets the draft; failure keeps it and stores the message.
    pub fn finish<T>(&mut self, result: Result<T, ClientError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.draft = D::default();
                self.status = FormStatus::Succeeded;
                Some(value)
            }
            Err(err) => {
                self.status = FormStatus::Failed(err.user_message());
                None
            }
        }
    }

    /// Submit the draft through `send` and record the outcome.
    pub async fn submit<T, F, Fut>(&mut self, send: F) -> Option<T>
    where
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let draft = self.begin_submit()?;
        let result = send(draft).await;
        self.finish(result)
    }
}
