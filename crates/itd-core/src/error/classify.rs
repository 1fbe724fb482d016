//! Per-endpoint error classification.
//!
//! The same API code means different things on different endpoints
//! (`VALIDATION_ERROR` is a field error on profile update but "cannot repost
//! your own post" on repost). Each endpoint therefore declares a static
//! [`ErrorTable`]: rules checked in order, first match wins, with
//! [`ApiFault::Unclassified`] as the explicit default.
//!
//! Message predicates exist only for business conditions the API does not
//! give a distinct code. They are either exact (`when_message_is`) or
//! substring matches (`when_message`).

use super::{ApiError, ApiFault, Error, TransportError};

/// What a rule reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A decoded envelope with this code.
    Code(&'static str),
    /// A non-2xx response without an envelope.
    Status(u16),
}

/// Which entry of the `found` validation map drives a validation fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundEntry {
    First,
    Last,
}

/// The fault a matching rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    NotFound(&'static str),
    NotFoundOrForbidden(&'static str),
    Forbidden(&'static str),
    UserBanned,
    UsernameTaken,
    /// Matches only when the envelope carries a non-empty `found` map.
    Validation(FoundEntry),
    CantFollowYourself,
    CantRepostYourPost,
    AlreadyReposted,
    AlreadyReported(&'static str),
    TooLarge,
    PinNotOwned,
    PendingRequestExists,
    SamePassword,
    InvalidOldPassword,
    NoContent,
    NotVerified,
}

impl FaultKind {
    fn build(self, error: Option<&ApiError>) -> Option<ApiFault> {
        let fault = match self {
            FaultKind::NotFound(subject) => ApiFault::NotFound(subject),
            FaultKind::NotFoundOrForbidden(subject) => ApiFault::NotFoundOrForbidden(subject),
            FaultKind::Forbidden(action) => ApiFault::Forbidden(action),
            FaultKind::UserBanned => ApiFault::UserBanned,
            FaultKind::UsernameTaken => ApiFault::UsernameTaken,
            FaultKind::Validation(entry) => {
                let error = error?;
                let (field, reason) = match entry {
                    FoundEntry::First => error.first_found(),
                    FoundEntry::Last => error.last_found(),
                }?;
                ApiFault::Validation { field, reason }
            }
            FaultKind::CantFollowYourself => ApiFault::CantFollowYourself,
            FaultKind::CantRepostYourPost => ApiFault::CantRepostYourPost,
            FaultKind::AlreadyReposted => ApiFault::AlreadyReposted,
            FaultKind::AlreadyReported(subject) => ApiFault::AlreadyReported(subject),
            FaultKind::TooLarge => ApiFault::TooLarge,
            FaultKind::PinNotOwned => ApiFault::PinNotOwned,
            FaultKind::PendingRequestExists => ApiFault::PendingRequestExists,
            FaultKind::SamePassword => ApiFault::SamePassword,
            FaultKind::InvalidOldPassword => ApiFault::InvalidOldPassword,
            FaultKind::NoContent => ApiFault::NoContent,
            FaultKind::NotVerified => ApiFault::NotVerified,
        };
        Some(fault)
    }
}

/// A predicate on the envelope message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageMatch {
    /// The message equals this text.
    Equals(&'static str),
    /// The message contains any of these needles.
    Contains(&'static [&'static str]),
}

impl MessageMatch {
    fn matches(self, message: &str) -> bool {
        match self {
            MessageMatch::Equals(text) => message == text,
            MessageMatch::Contains(needles) => needles.iter().any(|n| message.contains(n)),
        }
    }
}

/// One `(trigger, optional message predicate) -> fault` entry.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    trigger: Trigger,
    message: Option<MessageMatch>,
    kind: FaultKind,
}

impl Rule {
    /// Match a decoded envelope by code.
    pub const fn code(code: &'static str, kind: FaultKind) -> Self {
        Self {
            trigger: Trigger::Code(code),
            message: None,
            kind,
        }
    }

    /// Match a bare HTTP status.
    pub const fn status(status: u16, kind: FaultKind) -> Self {
        Self {
            trigger: Trigger::Status(status),
            message: None,
            kind,
        }
    }

    /// Additionally require the message to contain any of `needles`.
    pub const fn when_message(self, needles: &'static [&'static str]) -> Self {
        Self {
            message: Some(MessageMatch::Contains(needles)),
            ..self
        }
    }

    /// Additionally require the message to be exactly `text`.
    pub const fn when_message_is(self, text: &'static str) -> Self {
        Self {
            message: Some(MessageMatch::Equals(text)),
            ..self
        }
    }

    fn matches_error(&self, error: &ApiError) -> bool {
        let Trigger::Code(code) = self.trigger else {
            return false;
        };
        if error.code != code {
            return false;
        }
        self.message.is_none_or(|m| m.matches(&error.message))
    }
}

/// An ordered rule table for one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTable {
    name: &'static str,
    rules: &'static [Rule],
}

impl ErrorTable {
    /// A table with no rules: every envelope is unclassified.
    pub const EMPTY: ErrorTable = ErrorTable::new("default", &[]);

    pub const fn new(name: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, rules }
    }

    /// Endpoint name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Classify a decoded API error. Never fails: the default is
    /// [`ApiFault::Unclassified`].
    pub fn classify(&self, error: ApiError) -> ApiFault {
        self.rules
            .iter()
            .filter(|rule| rule.matches_error(&error))
            .find_map(|rule| rule.kind.build(Some(&error)))
            .unwrap_or(ApiFault::Unclassified(error))
    }

    /// Classify a bare HTTP status, if the table has a rule for it.
    pub fn classify_status(&self, status: u16) -> Option<ApiFault> {
        self.rules
            .iter()
            .filter(|rule| rule.trigger == Trigger::Status(status))
            .find_map(|rule| rule.kind.build(None))
    }

    /// Re-classify a raised fault. Status faults with a matching rule become
    /// API faults; everything else passes through.
    pub fn refine(&self, error: Error) -> Error {
        match error {
            Error::Transport(TransportError::Status { status, body }) => {
                match self.classify_status(status) {
                    Some(fault) => Error::Api(fault),
                    None => Error::Transport(TransportError::Status { status, body }),
                }
            }
            other => other,
        }
    }
}

impl Default for ErrorTable {
    fn default() -> Self {
        Self::EMPTY
    }
}
