//! The scan → review → submit workflow.
//!
//! The QR scanner is the single producer of [ScanEvent]s. They are fed into
//! [ScanWorkflow], whose transition guards decide which events count: only
//! the first decode after opening the scanner is accepted, and a submission
//! cannot start again until the outstanding one resolves.

use std::rc::Rc;

use yew::Reducible;

/// Camera failures that are reported to the user. Every other decoder error
/// (e.g. no code in the current frame) is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanError {
    CameraDenied,
    NoCamera,
}

impl ScanError {
    /// Map a DOM exception name from `getUserMedia` to a reportable error.
    pub fn from_dom_name(name: &str) -> Option<Self> {
        match name {
            "NotAllowedError" => Some(Self::CameraDenied),
            "NotFoundError" => Some(Self::NoCamera),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::CameraDenied => {
                "Camera access was denied. Please allow camera permissions and try again."
            }
            Self::NoCamera => "No camera device found. Please connect a camera and try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScanEvent {
    Decoded(String),
    Failed(ScanError),
}

/// Decoded text under review.
#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub raw: String,
    pub draft: String,
    pub editing: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning {
        error: Option<ScanError>,
    },
    Reviewing(Review),
    Submitting(Review),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScanAction {
    Open,
    Event(ScanEvent),
    Cancel,
    Edit,
    UpdateDraft(String),
    Submit,
    /// The submission request finished, successfully or not.
    Resolved,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanWorkflow {
    pub phase: ScanPhase,
    /// Bumped on every `Reviewing → Submitting` transition so the request
    /// effect fires exactly once per submission.
    pub submission: u32,
}

impl ScanWorkflow {
    pub fn apply(&self, action: ScanAction) -> Self {
        let phase = match (&self.phase, action) {
            (ScanPhase::Idle, ScanAction::Open) => ScanPhase::Scanning { error: None },

            (ScanPhase::Scanning { .. }, ScanAction::Event(ScanEvent::Decoded(text))) => {
                ScanPhase::Reviewing(Review {
                    raw: text.clone(),
                    draft: text,
                    editing: false,
                })
            }
            (ScanPhase::Scanning { .. }, ScanAction::Event(ScanEvent::Failed(error))) => {
                ScanPhase::Scanning { error: Some(error) }
            }
            (ScanPhase::Scanning { .. }, ScanAction::Cancel) => ScanPhase::Idle,

            (ScanPhase::Reviewing(review), ScanAction::Edit) => ScanPhase::Reviewing(Review {
                editing: true,
                ..review.clone()
            }),
            (ScanPhase::Reviewing(review), ScanAction::UpdateDraft(draft)) if review.editing => {
                ScanPhase::Reviewing(Review {
                    draft,
                    ..review.clone()
                })
            }
            (ScanPhase::Reviewing(_), ScanAction::Cancel) => ScanPhase::Idle,
            (ScanPhase::Reviewing(review), ScanAction::Submit) => {
                return Self {
                    phase: ScanPhase::Submitting(review.clone()),
                    submission: self.submission.wrapping_add(1),
                };
            }

            (ScanPhase::Submitting(_), ScanAction::Resolved) => ScanPhase::Idle,

            (_, action) => {
                log::debug!("scan workflow ignored {:?} in {:?}", action, self.phase);
                return self.clone();
            }
        };

        Self {
            phase,
            submission: self.submission,
        }
    }

    pub fn is_scanner_open(&self) -> bool {
        matches!(self.phase, ScanPhase::Scanning { .. })
    }

    pub fn scanner_error(&self) -> Option<ScanError> {
        match self.phase {
            ScanPhase::Scanning { error } => error,
            _ => None,
        }
    }

    /// The review shown in the result modal, if it is open.
    pub fn review(&self) -> Option<&Review> {
        match &self.phase {
            ScanPhase::Reviewing(review) | ScanPhase::Submitting(review) => Some(review),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, ScanPhase::Submitting(_))
    }

    /// The text to send while a submission is outstanding.
    pub fn pending_submission(&self) -> Option<&str> {
        match &self.phase {
            ScanPhase::Submitting(review) => Some(&review.draft),
            _ => None,
        }
    }
}

impl Reducible for ScanWorkflow {
    type Action = ScanAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(actions: impl IntoIterator<Item = ScanAction>) -> ScanWorkflow {
        actions
            .into_iter()
            .fold(ScanWorkflow::default(), |workflow, action| workflow.apply(action))
    }

    fn decoded(text: &str) -> ScanAction {
        ScanAction::Event(ScanEvent::Decoded(text.to_string()))
    }

    #[test]
    fn first_decode_opens_review_and_closes_scanner() {
        let workflow = run([ScanAction::Open, decoded("Coffee 3.50")]);

        assert!(!workflow.is_scanner_open());
        assert_eq!(
            workflow.review(),
            Some(&Review {
                raw: "Coffee 3.50".to_string(),
                draft: "Coffee 3.50".to_string(),
                editing: false,
            })
        );
    }

    #[test]
    fn later_decodes_do_not_overwrite_review() {
        let workflow = run([ScanAction::Open, decoded("first"), decoded("second")]);

        assert_eq!(workflow.review().map(|r| r.raw.as_str()), Some("first"));
    }

    #[test]
    fn decode_before_opening_scanner_is_ignored() {
        let workflow = run([decoded("stray")]);

        assert_eq!(workflow.phase, ScanPhase::Idle);
    }

    #[test]
    fn device_error_keeps_scanner_open_with_message() {
        let workflow = run([
            ScanAction::Open,
            ScanAction::Event(ScanEvent::Failed(ScanError::CameraDenied)),
        ]);

        assert!(workflow.is_scanner_open());
        assert_eq!(workflow.scanner_error(), Some(ScanError::CameraDenied));
    }

    #[test]
    fn cancelling_scanner_resets_so_next_open_accepts_a_decode() {
        let workflow = run([ScanAction::Open, ScanAction::Cancel, ScanAction::Open, decoded("again")]);

        assert_eq!(workflow.review().map(|r| r.raw.as_str()), Some("again"));
    }

    #[test]
    fn draft_only_changes_while_editing() {
        let read_only = run([
            ScanAction::Open,
            decoded("Taxi 12"),
            ScanAction::UpdateDraft("Taxi 15".to_string()),
        ]);
        let editing = run([
            ScanAction::Open,
            decoded("Taxi 12"),
            ScanAction::Edit,
            ScanAction::UpdateDraft("Taxi 15".to_string()),
        ]);

        assert_eq!(read_only.review().unwrap().draft, "Taxi 12");
        assert_eq!(editing.review().unwrap().draft, "Taxi 15");
        assert_eq!(editing.review().unwrap().raw, "Taxi 12");
    }

    #[test]
    fn submit_sends_edited_draft() {
        let workflow = run([
            ScanAction::Open,
            decoded("Taxi 12"),
            ScanAction::Edit,
            ScanAction::UpdateDraft("Taxi 15".to_string()),
            ScanAction::Submit,
        ]);

        assert!(workflow.is_submitting());
        assert_eq!(workflow.pending_submission(), Some("Taxi 15"));
        assert_eq!(workflow.submission, 1);
    }

    #[test]
    fn second_submit_while_outstanding_is_a_no_op() {
        let once = run([ScanAction::Open, decoded("x"), ScanAction::Submit]);
        let twice = once.apply(ScanAction::Submit);

        assert_eq!(twice, once);
        assert_eq!(twice.submission, 1);
    }

    #[test]
    fn late_decodes_and_reopen_leave_submission_alone() {
        let submitting = run([ScanAction::Open, decoded("x"), ScanAction::Submit]);

        let after = submitting.apply(decoded("y")).apply(ScanAction::Open);

        assert_eq!(after, submitting);
        assert_eq!(after.pending_submission(), Some("x"));
        assert_eq!(after.submission, 1);
    }

    #[test]
    fn cancel_is_ignored_while_submitting() {
        let submitting = run([ScanAction::Open, decoded("x"), ScanAction::Submit]);

        assert_eq!(submitting.apply(ScanAction::Cancel), submitting);
    }

    #[test]
    fn resolving_returns_to_idle_and_allows_a_new_scan() {
        let workflow = run([
            ScanAction::Open,
            decoded("x"),
            ScanAction::Submit,
            ScanAction::Resolved,
            ScanAction::Open,
            decoded("y"),
            ScanAction::Submit,
        ]);

        assert_eq!(workflow.pending_submission(), Some("y"));
        assert_eq!(workflow.submission, 2);
    }

    #[test]
    fn resolved_outside_submission_is_ignored() {
        let reviewing = run([ScanAction::Open, decoded("x")]);

        assert_eq!(reviewing.apply(ScanAction::Resolved), reviewing);
    }

    #[test]
    fn reducer_keeps_same_state_for_ignored_actions() {
        let state = Rc::new(ScanWorkflow::default());

        let next = state.clone().reduce(ScanAction::Submit);

        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn maps_dom_error_names() {
        assert_eq!(ScanError::from_dom_name("NotAllowedError"), Some(ScanError::CameraDenied));
        assert_eq!(ScanError::from_dom_name("NotFoundError"), Some(ScanError::NoCamera));
        assert_eq!(ScanError::from_dom_name("NotFoundException"), None);
        assert_eq!(ScanError::from_dom_name("OverconstrainedError"), None);
    }
}
