//! User facing notifications.
//!
//! One notice is visible at a time; showing a new one replaces the current
//! one. Each notice carries an id so a delayed auto-dismiss only removes the
//! notice it was scheduled for.

use std::{
    rc::Rc,
    sync::atomic::{AtomicU32, Ordering},
};

use yew::{Reducible, UseReducerHandle};

static NEXT_NOTICE_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
    /// Auto-dismiss delay in milliseconds.
    pub timeout_ms: u32,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: &str, text: &str, timeout_ms: u32) -> Self {
        Self {
            id: NEXT_NOTICE_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            title: title.to_string(),
            text: text.to_string(),
            timeout_ms,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeBoard {
    pub current: Option<Notice>,
}

pub enum NoticeAction {
    Show(Notice),
    Dismiss(u32),
}

impl NoticeBoard {
    pub fn apply(&self, action: NoticeAction) -> Self {
        match action {
            NoticeAction::Show(notice) => Self {
                current: Some(notice),
            },
            NoticeAction::Dismiss(id) => match &self.current {
                Some(notice) if notice.id == id => Self::default(),
                _ => self.clone(),
            },
        }
    }
}

impl Reducible for NoticeBoard {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/// Handle used by components to raise notices.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    board: UseReducerHandle<NoticeBoard>,
    /// Timeout for errors and warnings.
    sticky_timeout_ms: u32,
}

impl Notifier {
    pub fn new(board: UseReducerHandle<NoticeBoard>, sticky_timeout_ms: u32) -> Self {
        Self {
            board,
            sticky_timeout_ms,
        }
    }

    pub fn success(&self, title: &str, text: &str, timeout_ms: u32) {
        self.show(Notice::new(NoticeKind::Success, title, text, timeout_ms));
    }

    pub fn warning(&self, title: &str, text: &str) {
        self.show(Notice::new(
            NoticeKind::Warning,
            title,
            text,
            self.sticky_timeout_ms,
        ));
    }

    pub fn error(&self, text: &str) {
        self.show(Notice::new(
            NoticeKind::Error,
            "Error",
            text,
            self.sticky_timeout_ms,
        ));
    }

    pub fn dismiss(&self, id: u32) {
        self.board.dispatch(NoticeAction::Dismiss(id));
    }

    fn show(&self, notice: Notice) {
        let id = notice.id;
        let timeout_ms = notice.timeout_ms;
        self.board.dispatch(NoticeAction::Show(notice));

        let board = self.board.clone();
        gloo_timers::callback::Timeout::new(timeout_ms, move || {
            board.dispatch(NoticeAction::Dismiss(id));
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Notice::new(NoticeKind::Success, "a", "", 10);
        let b = Notice::new(NoticeKind::Success, "b", "", 10);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn new_notice_replaces_current() {
        let first = Notice::new(NoticeKind::Error, "Error", "first", 10);
        let second = Notice::new(NoticeKind::Success, "Done", "second", 10);

        let board = NoticeBoard::default()
            .apply(NoticeAction::Show(first))
            .apply(NoticeAction::Show(second.clone()));

        assert_eq!(board.current, Some(second));
    }

    #[test]
    fn stale_dismiss_keeps_newer_notice() {
        let first = Notice::new(NoticeKind::Error, "Error", "first", 10);
        let second = Notice::new(NoticeKind::Success, "Done", "second", 10);
        let first_id = first.id;

        let board = NoticeBoard::default()
            .apply(NoticeAction::Show(first))
            .apply(NoticeAction::Show(second.clone()))
            .apply(NoticeAction::Dismiss(first_id));

        assert_eq!(board.current, Some(second));
    }

    #[test]
    fn dismiss_removes_matching_notice() {
        let notice = Notice::new(NoticeKind::Warning, "Incomplete Fields", "", 10);
        let id = notice.id;

        let board = NoticeBoard::default()
            .apply(NoticeAction::Show(notice))
            .apply(NoticeAction::Dismiss(id));

        assert_eq!(board.current, None);
    }
}
