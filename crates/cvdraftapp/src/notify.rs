//! User-facing notices emitted by explicit saves.
//!
//! The session does not know how the UI shows a toast or a status line; it hands a
//! [`Notice`] to whatever [`Notifier`] the UI installed. The default
//! [`LogNotifier`] just forwards to `tracing`.

use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub content: String,
}

impl Notice {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            content: content.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => info!("{}", notice.content),
            NoticeLevel::Error => error!("{}", notice.content),
        }
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collects notices so tests can assert on them after handing a clone to a session.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingNotifier {
        notices: Rc<RefCell<Vec<Notice>>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.notices.borrow().clone()
        }

        pub fn levels(&self) -> Vec<NoticeLevel> {
            self.notices.borrow().iter().map(|n| n.level).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices.borrow_mut().push(notice.clone());
        }
    }
}
