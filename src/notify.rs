//! Notification and navigation collaborators.
//!
//! The session guard never renders anything itself; it hands a [`Notice`]
//! to a [`Notifier`] and waits for the user to acknowledge it before
//! asking the [`Navigator`] to change routes. [`ModalNotifier`] is the
//! provided implementation: each notice becomes a pending modal with an
//! explicit completion handle the host UI resolves.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

/// User-facing message for an alert or confirm dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn message(message: impl Into<String>) -> Self {
        Self { title: None, message: message.into() }
    }

    pub fn titled(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: Some(title.into()), message: message.into() }
    }
}

/// The user cancelled a confirm dialog.
#[derive(Debug, Error)]
#[error("dismissed by user")]
pub struct Dismissed;

/// Surfaces user-facing messages, completing once the user reacts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Shows an alert; resolves when the user confirms it.
    async fn alert(&self, notice: Notice);

    /// Shows a confirm dialog; `Ok` on confirm, [`Dismissed`] on cancel.
    async fn confirm(&self, notice: Notice) -> Result<(), Dismissed>;
}

/// Performs route changes on behalf of the guard.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// A modal waiting for the user, handed to the host UI for resolution.
#[derive(Debug)]
pub struct PendingModal {
    notice: Notice,
    responder: oneshot::Sender<bool>,
}

impl PendingModal {
    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn confirm(self) {
        let _ = self.responder.send(true);
    }

    pub fn cancel(self) {
        let _ = self.responder.send(false);
    }
}

/// Deferred-completion notifier.
///
/// Queued modals are taken by the host UI via [`take_pending`] and
/// resolved through the [`PendingModal`] handle. Behavior when a second
/// notice is raised while one is still pending is unspecified; the queue
/// keeps both, but the resulting redirect order is up to the callers.
///
/// [`take_pending`]: ModalNotifier::take_pending
#[derive(Debug, Default)]
pub struct ModalNotifier {
    pending: Mutex<VecDeque<PendingModal>>,
}

impl ModalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest unresolved modal, if any.
    pub fn take_pending(&self) -> Option<PendingModal> {
        self.pending
            .lock()
            .expect("modal queue lock poisoned")
            .pop_front()
    }

    fn show(&self, notice: Notice) -> oneshot::Receiver<bool> {
        let (responder, completion) = oneshot::channel();
        self.pending
            .lock()
            .expect("modal queue lock poisoned")
            .push_back(PendingModal { notice, responder });
        completion
    }
}

#[async_trait]
impl Notifier for ModalNotifier {
    async fn alert(&self, notice: Notice) {
        // An alert only has a confirm control; a dropped modal counts as
        // acknowledged so the caller is never stuck.
        let _ = self.show(notice).await;
    }

    async fn confirm(&self, notice: Notice) -> Result<(), Dismissed> {
        match self.show(notice).await {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(Dismissed),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    async fn wait_for_pending(notifier: &ModalNotifier) -> PendingModal {
        loop {
            if let Some(pending) = notifier.take_pending() {
                return pending;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn alert_resolves_on_confirm() {
        let notifier = Arc::new(ModalNotifier::new());
        let task = {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.alert(Notice::message("expired")).await })
        };

        let pending = wait_for_pending(&notifier).await;
        assert_eq!(pending.notice().message, "expired");
        pending.confirm();

        task.await.unwrap();
    }

    #[tokio::test]
    async fn confirm_distinguishes_confirm_and_cancel() {
        let notifier = Arc::new(ModalNotifier::new());

        let task = {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.confirm(Notice::titled("Leave?", "sure?")).await })
        };
        wait_for_pending(&notifier).await.confirm();
        assert!(task.await.unwrap().is_ok());

        let task = {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.confirm(Notice::message("sure?")).await })
        };
        wait_for_pending(&notifier).await.cancel();
        assert!(task.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn dropped_modal_unblocks_alert() {
        let notifier = Arc::new(ModalNotifier::new());
        let task = {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.alert(Notice::message("gone")).await })
        };

        drop(wait_for_pending(&notifier).await);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn pending_modals_resolve_in_order() {
        let notifier = Arc::new(ModalNotifier::new());
        for msg in ["first", "second"] {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.alert(Notice::message(msg)).await });
        }

        let first = wait_for_pending(&notifier).await;
        let second = wait_for_pending(&notifier).await;
        let mut messages = vec![first.notice().message.clone(), second.notice().message.clone()];
        messages.sort();
        assert_eq!(messages, ["first", "second"]);
        first.confirm();
        second.confirm();
    }
}
