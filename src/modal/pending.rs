//! Single-resolution completion handles
//!
//! `open` hands the caller a [`PendingResult`] and keeps the matching
//! [`Resolver`] inside the registry. The first resolution wins: the resolver
//! is consumed when it fires, so a second `close`/`cancel` has nothing left to
//! resolve. A `None` value means the dialog was cancelled.

use futures::channel::oneshot;
use log::debug;
use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::ModalId;

/// Awaitable result of one modal instance.
///
/// Resolves to `Some(value)` when the view closes with a result and to `None`
/// when it is cancelled, dismissed, or the manager is dropped.
#[must_use = "a modal result does nothing unless awaited or polled"]
#[derive(Debug)]
pub struct PendingResult<T> {
    id: ModalId,
    receiver: oneshot::Receiver<Option<T>>,
}

impl<T> PendingResult<T> {
    pub(crate) fn channel(id: ModalId) -> (Resolver<T>, Self) {
        let (sender, receiver) = oneshot::channel();
        let resolver = Resolver {
            id: id.clone(),
            sender,
        };
        (resolver, Self { id, receiver })
    }

    /// A result that is already cancelled
    pub(crate) fn cancelled(id: ModalId) -> Self {
        let (resolver, pending) = Self::channel(id);
        resolver.resolve(None);
        pending
    }

    /// Id of the modal instance this result belongs to
    pub fn id(&self) -> &ModalId {
        &self.id
    }

    /// Non-blocking check: `None` while still pending, `Some(result)` once resolved.
    pub fn try_take(&mut self) -> Option<Option<T>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(None),
        }
    }
}

impl<T> Future for PendingResult<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Write side of a [`PendingResult`]
#[derive(Debug)]
pub struct Resolver<T> {
    id: ModalId,
    sender: oneshot::Sender<Option<T>>,
}

impl<T> Resolver<T> {
    pub fn resolve(self, result: Option<T>) {
        if self.sender.send(result).is_err() {
            debug!("Result for modal {} dropped: opener no longer waiting", self.id);
        }
    }
}

/// Type-erased resolver stored by the registry
pub(crate) trait ErasedResolver {
    /// Name of the result type the opener awaits
    fn expected_type(&self) -> &'static str;

    /// Whether `value` can resolve this instance
    fn accepts(&self, value: &dyn Any) -> bool;

    /// Resolve with a value previously checked by `accepts`, or cancel with `None`
    fn resolve_any(self: Box<Self>, value: Option<Box<dyn Any>>);
}

impl<T: 'static> ErasedResolver for Resolver<T> {
    fn expected_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn accepts(&self, value: &dyn Any) -> bool {
        value.is::<T>()
    }

    fn resolve_any(self: Box<Self>, value: Option<Box<dyn Any>>) {
        let result = value.and_then(|boxed| boxed.downcast::<T>().ok()).map(|v| *v);
        self.resolve(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_with_value() {
        let (resolver, pending) = PendingResult::<u32>::channel(ModalId::from("a"));
        resolver.resolve(Some(7));
        assert_eq!(pending.await, Some(7));
    }

    #[tokio::test]
    async fn test_dropped_resolver_means_cancelled() {
        let (resolver, pending) = PendingResult::<u32>::channel(ModalId::from("a"));
        drop(resolver);
        assert_eq!(pending.await, None);
    }

    #[test]
    fn test_try_take_reports_pending_then_value() {
        let (resolver, mut pending) = PendingResult::<&str>::channel(ModalId::from("a"));
        assert_eq!(pending.try_take(), None);
        resolver.resolve(Some("done"));
        assert_eq!(pending.try_take(), Some(Some("done")));
    }

    #[test]
    fn test_erased_resolver_checks_type() {
        let (resolver, mut pending) = PendingResult::<String>::channel(ModalId::from("a"));
        let erased: Box<dyn ErasedResolver> = Box::new(resolver);
        assert!(!erased.accepts(&5u8));
        assert!(erased.accepts(&String::from("ok")));
        erased.resolve_any(Some(Box::new(String::from("ok"))));
        assert_eq!(pending.try_take(), Some(Some(String::from("ok"))));
    }

    #[test]
    fn test_cancelled_is_resolved_immediately() {
        let mut pending = PendingResult::<u8>::cancelled(ModalId::from("a"));
        assert_eq!(pending.try_take(), Some(None));
    }
}
