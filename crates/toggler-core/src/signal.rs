use std::sync::{Arc, Weak};

use parking_lot::Mutex;

pub type SubId = u64;

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Shared, observable value. Subscribers run after each notifying write,
/// with no lock held, so they may read or write the signal again.
pub struct Signal<T>(Arc<Inner<T>>);

struct Inner<T> {
    value: Mutex<T>,
    subs: Mutex<Subscribers<T>>,
}

struct Subscribers<T> {
    next_id: SubId,
    list: Vec<(SubId, Subscriber<T>)>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Clone + Send + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Inner {
            value: Mutex::new(value),
            subs: Mutex::new(Subscribers {
                next_id: 0,
                list: Vec::new(),
            }),
        }))
    }

    pub fn get(&self) -> T {
        self.0.value.lock().clone()
    }

    pub fn set(&self, v: T) {
        let snapshot = {
            let mut value = self.0.value.lock();
            *value = v;
            value.clone()
        };
        self.notify(&snapshot);
    }

    /// Writes without notifying subscribers.
    pub fn set_untracked(&self, v: T) {
        *self.0.value.lock() = v;
    }

    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut subs = self.0.subs.lock();
            let id = subs.next_id;
            subs.next_id += 1;
            subs.list.push((id, Arc::new(f)));
            id
        };
        let weak: Weak<Inner<T>> = Arc::downgrade(&self.0);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subs.lock().list.retain(|(sid, _)| *sid != id);
            }
        })
    }

    fn notify(&self, value: &T) {
        let subs: Vec<Subscriber<T>> = self
            .0
            .subs
            .lock()
            .list
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        for s in subs {
            s(value);
        }
    }
}

/// Keeps a subscription alive. Unsubscribes on `dispose` or drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription(Option<Box<dyn FnOnce() + Send>>);

impl Subscription {
    fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(f)))
    }

    /// Runs at most once.
    pub fn dispose(&mut self) {
        if let Some(f) = self.0.take() {
            f()
        }
    }

    /// Leaves the subscriber attached for the lifetime of the signal.
    pub fn detach(mut self) {
        self.0 = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(sig: &Signal<i32>) -> (Arc<AtomicUsize>, Subscription) {
        let calls = Arc::new(AtomicUsize::new(0));
        let sub = {
            let calls = calls.clone();
            sig.subscribe(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        (calls, sub)
    }

    #[test]
    fn test_signal_basic() {
        let sig = Signal::new(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.set_untracked(101);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription_and_dispose() {
        let sig = Signal::new(0);
        let (calls, mut sub) = counting(&sig);

        sig.set(1);
        sig.set_untracked(2);
        assert_eq!(sig.get(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        sub.dispose();
        sub.dispose();
        sig.set(3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_drop_and_detach() {
        let sig = Signal::new(0);
        let dropped = {
            let (calls, _sub) = counting(&sig);
            calls
        };
        sig.set(1);
        assert_eq!(dropped.load(Ordering::SeqCst), 0);

        let (detached, sub) = counting(&sig);
        sub.detach();
        sig.set(2);
        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_may_write_back() {
        let sig = Signal::new(0);
        let echo = sig.clone();
        sig.subscribe(move |v| {
            if *v == 1 {
                echo.set(2);
            }
        })
        .detach();
        sig.set(1);
        assert_eq!(sig.get(), 2);
    }
}
