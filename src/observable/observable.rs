use crate::error::{CallbackError, TriggerError};
use crate::registry::Registry;

/// Capability of an object that owns a [`Registry`] and exposes
/// `bind`/`unbind`/`trigger` on itself.
///
/// Only [`registry`](Self::registry) has to be provided; the operations
/// forward to it. Most hosts get the impl from [`mixin!`](crate::mixin).
///
/// Generic code asks for the capability, not for a base type:
///
/// ```
/// use microstore::{mixin, Observable, Registry};
///
/// #[derive(Default)]
/// struct Counter {
///     events: Registry,
/// }
///
/// mixin!(Counter, events);
///
/// fn announce(host: &impl Observable<Args = ()>) {
///     host.trigger("changed").unwrap();
/// }
///
/// let counter = Counter::default();
/// counter.bind("changed", "printer", |_| println!("changed"));
/// announce(&counter);
/// ```
pub trait Observable {
    /// Value forwarded to every callback on trigger. `()` for payload-less events.
    type Args: 'static;

    /// The registry owned by this instance.
    fn registry(&self) -> &Registry<Self::Args>;

    /// See [`Registry::bind`].
    fn bind<F>(&self, event: impl Into<String>, key: impl Into<String>, callback: F)
    where
        F: Fn(&Self::Args) + Send + Sync + 'static,
    {
        self.registry().bind(event, key, callback);
    }

    /// See [`Registry::try_bind`].
    fn try_bind<F>(&self, event: impl Into<String>, key: impl Into<String>, callback: F)
    where
        F: Fn(&Self::Args) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.registry().try_bind(event, key, callback);
    }

    /// See [`Registry::unbind`].
    fn unbind(&self, event: &str, key: &str) -> bool {
        self.registry().unbind(event, key)
    }

    /// See [`Registry::trigger`].
    fn trigger(&self, event: &str) -> Result<(), TriggerError>
    where
        Self::Args: Default,
    {
        self.registry().trigger(event)
    }

    /// See [`Registry::trigger_with`].
    fn trigger_with(&self, event: &str, args: &Self::Args) -> Result<(), TriggerError> {
        self.registry().trigger_with(event, args)
    }
}

/// Apply the observable mixin to a host type.
///
/// `mixin!(Host, field)` implements [`Observable`] for `Host` using the
/// `Registry<()>` stored in `field`. `mixin!(Host, field, Args)` does the same
/// for a `Registry<Args>`. A type can only be given the mixin once; a second
/// application is a conflicting-impl compile error.
///
/// Generic hosts implement [`Observable`] by hand.
///
/// ```
/// use microstore::{mixin, Observable, Registry};
///
/// #[derive(Default)]
/// struct Thermometer {
///     events: Registry<f64>,
/// }
///
/// mixin!(Thermometer, events, f64);
///
/// let t = Thermometer::default();
/// t.bind("reading", "log", |c| println!("{c} C"));
/// t.trigger_with("reading", &21.5).unwrap();
/// ```
#[macro_export]
macro_rules! mixin {
    ($host:ty, $field:ident) => {
        $crate::mixin!($host, $field, ());
    };
    ($host:ty, $field:ident, $args:ty) => {
        impl $crate::Observable for $host {
            type Args = $args;

            fn registry(&self) -> &$crate::Registry<$args> {
                &self.$field
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Host {
        name: String,
        events: Registry,
    }

    crate::mixin!(Host, events);

    struct Other {
        events: Registry<u32>,
    }

    crate::mixin!(Other, events, u32);

    fn count_fires<T: Observable<Args = ()>>(host: &T, event: &str) -> Arc<AtomicUsize> {
        let fires = Arc::new(AtomicUsize::new(0));
        let fires_clone = fires.clone();
        host.bind(event, "counter", move |_| {
            fires_clone.fetch_add(1, Ordering::SeqCst);
        });
        fires
    }

    #[test]
    fn mixin_exposes_operations() {
        let host = Host {
            name: "host".to_string(),
            ..Default::default()
        };
        let fires = count_fires(&host, "changed");

        host.trigger("changed").unwrap();
        host.trigger("changed").unwrap();
        assert_eq!(fires.load(Ordering::SeqCst), 2);

        assert!(host.unbind("changed", "counter"));
        host.trigger("changed").unwrap();
        assert_eq!(fires.load(Ordering::SeqCst), 2);
        assert_eq!(host.name, "host");
    }

    #[test]
    fn registries_are_per_instance() {
        let a = Host::default();
        let b = Host::default();
        let fires = count_fires(&a, "changed");

        b.trigger("changed").unwrap();
        assert_eq!(fires.load(Ordering::SeqCst), 0);
        assert!(b.registry().is_empty());

        a.trigger("changed").unwrap();
        assert_eq!(fires.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn mixin_with_args() {
        let other = Other {
            events: Registry::new(),
        };
        let total = Arc::new(AtomicUsize::new(0));
        let total_clone = total.clone();
        other.bind("add", "sum", move |n: &u32| {
            total_clone.fetch_add(*n as usize, Ordering::SeqCst);
        });
        other.try_bind("add", "limit", |n: &u32| {
            if *n > 10 {
                return Err(format!("{n} is over the limit").into());
            }
            Ok(())
        });

        other.trigger_with("add", &4).unwrap();
        let err = other.trigger_with("add", &11).unwrap_err();

        assert_eq!(err.key(), "limit");
        assert_eq!(total.load(Ordering::SeqCst), 15);
    }
}
