//! The boundary to the external 3D renderer.
//!
//! The synchronization engine never talks to a concrete viewer directly;
//! it hands immutable [`SceneDescription`]s to a [`ViewAdapter`] and hears
//! back through [`crate::rebuild::RebuildController::complete`]. Third-
//! party viewer widgets that need process-wide registration (the web
//! component pattern) go through [`ViewerRegistry`]: initialized once,
//! never torn down, and only ever reached from behind this boundary.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::rebuild::Generation;
use crate::scene::SceneDescription;

/// One external renderer instance backing one mounted view.
///
/// `begin_apply` must not block: loading and committing a scene are
/// asynchronous operations spanning multiple frames. The adapter (or the
/// host driving it) reports completion by calling
/// [`crate::rebuild::RebuildController::complete`] with the same
/// generation; results for superseded generations are discarded there, so
/// the adapter never needs cooperative cancellation.
pub trait ViewAdapter {
    /// Start loading and applying `description`. The `generation` tags the
    /// attempt for the completion callback.
    fn begin_apply(
        &mut self,
        description: &SceneDescription,
        generation: Generation,
    );

    /// Release the underlying renderer instance. Called exactly once per
    /// mounted view, on every exit path.
    fn release(&mut self);
}

impl<T: ViewAdapter + ?Sized> ViewAdapter for Box<T> {
    fn begin_apply(
        &mut self,
        description: &SceneDescription,
        generation: Generation,
    ) {
        (**self).begin_apply(description, generation);
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Factory producing a fresh adapter for one view instance.
pub type AdapterFactory =
    Box<dyn Fn() -> Box<dyn ViewAdapter + Send> + Send + Sync>;

/// Process-wide registry of viewer adapter factories.
///
/// Mirrors the custom-element registration model of embedded web viewers:
/// factories are registered once per process and there is deliberately no
/// teardown. Each [`create`](Self::create) call yields an independent
/// adapter; adapters themselves are per-view and never shared.
#[derive(Default)]
pub struct ViewerRegistry {
    factories: HashMap<String, AdapterFactory>,
}

static GLOBAL: OnceLock<ViewerRegistry> = OnceLock::new();

impl ViewerRegistry {
    /// Build a registry from named factories.
    #[must_use]
    pub fn new(
        factories: impl IntoIterator<Item = (String, AdapterFactory)>,
    ) -> Self {
        Self {
            factories: factories.into_iter().collect(),
        }
    }

    /// Install `registry` as the process-wide instance. Returns `false` if
    /// one was already installed (the first installation wins; there is no
    /// teardown).
    pub fn init_global(registry: Self) -> bool {
        GLOBAL.set(registry).is_ok()
    }

    /// The process-wide registry, if one has been installed.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }

    /// Names of all registered viewers, sorted.
    #[must_use]
    pub fn viewer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> =
            self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate a fresh adapter for the named viewer.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<Box<dyn ViewAdapter + Send>> {
        self.factories.get(name).map(|factory| factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullAdapter;

    impl ViewAdapter for NullAdapter {
        fn begin_apply(
            &mut self,
            _description: &SceneDescription,
            _generation: Generation,
        ) {
        }

        fn release(&mut self) {}
    }

    fn registry() -> ViewerRegistry {
        let factory: AdapterFactory = Box::new(|| {
            let adapter: Box<dyn ViewAdapter + Send> = Box::new(NullAdapter);
            adapter
        });
        ViewerRegistry::new([("null".to_owned(), factory)])
    }

    #[test]
    fn create_known_and_unknown_viewers() {
        let registry = registry();
        assert!(registry.create("null").is_some());
        assert!(registry.create("molstar").is_none());
        assert_eq!(registry.viewer_names(), ["null"]);
    }

    #[test]
    fn global_init_is_once_only() {
        // First installation wins; the second reports failure but the
        // registry stays usable.
        let first = ViewerRegistry::init_global(registry());
        let second = ViewerRegistry::init_global(registry());
        assert!(first);
        assert!(!second);
        assert!(ViewerRegistry::global().is_some());
    }
}
