use super::{HookError, HookErrorExt, StylesheetHook};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use tracing::trace;

struct Registered {
    name: Cow<'static, str>,
    hook: Box<dyn StylesheetHook>,
}

/// Ordered set of save hooks, run one after another for every saved stylesheet.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Registered>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry").field("hooks", &self.names().collect::<Vec<_>>()).finish()
    }
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `hook`; it runs after every hook registered before it.
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        hook: impl StylesheetHook + 'static,
    ) -> &mut Self {
        self.hooks.push(Registered { name: name.into(), hook: Box::new(hook) });
        self
    }

    /// Builder-style [`HookRegistry::register`].
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<Cow<'static, str>>,
        hook: impl StylesheetHook + 'static,
    ) -> Self {
        self.register(name, hook);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|h| h.name.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs every hook for `path` in registration order.
    ///
    /// # Errors
    /// Returns the first hook failure, tagged with the hook's name; later hooks do not run.
    pub fn notify(&self, path: &Path) -> Result<(), HookError> {
        for Registered { name, hook } in &self.hooks {
            trace!(hook = %name, path = %path.display(), "Running stylesheet hook");
            hook.on_stylesheet_saved(path).context(format!("hook `{name}`"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    fn recorder(log: Arc<Mutex<Vec<String>>>, tag: &'static str) -> impl StylesheetHook {
        move |path: &Path| -> Result<(), HookError> {
            let mut log = log.lock().map_err(|_| HookError::from("poisoned"))?;
            log.push(format!("{tag}:{}", path.display()));
            Ok(())
        }
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HookRegistry::new()
            .with("first", recorder(Arc::clone(&log), "a"))
            .with("second", recorder(Arc::clone(&log), "b"));

        registry.notify(Path::new("main.css")).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["a:main.css", "b:main.css"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn first_failure_stops_the_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new();
        registry
            .register("ok", recorder(Arc::clone(&log), "a"))
            .register("boom", |_: &Path| Err::<(), _>(HookError::from("prefixing exploded")))
            .register("never", recorder(Arc::clone(&log), "c"));

        let err = registry.notify(Path::new("main.css")).unwrap_err();

        assert_eq!(err.to_string(), "Stylesheet hook failed (hook `boom`): prefixing exploded");
        assert_eq!(*log.lock().unwrap(), vec!["a:main.css"]);
    }

    #[test]
    fn empty_registry_is_a_no_op() {
        let registry = HookRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.notify(Path::new("main.css")).is_ok());
    }
}
