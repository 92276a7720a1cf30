use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::controller::PageController;

/// No-argument constructor for a controller.
pub type PageFactory = Arc<dyn Fn() -> Box<dyn PageController> + Send + Sync>;

/// Explicit controller registry, filled by page modules when they load.
#[derive(Default, Clone)]
pub struct PageRegistry {
    factories: HashMap<String, PageFactory>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn PageController> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Arc::new(factory)).is_some() {
            tracing::debug!(controller = %name, "Replaced page factory");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// A fresh instance of `name`, if registered.
    pub fn create(&self, name: &str) -> Option<Box<dyn PageController>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("PageRegistry").field("factories", &names).finish()
    }
}
