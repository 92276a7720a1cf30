use std::fmt;
use std::sync::Arc;

use super::{Display, Document, ACTIVE_SCREEN_CLASS};

/// Handle to one screen of the document.
///
/// Handed to page controllers on `init`. The router replaces the whole subtree
/// on every navigation, so content written here does not survive the next
/// visit to the same route.
#[derive(Clone)]
pub struct ScreenContainer {
    id: String,
    document: Arc<dyn Document>,
}

impl ScreenContainer {
    pub fn new(id: impl Into<String>, document: Arc<dyn Document>) -> Self {
        Self {
            id: id.into(),
            document,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn exists(&self) -> bool {
        self.document.contains(&self.id)
    }

    pub fn html(&self) -> String {
        self.document.inner_html(&self.id).unwrap_or_default()
    }

    pub fn set_html(&self, html: &str) -> bool {
        self.document.set_inner_html(&self.id, html)
    }

    pub fn is_active(&self) -> bool {
        self.document.has_class(&self.id, ACTIVE_SCREEN_CLASS)
            && self.document.display(&self.id) != Some(Display::None)
    }
}

impl fmt::Debug for ScreenContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenContainer").field("id", &self.id).finish()
    }
}
