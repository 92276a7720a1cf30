//! The document the shell renders into.
//!
//! Screens are the top-level children of the application root; every other
//! addressable element (the chrome container) is a plain element. The router
//! only toggles structure; page controllers write content inside their own
//! [`ScreenContainer`].

mod container;
mod memory;

pub use container::ScreenContainer;
pub use memory::MemoryDocument;

/// Marker class carried by the displayed screen.
pub const ACTIVE_SCREEN_CLASS: &str = "active-screen";

/// CSS `display` values the shell uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
}

/// Element-level operations needed by the router and the bootstrap.
///
/// Mutators return `false` when no element has the given id.
pub trait Document: Send + Sync {
    fn contains(&self, id: &str) -> bool;

    /// Ids of every top-level screen, in document order.
    fn screen_ids(&self) -> Vec<String>;

    fn inner_html(&self, id: &str) -> Option<String>;

    fn set_inner_html(&self, id: &str, html: &str) -> bool;

    fn display(&self, id: &str) -> Option<Display>;

    fn set_display(&self, id: &str, display: Display) -> bool;

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn add_class(&self, id: &str, class: &str) -> bool;

    fn remove_class(&self, id: &str, class: &str) -> bool;
}
