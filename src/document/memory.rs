use std::collections::BTreeSet;

use parking_lot::RwLock;

use super::{Display, Document, ACTIVE_SCREEN_CLASS};
use crate::config::ShellConfig;

#[derive(Debug, Clone)]
struct Element {
    id: String,
    screen: bool,
    display: Display,
    classes: BTreeSet<String>,
    inner_html: String,
}

impl Element {
    fn new(id: &str, screen: bool) -> Self {
        Self {
            id: id.to_string(),
            screen,
            display: Display::None,
            classes: BTreeSet::new(),
            inner_html: String::new(),
        }
    }
}

/// In-process document: a flat list of screens plus auxiliary elements.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: RwLock<Vec<Element>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with one `screen-<template>` screen per configured template,
    /// every aliased container and the chrome element.
    pub fn for_config(config: &ShellConfig) -> Self {
        let doc = Self::new();
        for route in &config.routes {
            doc.add_screen(&format!("screen-{}", route.template));
        }
        for id in config.router.container_aliases.values() {
            doc.add_screen(id);
        }
        doc.add_element(&config.router.chrome_container);
        doc
    }

    pub fn with_screen(self, id: &str) -> Self {
        self.add_screen(id);
        self
    }

    pub fn with_element(self, id: &str) -> Self {
        self.add_element(id);
        self
    }

    /// Add a top-level screen. Duplicate ids are ignored.
    pub fn add_screen(&self, id: &str) {
        self.insert(Element::new(id, true));
    }

    /// Add a non-screen element such as the chrome container.
    pub fn add_element(&self, id: &str) {
        let mut element = Element::new(id, false);
        element.display = Display::Block;
        self.insert(element);
    }

    /// Ids of the screens currently carrying the active marker.
    pub fn active_screens(&self) -> Vec<String> {
        self.elements
            .read()
            .iter()
            .filter(|e| e.screen && e.classes.contains(ACTIVE_SCREEN_CLASS))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Ids of the screens that are not `display: none`.
    pub fn visible_screens(&self) -> Vec<String> {
        self.elements
            .read()
            .iter()
            .filter(|e| e.screen && e.display != Display::None)
            .map(|e| e.id.clone())
            .collect()
    }

    fn insert(&self, element: Element) {
        let mut elements = self.elements.write();
        if elements.iter().any(|e| e.id == element.id) {
            return;
        }
        elements.push(element);
    }

    fn read<R>(&self, id: &str, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.elements.read().iter().find(|e| e.id == id).map(f)
    }

    fn write(&self, id: &str, f: impl FnOnce(&mut Element)) -> bool {
        match self.elements.write().iter_mut().find(|e| e.id == id) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.read(id, |_| ()).is_some()
    }

    fn screen_ids(&self) -> Vec<String> {
        self.elements
            .read()
            .iter()
            .filter(|e| e.screen)
            .map(|e| e.id.clone())
            .collect()
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.read(id, |e| e.inner_html.clone())
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        self.write(id, |e| e.inner_html = html.to_string())
    }

    fn display(&self, id: &str) -> Option<Display> {
        self.read(id, |e| e.display)
    }

    fn set_display(&self, id: &str, display: Display) -> bool {
        self.write(id, |e| e.display = display)
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.read(id, |e| e.classes.contains(class)).unwrap_or(false)
    }

    fn add_class(&self, id: &str, class: &str) -> bool {
        self.write(id, |e| {
            e.classes.insert(class.to_string());
        })
    }

    fn remove_class(&self, id: &str, class: &str) -> bool {
        self.write(id, |e| {
            e.classes.remove(class);
        })
    }
}
