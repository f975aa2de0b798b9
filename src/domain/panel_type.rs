//! Panel Type
//!
//! Static metadata describing a kind of panel, plus the hooks that decide
//! whether some data belongs in it and how a fresh panel is seeded.

use std::sync::Arc;

use serde_json::{Map, Value};

/// Decides whether a piece of data can be shown by a panel type
pub type MatchFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Produces the initial display properties for a panel showing `data`
pub type InitPanelDataFn = Arc<dyn Fn(&Value) -> Map<String, Value> + Send + Sync>;

/// A category of panel
#[derive(Clone)]
pub struct PanelType {
    /// Unique identifier, written into serialized panels
    pub id: String,
    /// Identifier of the content kind this type renders
    pub type_id: String,
    pub title: String,
    pub description: String,
    /// Higher wins when several types match the same data
    pub priority: i32,
    /// MIME type of the content
    pub content_type: String,
    matcher: Option<MatchFn>,
    initializer: Option<InitPanelDataFn>,
}

impl PanelType {
    pub fn new(id: impl Into<String>, type_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            title: title.into(),
            description: String::new(),
            priority: 0,
            content_type: String::new(),
            matcher: None,
            initializer: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    pub fn with_initializer<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&Value) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.initializer = Some(Arc::new(initializer));
        self
    }

    /// Whether this type can display `data`. Types without a matcher never match.
    pub fn matches(&self, data: &Value) -> bool {
        self.matcher.as_ref().map(|m| m(data)).unwrap_or(false)
    }

    /// Initial display properties for a panel showing `data`
    pub fn init_panel_data(&self, data: &Value) -> Map<String, Value> {
        self.initializer
            .as_ref()
            .map(|init| init(data))
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for PanelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelType")
            .field("id", &self.id)
            .field("type_id", &self.type_id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("priority", &self.priority)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

// Hooks are closures, so equality is over metadata only.
impl PartialEq for PanelType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.type_id == other.type_id
            && self.title == other.title
            && self.description == other.description
            && self.priority == other.priority
            && self.content_type == other.content_type
    }
}

/// The set of panel types known to an application
#[derive(Debug, Clone, Default)]
pub struct PanelTypeRegistry {
    types: Vec<Arc<PanelType>>,
}

impl PanelTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous type with the same id
    pub fn register(&mut self, panel_type: PanelType) -> Arc<PanelType> {
        let panel_type = Arc::new(panel_type);
        match self.types.iter_mut().find(|t| t.id == panel_type.id) {
            Some(slot) => {
                log::debug!("Replacing panel type {}", panel_type.id);
                *slot = panel_type.clone();
            }
            None => self.types.push(panel_type.clone()),
        }
        panel_type
    }

    pub fn get(&self, id: &str) -> Option<Arc<PanelType>> {
        self.types.iter().find(|t| t.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Highest-priority type whose matcher accepts `data`.
    /// On equal priority the earlier registration wins.
    pub fn best_match(&self, data: &Value) -> Option<Arc<PanelType>> {
        let mut best: Option<&Arc<PanelType>> = None;
        for candidate in self.types.iter().filter(|t| t.matches(data)) {
            if best.map_or(true, |b| candidate.priority > b.priority) {
                best = Some(candidate);
            }
        }
        best.cloned()
    }
}
