//! Panel
//!
//! A typed, positioned UI element belonging to a workspace. Display
//! properties live in a free-form `vprops` map; every mutation is reported
//! to the update handler supplied at construction.

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{PanelDto, PanelType, VisualProps};
use crate::workspace::Workspace;

pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const X_POSITION: &str = "xPosition";
pub const Y_POSITION: &str = "yPosition";

/// Passed to the update handler after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelUpdate {
    pub panel_id: Option<String>,
    /// Property keys written by the mutation
    pub keys: Vec<String>,
}

pub type UpdateHandler = Box<dyn FnMut(&PanelUpdate) + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

pub struct Panel {
    id: Option<String>,
    panel_type: Arc<PanelType>,
    workspace: Weak<Workspace>,
    vprops: VisualProps,
    on_update: UpdateHandler,
}

impl Panel {
    /// Create a panel with no display properties.
    ///
    /// `id` may be `None` when the panel is about to be filled by
    /// [`Panel::deserialize`].
    pub fn new<F>(
        id: Option<String>,
        panel_type: Arc<PanelType>,
        workspace: &Arc<Workspace>,
        on_update: F,
    ) -> Self
    where
        F: FnMut(&PanelUpdate) + Send + Sync + 'static,
    {
        Self {
            id,
            panel_type,
            workspace: Arc::downgrade(workspace),
            vprops: VisualProps::new(),
            on_update: Box::new(on_update),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn panel_type(&self) -> &Arc<PanelType> {
        &self.panel_type
    }

    /// The owning workspace, if it is still alive
    pub fn workspace(&self) -> Option<Arc<Workspace>> {
        self.workspace.upgrade()
    }

    pub fn vprops(&self) -> &VisualProps {
        &self.vprops
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        self.vprops.insert(key.clone(), value.into());
        self.notify(vec![key]);
    }

    /// Merge every pair into the display properties, then notify once.
    pub fn set_all<I, K, V>(&mut self, props: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut keys = Vec::new();
        for (key, value) in props {
            let key = key.into();
            self.vprops.insert(key.clone(), value.into());
            keys.push(key);
        }
        self.notify(keys);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vprops.get(key)
    }

    /// Snapshot of the display properties
    pub fn get_all(&self) -> VisualProps {
        self.vprops.clone()
    }

    /// Non-finite values have no JSON form and are stored as `null`,
    /// which [`Panel::get_size`] reports as `None`.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.vprops.insert(WIDTH.to_string(), Value::from(width));
        self.vprops.insert(HEIGHT.to_string(), Value::from(height));
        self.notify(vec![WIDTH.to_string(), HEIGHT.to_string()]);
    }

    pub fn get_size(&self) -> Size {
        Size {
            width: self.number(WIDTH),
            height: self.number(HEIGHT),
        }
    }

    /// Non-finite values are stored as `null`, like [`Panel::set_size`].
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.vprops.insert(X_POSITION.to_string(), Value::from(x));
        self.vprops.insert(Y_POSITION.to_string(), Value::from(y));
        self.notify(vec![X_POSITION.to_string(), Y_POSITION.to_string()]);
    }

    pub fn get_position(&self) -> Position {
        Position {
            x: self.number(X_POSITION),
            y: self.number(Y_POSITION),
        }
    }

    pub fn serialize(&self) -> PanelDto {
        PanelDto {
            id: self.id.clone(),
            type_id: self.panel_type.id.clone(),
            vprops: self.vprops.clone(),
        }
    }

    /// Restore `id` and display properties from a serialized panel.
    ///
    /// Type, workspace and handler keep their construction-time values and
    /// the handler is not called.
    pub fn deserialize(&mut self, dto: PanelDto) {
        if !dto.type_id.is_empty() && dto.type_id != self.panel_type.id {
            log::warn!(
                "Restoring panel {:?} of type {} into a panel of type {}",
                dto.id,
                dto.type_id,
                self.panel_type.id
            );
        }
        self.id = dto.id;
        self.vprops = dto.vprops;
        log::debug!("Restored panel {:?} with {} properties", self.id, self.vprops.len());
    }

    /// Write properties without notifying; used while seeding a new panel.
    pub(crate) fn seed(&mut self, props: VisualProps) {
        self.vprops.extend(props);
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.vprops.get(key).and_then(Value::as_f64)
    }

    fn notify(&mut self, keys: Vec<String>) {
        let update = PanelUpdate {
            panel_id: self.id.clone(),
            keys,
        };
        (self.on_update)(&update);
    }
}

impl PartialEq for Panel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.vprops == other.vprops
            && self.panel_type == other.panel_type
            && self.workspace.ptr_eq(&other.workspace)
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("panel_type", &self.panel_type.id)
            .field("workspace", &self.workspace().map(|w| w.id().to_string()))
            .field("vprops", &self.vprops)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::UnsupportedRepository;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn panel_type() -> Arc<PanelType> {
        Arc::new(
            PanelType::new("test-type", "hello", "Hello, World!")
                .with_description("This is a test panel definition.")
                .with_priority(3)
                .with_content_type("application/xml"),
        )
    }

    fn workspace() -> Arc<Workspace> {
        Workspace::new("test-workspace", "Test", Arc::new(UnsupportedRepository))
    }

    fn noop(_: &PanelUpdate) {}

    /// Panel whose handler counts its calls
    fn spied_panel(workspace: &Arc<Workspace>) -> (Panel, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let panel = Panel::new(Some("test".into()), panel_type(), workspace, move |_: &PanelUpdate| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (panel, calls)
    }

    #[test]
    fn test_constructor_populates_values() {
        let ws = workspace();
        let t = panel_type();
        let panel = Panel::new(Some("test".into()), t.clone(), &ws, noop);

        assert_eq!(panel.id(), Some("test"));
        assert_eq!(panel.panel_type(), &t);
        assert!(Arc::ptr_eq(&panel.workspace().unwrap(), &ws));
        assert!(panel.vprops().is_empty());
    }

    #[test]
    fn test_workspace_is_not_owned() {
        let ws = workspace();
        let panel = Panel::new(None, panel_type(), &ws, noop);
        drop(ws);
        assert!(panel.workspace().is_none());
    }

    #[test]
    fn test_set_size() {
        let ws = workspace();
        let (mut panel, calls) = spied_panel(&ws);

        panel.set_size(123.0, 456.0);

        assert_eq!(panel.vprops().get(WIDTH), Some(&json!(123.0)));
        assert_eq!(panel.vprops().get(HEIGHT), Some(&json!(456.0)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(panel.get_size(), Size { width: Some(123.0), height: Some(456.0) });
    }

    #[test]
    fn test_get_size_unset() {
        let ws = workspace();
        let panel = Panel::new(Some("test".into()), panel_type(), &ws, noop);
        assert_eq!(panel.get_size(), Size::default());
        assert_eq!(panel.get_position(), Position::default());
    }

    #[test]
    fn test_set_position() {
        let ws = workspace();
        let (mut panel, calls) = spied_panel(&ws);

        panel.set_position(123.0, 456.0);

        assert_eq!(panel.vprops().get(X_POSITION), Some(&json!(123.0)));
        assert_eq!(panel.vprops().get(Y_POSITION), Some(&json!(456.0)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(panel.get_position(), Position { x: Some(123.0), y: Some(456.0) });
    }

    #[test]
    fn test_set_arbitrary_property() {
        let ws = workspace();
        let (mut panel, calls) = spied_panel(&ws);

        panel.set("hello", "world");

        assert_eq!(panel.vprops().get("hello"), Some(&json!("world")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_set_all_notifies_once() {
        let ws = workspace();
        let (mut panel, calls) = spied_panel(&ws);

        panel.set_all([
            ("hello", json!("world")),
            ("foo", json!("bar")),
            ("abc", json!(123)),
        ]);

        assert_eq!(panel.get("hello"), Some(&json!("world")));
        assert_eq!(panel.get("foo"), Some(&json!("bar")));
        assert_eq!(panel.get("abc"), Some(&json!(123)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_set_all_empty_still_notifies_once() {
        let ws = workspace();
        let (mut panel, calls) = spied_panel(&ws);

        panel.set_all(Vec::<(String, Value)>::new());

        assert!(panel.vprops().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_non_finite_size_and_position_stored_as_null() {
        let ws = workspace();
        let mut panel = Panel::new(Some("test".into()), panel_type(), &ws, noop);

        panel.set_size(f64::NAN, 1.0);
        panel.set_position(f64::INFINITY, 2.0);

        assert_eq!(panel.vprops().get(WIDTH), Some(&Value::Null));
        assert_eq!(panel.get_size(), Size { width: None, height: Some(1.0) });
        assert_eq!(panel.vprops().get(X_POSITION), Some(&Value::Null));
        assert_eq!(panel.get_position(), Position { x: None, y: Some(2.0) });
    }

    #[test]
    fn test_set_all_overwrites_existing_keys() {
        let ws = workspace();
        let mut panel = Panel::new(Some("test".into()), panel_type(), &ws, noop);
        panel.set("foo", 1);
        panel.set_all(json!({"foo": 2, "bar": 3}).as_object().cloned().unwrap());
        assert_eq!(panel.get("foo"), Some(&json!(2)));
        assert_eq!(panel.get("bar"), Some(&json!(3)));
    }

    #[test]
    fn test_handler_receives_keys_and_id() {
        let ws = workspace();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut panel = Panel::new(Some("p1".into()), panel_type(), &ws, move |u: &PanelUpdate| {
            sink.lock().unwrap().push(u.clone());
        });

        panel.set_size(1.0, 2.0);
        panel.set("color", "red");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].panel_id.as_deref(), Some("p1"));
        assert_eq!(seen[0].keys, vec![WIDTH.to_string(), HEIGHT.to_string()]);
        assert_eq!(seen[1].keys, vec!["color".to_string()]);
    }

    #[test]
    fn test_get_previously_set_properties() {
        let ws = workspace();
        let mut panel = Panel::new(Some("test".into()), panel_type(), &ws, noop);

        panel.set("hello", "world");
        panel.set_all([("foo", json!("bar")), ("abc", json!(123))]);

        assert_eq!(panel.get("hello"), Some(&json!("world")));
        assert_eq!(panel.get("foo"), Some(&json!("bar")));
        assert_eq!(panel.get("abc"), Some(&json!(123)));
        assert_eq!(panel.get("missing"), None);
    }

    #[test]
    fn test_get_all_returns_all_properties() {
        let ws = workspace();
        let mut panel = Panel::new(Some("test".into()), panel_type(), &ws, noop);
        panel.set("hello", "world");
        assert_eq!(&panel.get_all(), panel.vprops());
    }

    #[test]
    fn test_get_all_is_a_copy() {
        let ws = workspace();
        let mut panel = Panel::new(Some("test".into()), panel_type(), &ws, noop);

        let mut before = panel.get_all();
        panel.set("hello", "world");
        let after = panel.get_all();

        assert!(!before.contains_key("hello"));
        assert_eq!(after.get("hello"), Some(&json!("world")));

        before.insert("injected".into(), json!(true));
        assert!(panel.get("injected").is_none());
    }

    #[test]
    fn test_serialize_survives_json_round_trip() {
        let ws = workspace();
        let mut panel = Panel::new(Some("test".into()), panel_type(), &ws, noop);
        panel.set_size(10.5, 20.0);
        panel.set("nested", json!({"a": [1, 2, {"b": null}]}));

        let dto0 = panel.serialize();
        let dto1: PanelDto = serde_json::from_str(&serde_json::to_string(&dto0).unwrap()).unwrap();

        assert_eq!(dto0.type_id, "test-type");
        assert_eq!(dto0, dto1);
    }

    #[test]
    fn test_deserialize_repopulates_panel() {
        let ws = workspace();
        let t = panel_type();
        let mut panel0 = Panel::new(Some("test".into()), t.clone(), &ws, noop);
        panel0.set("hello", "world");

        let json = serde_json::to_string(&panel0.serialize()).unwrap();
        let dto: PanelDto = serde_json::from_str(&json).unwrap();

        let mut panel1 = Panel::new(None, t, &ws, noop);
        panel1.deserialize(dto);

        assert_eq!(panel0, panel1);
    }

    #[test]
    fn test_deserialize_does_not_notify_and_tolerates_missing_fields() {
        let ws = workspace();
        let (mut panel, calls) = spied_panel(&ws);
        panel.set("stale", true);

        let dto: PanelDto = serde_json::from_str(r#"{"id": "restored"}"#).unwrap();
        panel.deserialize(dto);

        assert_eq!(panel.id(), Some("restored"));
        assert!(panel.vprops().is_empty());
        assert_eq!(panel.panel_type().id, "test-type");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panels_in_different_workspaces_differ() {
        let ws_a = workspace();
        let ws_b = workspace();
        let a = Panel::new(Some("p".into()), panel_type(), &ws_a, noop);
        let b = Panel::new(Some("p".into()), panel_type(), &ws_b, noop);
        assert_ne!(a, b);
    }
}
