use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of native control a [`UiNode`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiKind {
    StackPanel,
    Grid,
    Border,
    TextBlock,
    Image,
    Button,
    CheckBox,
    ComboBox,
    RadioButton,
    TextBox,
    NumberBox,
    DatePicker,
    TimePicker,
    Separator,
    Flyout,
}

impl fmt::Display for UiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Inspectable UI tree produced by rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    pub kind: UiKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UiNode>,
}

impl UiNode {
    pub fn new(kind: UiKind) -> Self {
        Self {
            kind,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key` only when `value` is present.
    pub fn with_opt<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    pub fn push(&mut self, child: UiNode) {
        self.children.push(child);
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Every node of this tree, this one included, in depth-first order.
    pub fn descendants(&self) -> Vec<&UiNode> {
        fn collect<'a>(node: &'a UiNode, nodes: &mut Vec<&'a UiNode>) {
            nodes.push(node);
            for child in &node.children {
                collect(child, nodes);
            }
        }
        let mut nodes = Vec::new();
        collect(self, &mut nodes);
        nodes
    }

    pub fn find_all(&self, kind: UiKind) -> Vec<&UiNode> {
        self.descendants()
            .into_iter()
            .filter(|node| node.kind == kind)
            .collect()
    }
}
