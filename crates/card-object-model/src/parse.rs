//! Parse dispatch: JSON `type` strings → registered parsers.

use card_type_registry::TypeRegistry;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    action::{ActionBody, CardAction, CustomAction},
    card::AdaptiveCard,
    element::{CardElement, CustomElement, ElementBody},
    enums::CardEnum,
    errors::ParseError,
    json,
    types::NodeKind,
    warning::{CardWarning, WarningStatusCode},
};

/// Turns a JSON object whose `type` matched a registration into an element.
pub trait ElementParser: Send + Sync {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError>;
}

/// Turns a JSON object whose `type` matched a registration into an action.
pub trait ActionParser: Send + Sync {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardAction, ParseError>;
}

pub type ElementParserRegistration = TypeRegistry<dyn ElementParser>;
pub type ActionParserRegistration = TypeRegistry<dyn ActionParser>;

/// What to do with an element or action whose type has no parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTypePolicy {
    /// Skip the node and record a warning.
    #[default]
    DropWithWarning,
    /// Keep the raw node as `Unknown` and record a warning.
    KeepAsUnknown,
    /// Abort the whole document.
    Fail,
}

impl UnknownTypePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "drop" | "drop-with-warning" | "skip" => Some(Self::DropWithWarning),
            "keep" | "keep-as-unknown" => Some(Self::KeepAsUnknown),
            "fail" | "strict" => Some(Self::Fail),
            _ => None,
        }
    }
}

/// Ambient state for one parse pass: both registries, the unknown-type
/// policy, and the warnings collected so far.
pub struct ParseContext<'a> {
    element_parsers: &'a ElementParserRegistration,
    action_parsers: &'a ActionParserRegistration,
    policy: UnknownTypePolicy,
    warnings: Vec<CardWarning>,
    path: Vec<String>,
}

impl<'a> ParseContext<'a> {
    pub fn new(
        element_parsers: &'a ElementParserRegistration,
        action_parsers: &'a ActionParserRegistration,
        policy: UnknownTypePolicy,
    ) -> Self {
        Self {
            element_parsers,
            action_parsers,
            policy,
            warnings: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn element_parsers(&self) -> &'a ElementParserRegistration {
        self.element_parsers
    }

    pub fn action_parsers(&self) -> &'a ActionParserRegistration {
        self.action_parsers
    }

    pub fn policy(&self) -> UnknownTypePolicy {
        self.policy
    }

    pub fn warnings(&self) -> &[CardWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<CardWarning> {
        self.warnings
    }

    /// JSON pointer of the node currently being parsed.
    pub fn current_path(&self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.path.join("/"))
        }
    }

    pub fn add_warning(&mut self, status_code: WarningStatusCode, message: impl Into<String>) {
        let warning = CardWarning::new(status_code, message).with_path(self.current_path());
        debug!(%warning, "card parse warning");
        self.warnings.push(warning);
    }

    /// Reads an enumeration, falling back to its default with an
    /// `UnknownEnumValue` warning when the value is not recognised.
    pub fn enum_value<E: CardEnum>(&mut self, json: &Map<String, Value>, key: &str) -> E {
        match json.get(key) {
            None | Some(Value::Null) => E::default(),
            Some(Value::String(text)) => match E::parse(text) {
                Some(value) => value,
                None => {
                    self.add_warning(
                        WarningStatusCode::UnknownEnumValue,
                        format!(
                            "unknown {} value `{}`; using `{}`",
                            E::NAME,
                            text,
                            E::default().as_str()
                        ),
                    );
                    E::default()
                }
            },
            Some(other) => {
                self.add_warning(
                    WarningStatusCode::UnknownEnumValue,
                    format!("{} must be a string, got {}", E::NAME, other),
                );
                E::default()
            }
        }
    }

    /// Parses one element, dispatching on its `type`.
    ///
    /// `Ok(None)` means the element was skipped and a warning recorded.
    pub fn parse_element(&mut self, value: &Value) -> Result<Option<CardElement>, ParseError> {
        self.parse_element_with_default(value, None)
    }

    /// Like [`ParseContext::parse_element`], using `default_type` when the
    /// node has no `type` (columns inside a column set).
    pub fn parse_element_with_default(
        &mut self,
        value: &Value,
        default_type: Option<&str>,
    ) -> Result<Option<CardElement>, ParseError> {
        let Some(map) = value.as_object() else {
            self.add_warning(WarningStatusCode::InvalidValue, "element is not a JSON object");
            return Ok(None);
        };
        let Some(type_name) = type_of(map).or(default_type) else {
            self.add_warning(
                WarningStatusCode::RequiredPropertyMissing,
                "element is missing required property `type`",
            );
            return Ok(None);
        };

        let Some(parser) = self.element_parsers.get(type_name) else {
            return self.unknown_element(type_name, map);
        };
        self.skip_on_failure(type_name, |context| parser.from_json(map, context))
    }

    /// Parses the array under `key`, skipping elements that fail.
    pub fn parse_elements(
        &mut self,
        json: &Map<String, Value>,
        key: &str,
        owner: &str,
    ) -> Result<Vec<CardElement>, ParseError> {
        self.parse_elements_with_default(json, key, owner, None)
    }

    pub fn parse_elements_with_default(
        &mut self,
        json: &Map<String, Value>,
        key: &str,
        owner: &str,
        default_type: Option<&str>,
    ) -> Result<Vec<CardElement>, ParseError> {
        let values = json::array(json, key, owner)?;
        let mut elements = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            self.path.push(format!("{key}/{index}"));
            let parsed = self.parse_element_with_default(value, default_type);
            self.path.pop();
            if let Some(element) = parsed? {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    /// Parses one action, dispatching on its `type`.
    pub fn parse_action(&mut self, value: &Value) -> Result<Option<CardAction>, ParseError> {
        let Some(map) = value.as_object() else {
            self.add_warning(WarningStatusCode::InvalidValue, "action is not a JSON object");
            return Ok(None);
        };
        let Some(type_name) = type_of(map) else {
            self.add_warning(
                WarningStatusCode::RequiredPropertyMissing,
                "action is missing required property `type`",
            );
            return Ok(None);
        };

        let Some(parser) = self.action_parsers.get(type_name) else {
            return self.unknown_action(type_name, map);
        };
        self.skip_on_failure(type_name, |context| parser.from_json(map, context))
    }

    pub fn parse_actions(
        &mut self,
        json: &Map<String, Value>,
        key: &str,
        owner: &str,
    ) -> Result<Vec<CardAction>, ParseError> {
        let values = json::array(json, key, owner)?;
        let mut actions = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            self.path.push(format!("{key}/{index}"));
            let parsed = self.parse_action(value);
            self.path.pop();
            if let Some(action) = parsed? {
                actions.push(action);
            }
        }
        Ok(actions)
    }

    /// Parses each object of the array under `key` with `item`.
    ///
    /// Used for the plain records of a set (images, facts, choices): an item
    /// that fails is skipped with a warning and its siblings are kept.
    pub fn parse_items<T>(
        &mut self,
        json: &Map<String, Value>,
        key: &str,
        owner: &str,
        item_type: &str,
        mut item: impl FnMut(&Map<String, Value>, &mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let values = json::array(json, key, owner)?;
        let mut items = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            self.path.push(format!("{key}/{index}"));
            let parsed = match value.as_object() {
                Some(map) => self.skip_on_failure(item_type, |context| item(map, context)),
                None => {
                    self.add_warning(
                        WarningStatusCode::InvalidValue,
                        format!("`{item_type}` is not a JSON object"),
                    );
                    Ok(None)
                }
            };
            self.path.pop();
            if let Some(parsed) = parsed? {
                items.push(parsed);
            }
        }
        Ok(items)
    }

    /// Reads the optional `selectAction` of an element.
    pub fn parse_select_action(
        &mut self,
        json: &Map<String, Value>,
    ) -> Result<Option<Box<CardAction>>, ParseError> {
        let Some(value) = json.get("selectAction").filter(|value| !value.is_null()) else {
            return Ok(None);
        };
        self.path.push("selectAction".to_string());
        let parsed = self.parse_action(value);
        self.path.pop();
        Ok(parsed?.map(Box::new))
    }

    /// Parses a nested card (the payload of `Action.ShowCard`).
    pub fn parse_nested_card(
        &mut self,
        value: &Value,
        owner: &str,
    ) -> Result<AdaptiveCard, ParseError> {
        let Some(map) = value.as_object() else {
            return Err(ParseError::invalid(owner, "card", "expected a JSON object"));
        };
        self.path.push("card".to_string());
        let parsed = AdaptiveCard::parse_object(map, self, false);
        self.path.pop();
        parsed
    }

    /// Runs `parse`; a non-fatal failure skips the node with one warning.
    ///
    /// Warnings recorded while the node was being parsed describe children
    /// that are dropped along with it, so they are discarded.
    fn skip_on_failure<T>(
        &mut self,
        type_name: &str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let mark = self.warnings.len();
        match parse(self) {
            Ok(node) => Ok(Some(node)),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                self.warnings.truncate(mark);
                self.add_warning(err.warning_code(), format!("skipped `{type_name}`: {err}"));
                Ok(None)
            }
        }
    }

    fn unknown_element(
        &mut self,
        type_name: &str,
        map: &Map<String, Value>,
    ) -> Result<Option<CardElement>, ParseError> {
        match self.policy {
            UnknownTypePolicy::Fail => Err(ParseError::UnknownType {
                kind: NodeKind::Element,
                type_name: type_name.to_string(),
            }),
            UnknownTypePolicy::DropWithWarning => {
                self.add_warning(
                    WarningStatusCode::UnknownElementType,
                    format!("dropping element of unknown type `{type_name}`"),
                );
                Ok(None)
            }
            UnknownTypePolicy::KeepAsUnknown => {
                self.add_warning(
                    WarningStatusCode::UnknownElementType,
                    format!("keeping element of unknown type `{type_name}` as raw JSON"),
                );
                let mut element = CardElement::new(ElementBody::Unknown(CustomElement {
                    type_name: type_name.to_string(),
                    payload: Value::Object(map.clone()),
                }));
                element.id = json::string(map, "id", type_name).ok().flatten();
                Ok(Some(element))
            }
        }
    }

    fn unknown_action(
        &mut self,
        type_name: &str,
        map: &Map<String, Value>,
    ) -> Result<Option<CardAction>, ParseError> {
        match self.policy {
            UnknownTypePolicy::Fail => Err(ParseError::UnknownType {
                kind: NodeKind::Action,
                type_name: type_name.to_string(),
            }),
            UnknownTypePolicy::DropWithWarning => {
                self.add_warning(
                    WarningStatusCode::UnknownActionElementType,
                    format!("dropping action of unknown type `{type_name}`"),
                );
                Ok(None)
            }
            UnknownTypePolicy::KeepAsUnknown => {
                self.add_warning(
                    WarningStatusCode::UnknownActionElementType,
                    format!("keeping action of unknown type `{type_name}` as raw JSON"),
                );
                let mut action = CardAction::new(ActionBody::Unknown(CustomAction {
                    type_name: type_name.to_string(),
                    payload: Value::Object(map.clone()),
                }));
                action.title = json::string(map, "title", type_name).ok().flatten();
                Ok(Some(action))
            }
        }
    }
}

fn type_of(map: &Map<String, Value>) -> Option<&str> {
    map.get("type")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|type_name| !type_name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct RatingParser;

    impl ElementParser for RatingParser {
        fn from_json(
            &self,
            json: &Map<String, Value>,
            _context: &mut ParseContext<'_>,
        ) -> Result<CardElement, ParseError> {
            let stars = json
                .get("stars")
                .and_then(Value::as_u64)
                .ok_or_else(|| ParseError::missing("Rating", "stars"))?;
            Ok(CardElement::custom("Rating", serde_json::json!({ "stars": stars })))
        }
    }

    fn registries() -> (ElementParserRegistration, ActionParserRegistration) {
        let mut elements = ElementParserRegistration::new();
        elements.set("Rating", Arc::new(RatingParser)).unwrap();
        (elements, ActionParserRegistration::new())
    }

    #[test]
    fn dispatches_case_insensitively() {
        let (elements, actions) = registries();
        let mut context = ParseContext::new(&elements, &actions, UnknownTypePolicy::default());
        let element = context
            .parse_element(&serde_json::json!({"type": "rating", "stars": 3}))
            .unwrap()
            .expect("parsed");
        assert_eq!(element.element_type_string(), "Rating");
        assert!(context.warnings().is_empty());
    }

    #[test]
    fn handler_failure_becomes_warning() {
        let (elements, actions) = registries();
        let mut context = ParseContext::new(&elements, &actions, UnknownTypePolicy::default());
        let parsed = context
            .parse_element(&serde_json::json!({"type": "Rating"}))
            .unwrap();
        assert!(parsed.is_none());
        assert_eq!(
            context.warnings()[0].status_code,
            WarningStatusCode::RequiredPropertyMissing
        );
    }

    #[test]
    fn policies_for_unknown_types() {
        let (elements, actions) = registries();
        let node = serde_json::json!({"type": "Carousel", "id": "c1"});

        let mut drop = ParseContext::new(&elements, &actions, UnknownTypePolicy::DropWithWarning);
        assert!(drop.parse_element(&node).unwrap().is_none());
        assert_eq!(drop.warnings()[0].status_code, WarningStatusCode::UnknownElementType);

        let mut keep = ParseContext::new(&elements, &actions, UnknownTypePolicy::KeepAsUnknown);
        let kept = keep.parse_element(&node).unwrap().expect("kept");
        assert_eq!(kept.element_type_string(), "Carousel");
        assert_eq!(kept.id.as_deref(), Some("c1"));

        let mut fail = ParseContext::new(&elements, &actions, UnknownTypePolicy::Fail);
        assert!(matches!(
            fail.parse_element(&node),
            Err(ParseError::UnknownType { kind: NodeKind::Element, .. })
        ));
    }

    #[test]
    fn warnings_carry_json_pointer() {
        let (elements, actions) = registries();
        let mut context = ParseContext::new(&elements, &actions, UnknownTypePolicy::default());
        let container = serde_json::json!({
            "body": [{"type": "Rating", "stars": 1}, {"type": "Nope"}]
        });
        let parsed = context
            .parse_elements(container.as_object().unwrap(), "body", "AdaptiveCard")
            .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(context.warnings()[0].path.as_deref(), Some("/body/1"));
    }

    #[test]
    fn policy_names() {
        assert_eq!(UnknownTypePolicy::parse("Keep"), Some(UnknownTypePolicy::KeepAsUnknown));
        assert_eq!(UnknownTypePolicy::parse("strict"), Some(UnknownTypePolicy::Fail));
        assert_eq!(UnknownTypePolicy::parse("whatever"), None);
    }
}
