use serde_json::{Map, Value};

use crate::{card::AdaptiveCard, json::JsonWriter, types::ActionType};

/// An action attached to a card, an action set, or a select action slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CardAction {
    pub id: Option<String>,
    pub title: Option<String>,
    pub icon_url: Option<String>,
    pub additional_properties: Map<String, Value>,
    pub body: ActionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionBody {
    Submit(SubmitAction),
    OpenUrl(OpenUrlAction),
    ShowCard(ShowCardAction),
    Custom(CustomAction),
    Unknown(CustomAction),
}

/// Gathers input values and hands them, merged with `data`, to the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitAction {
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenUrlAction {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowCardAction {
    pub card: Box<AdaptiveCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomAction {
    pub type_name: String,
    pub payload: Value,
}

impl CardAction {
    pub fn new(body: ActionBody) -> Self {
        Self {
            id: None,
            title: None,
            icon_url: None,
            additional_properties: Map::new(),
            body,
        }
    }

    pub fn custom(type_name: impl Into<String>, payload: Value) -> Self {
        Self::new(ActionBody::Custom(CustomAction {
            type_name: type_name.into(),
            payload,
        }))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn action_type(&self) -> ActionType {
        match &self.body {
            ActionBody::Submit(_) => ActionType::Submit,
            ActionBody::OpenUrl(_) => ActionType::OpenUrl,
            ActionBody::ShowCard(_) => ActionType::ShowCard,
            ActionBody::Custom(_) => ActionType::Custom,
            ActionBody::Unknown(_) => ActionType::Unknown,
        }
    }

    pub fn action_type_string(&self) -> &str {
        match &self.body {
            ActionBody::Custom(custom) | ActionBody::Unknown(custom) => &custom.type_name,
            _ => self.action_type().type_name(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut writer = JsonWriter::new(self.action_type_string());
        if let ActionBody::Custom(custom) | ActionBody::Unknown(custom) = &self.body {
            if let Value::Object(payload) = &custom.payload {
                writer.extend(payload);
            }
        }
        writer
            .string("id", self.id.as_deref())
            .string("title", self.title.as_deref())
            .string("iconUrl", self.icon_url.as_deref());
        match &self.body {
            ActionBody::Submit(submit) => {
                if let Some(data) = &submit.data {
                    writer.value("data", data.clone());
                }
            }
            ActionBody::OpenUrl(open) => {
                writer.string("url", Some(open.url.as_str()));
            }
            ActionBody::ShowCard(show) => {
                writer.value("card", show.card.to_json());
            }
            ActionBody::Custom(_) | ActionBody::Unknown(_) => {}
        }
        writer.extend(&self.additional_properties).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn open_url_serializes_url_and_title() {
        let action = CardAction::new(ActionBody::OpenUrl(OpenUrlAction {
            url: "https://adaptivecards.io".into(),
        }))
        .with_title("Docs");
        assert_eq!(action.action_type(), ActionType::OpenUrl);
        assert_eq!(
            action.to_json(),
            json!({"type": "Action.OpenUrl", "title": "Docs", "url": "https://adaptivecards.io"})
        );
    }

    #[test]
    fn custom_action_keeps_type_string() {
        let action = CardAction::custom("Action.Http", json!({"method": "POST"}));
        assert_eq!(action.action_type_string(), "Action.Http");
        assert_eq!(action.to_json()["method"], json!("POST"));
    }
}
