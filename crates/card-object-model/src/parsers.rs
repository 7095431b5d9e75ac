//! Built-in parsers for the element and action types of the card schema.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
    action::{ActionBody, CardAction, OpenUrlAction, ShowCardAction, SubmitAction},
    element::{
        ActionSet, CardElement, ChoiceInput, ChoiceSetInput, Column, ColumnSet, ColumnWidth,
        Container, DateInput, ElementBody, Fact, FactSet, Image, ImageSet, NumberInput, TextBlock,
        TextInput, TimeInput, ToggleInput,
    },
    errors::ParseError,
    json::{self, COMMON_ACTION_KEYS, COMMON_ELEMENT_KEYS},
    parse::{
        ActionParser, ActionParserRegistration, ElementParser, ElementParserRegistration,
        ParseContext,
    },
    types::{ActionType, ElementType},
};

/// Element parser registration holding every built-in element type.
pub fn default_element_parsers() -> ElementParserRegistration {
    let mut registration = ElementParserRegistration::new();
    let parsers: [(ElementType, Arc<dyn ElementParser>); 14] = [
        (ElementType::ActionSet, Arc::new(ActionSetParser)),
        (ElementType::ChoiceSetInput, Arc::new(ChoiceSetInputParser)),
        (ElementType::Column, Arc::new(ColumnParser)),
        (ElementType::ColumnSet, Arc::new(ColumnSetParser)),
        (ElementType::Container, Arc::new(ContainerParser)),
        (ElementType::DateInput, Arc::new(DateInputParser)),
        (ElementType::FactSet, Arc::new(FactSetParser)),
        (ElementType::Image, Arc::new(ImageParser)),
        (ElementType::ImageSet, Arc::new(ImageSetParser)),
        (ElementType::NumberInput, Arc::new(NumberInputParser)),
        (ElementType::TextBlock, Arc::new(TextBlockParser)),
        (ElementType::TextInput, Arc::new(TextInputParser)),
        (ElementType::TimeInput, Arc::new(TimeInputParser)),
        (ElementType::ToggleInput, Arc::new(ToggleInputParser)),
    ];
    for (element_type, parser) in parsers {
        registration.register_builtin(element_type.type_name(), parser);
    }
    registration
}

/// Action parser registration holding every built-in action type.
pub fn default_action_parsers() -> ActionParserRegistration {
    let mut registration = ActionParserRegistration::new();
    let parsers: [(ActionType, Arc<dyn ActionParser>); 3] = [
        (ActionType::Submit, Arc::new(SubmitActionParser)),
        (ActionType::OpenUrl, Arc::new(OpenUrlActionParser)),
        (ActionType::ShowCard, Arc::new(ShowCardActionParser)),
    ];
    for (action_type, parser) in parsers {
        registration.register_builtin(action_type.type_name(), parser);
    }
    registration
}

/// Fills the properties shared by every element.
fn element(
    json: &Map<String, Value>,
    context: &mut ParseContext<'_>,
    element_type: ElementType,
    known: &[&str],
    body: impl Into<ElementBody>,
) -> Result<CardElement, ParseError> {
    let type_name = element_type.type_name();
    let mut element = CardElement::new(body);
    element.id = json::string(json, "id", type_name)?;
    element.spacing = context.enum_value(json, "spacing");
    element.separator = json::boolean(json, "separator", type_name)?.unwrap_or(false);
    element.additional_properties = json::additional_properties(json, COMMON_ELEMENT_KEYS, known);
    Ok(element)
}

/// Inputs must carry an `id`; values are reported back under it.
fn input(
    json: &Map<String, Value>,
    context: &mut ParseContext<'_>,
    element_type: ElementType,
    known: &[&str],
    body: impl Into<ElementBody>,
) -> Result<CardElement, ParseError> {
    json::required_string(json, "id", element_type.type_name())?;
    element(json, context, element_type, known, body)
}

fn is_required(json: &Map<String, Value>, element_type: ElementType) -> Result<bool, ParseError> {
    Ok(json::boolean(json, "isRequired", element_type.type_name())?.unwrap_or(false))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextBlockParser;

impl ElementParser for TextBlockParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        const KNOWN: &[&str] = &[
            "text",
            "size",
            "weight",
            "color",
            "isSubtle",
            "wrap",
            "maxLines",
            "horizontalAlignment",
        ];
        let kind = ElementType::TextBlock;
        let type_name = kind.type_name();
        let body = TextBlock {
            text: json::string(json, "text", type_name)?.unwrap_or_default(),
            size: context.enum_value(json, "size"),
            weight: context.enum_value(json, "weight"),
            color: context.enum_value(json, "color"),
            is_subtle: json::boolean(json, "isSubtle", type_name)?.unwrap_or(false),
            wrap: json::boolean(json, "wrap", type_name)?.unwrap_or(false),
            max_lines: json::unsigned(json, "maxLines", type_name)?.unwrap_or(0),
            horizontal_alignment: context.enum_value(json, "horizontalAlignment"),
            language: None,
        };
        element(json, context, kind, KNOWN, body)
    }
}

const IMAGE_KEYS: &[&str] = &[
    "url",
    "size",
    "style",
    "altText",
    "horizontalAlignment",
    "selectAction",
];

fn image_body(
    json: &Map<String, Value>,
    context: &mut ParseContext<'_>,
) -> Result<Image, ParseError> {
    let type_name = ElementType::Image.type_name();
    Ok(Image {
        url: json::required_string(json, "url", type_name)?,
        size: context.enum_value(json, "size"),
        style: context.enum_value(json, "style"),
        alt_text: json::string(json, "altText", type_name)?,
        horizontal_alignment: context.enum_value(json, "horizontalAlignment"),
        select_action: context.parse_select_action(json)?,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageParser;

impl ElementParser for ImageParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let body = image_body(json, context)?;
        element(json, context, ElementType::Image, IMAGE_KEYS, body)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSetParser;

impl ElementParser for ImageSetParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::ImageSet;
        let images = context.parse_items(
            json,
            "images",
            kind.type_name(),
            ElementType::Image.type_name(),
            image_body,
        )?;
        let body = ImageSet {
            images,
            image_size: context.enum_value(json, "imageSize"),
        };
        element(json, context, kind, &["images", "imageSize"], body)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerParser;

impl ElementParser for ContainerParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::Container;
        let body = Container {
            items: context.parse_elements(json, "items", kind.type_name())?,
            style: context.enum_value(json, "style"),
            vertical_content_alignment: context.enum_value(json, "verticalContentAlignment"),
            select_action: context.parse_select_action(json)?,
        };
        element(
            json,
            context,
            kind,
            &["items", "style", "verticalContentAlignment", "selectAction"],
            body,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnSetParser;

impl ElementParser for ColumnSetParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::ColumnSet;
        let body = ColumnSet {
            columns: context.parse_elements_with_default(
                json,
                "columns",
                kind.type_name(),
                Some(ElementType::Column.type_name()),
            )?,
            select_action: context.parse_select_action(json)?,
        };
        element(json, context, kind, &["columns", "selectAction"], body)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnParser;

impl ElementParser for ColumnParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::Column;
        let width = match json.get("width").or_else(|| json.get("size")) {
            None | Some(Value::Null) => ColumnWidth::Auto,
            Some(value) => ColumnWidth::parse(value).ok_or_else(|| {
                ParseError::invalid(kind.type_name(), "width", format!("unsupported width {value}"))
            })?,
        };
        let body = Column {
            width,
            items: context.parse_elements(json, "items", kind.type_name())?,
            style: context.enum_value(json, "style"),
            select_action: context.parse_select_action(json)?,
        };
        element(
            json,
            context,
            kind,
            &["width", "size", "items", "style", "selectAction"],
            body,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FactSetParser;

impl ElementParser for FactSetParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::FactSet;
        let fact_type = ElementType::Fact.type_name();
        let facts = context.parse_items(json, "facts", kind.type_name(), fact_type, |fact, _| {
            Ok(Fact {
                title: json::required_string(fact, "title", fact_type)?,
                value: json::required_string(fact, "value", fact_type)?,
            })
        })?;
        element(json, context, kind, &["facts"], FactSet { facts })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionSetParser;

impl ElementParser for ActionSetParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::ActionSet;
        let actions = context.parse_actions(json, "actions", kind.type_name())?;
        element(json, context, kind, &["actions"], ActionSet { actions })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputParser;

impl ElementParser for TextInputParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::TextInput;
        let type_name = kind.type_name();
        let body = TextInput {
            is_required: is_required(json, kind)?,
            placeholder: json::string(json, "placeholder", type_name)?,
            value: json::string(json, "value", type_name)?,
            is_multiline: json::boolean(json, "isMultiline", type_name)?.unwrap_or(false),
            max_length: json::unsigned(json, "maxLength", type_name)?.unwrap_or(0),
            style: context.enum_value(json, "style"),
        };
        input(
            json,
            context,
            kind,
            &["isRequired", "placeholder", "value", "isMultiline", "maxLength", "style"],
            body,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberInputParser;

impl ElementParser for NumberInputParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::NumberInput;
        let type_name = kind.type_name();
        let body = NumberInput {
            is_required: is_required(json, kind)?,
            placeholder: json::string(json, "placeholder", type_name)?,
            value: json::integer(json, "value", type_name)?,
            min: json::integer(json, "min", type_name)?,
            max: json::integer(json, "max", type_name)?,
        };
        if let (Some(min), Some(max)) = (body.min, body.max) {
            if min > max {
                return Err(ParseError::invalid(
                    type_name,
                    "min",
                    format!("min {min} is greater than max {max}"),
                ));
            }
        }
        input(
            json,
            context,
            kind,
            &["isRequired", "placeholder", "value", "min", "max"],
            body,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateInputParser;

impl ElementParser for DateInputParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::DateInput;
        let type_name = kind.type_name();
        let body = DateInput {
            is_required: is_required(json, kind)?,
            placeholder: json::string(json, "placeholder", type_name)?,
            value: json::string(json, "value", type_name)?,
            min: json::string(json, "min", type_name)?,
            max: json::string(json, "max", type_name)?,
            language: None,
        };
        input(
            json,
            context,
            kind,
            &["isRequired", "placeholder", "value", "min", "max"],
            body,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeInputParser;

impl ElementParser for TimeInputParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::TimeInput;
        let type_name = kind.type_name();
        let body = TimeInput {
            is_required: is_required(json, kind)?,
            placeholder: json::string(json, "placeholder", type_name)?,
            value: json::string(json, "value", type_name)?,
            min: json::string(json, "min", type_name)?,
            max: json::string(json, "max", type_name)?,
            language: None,
        };
        input(
            json,
            context,
            kind,
            &["isRequired", "placeholder", "value", "min", "max"],
            body,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleInputParser;

impl ElementParser for ToggleInputParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::ToggleInput;
        let type_name = kind.type_name();
        let defaults = ToggleInput::default();
        let body = ToggleInput {
            is_required: is_required(json, kind)?,
            title: json::required_string(json, "title", type_name)?,
            value: json::string(json, "value", type_name)?,
            value_on: json::string(json, "valueOn", type_name)?.unwrap_or(defaults.value_on),
            value_off: json::string(json, "valueOff", type_name)?.unwrap_or(defaults.value_off),
        };
        input(
            json,
            context,
            kind,
            &["isRequired", "title", "value", "valueOn", "valueOff"],
            body,
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceSetInputParser;

impl ElementParser for ChoiceSetInputParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        let kind = ElementType::ChoiceSetInput;
        let type_name = kind.type_name();
        let choice_type = ElementType::ChoiceInput.type_name();
        let choices = context.parse_items(json, "choices", type_name, choice_type, |choice, _| {
            Ok(ChoiceInput {
                title: json::required_string(choice, "title", choice_type)?,
                value: json::required_string(choice, "value", choice_type)?,
            })
        })?;
        let body = ChoiceSetInput {
            is_required: is_required(json, kind)?,
            choices,
            is_multi_select: json::boolean(json, "isMultiSelect", type_name)?.unwrap_or(false),
            style: context.enum_value(json, "style"),
            value: json::string(json, "value", type_name)?,
        };
        input(
            json,
            context,
            kind,
            &["isRequired", "choices", "isMultiSelect", "style", "value"],
            body,
        )
    }
}

/// Fills the properties shared by every action.
fn action(
    json: &Map<String, Value>,
    action_type: ActionType,
    known: &[&str],
    body: ActionBody,
) -> Result<CardAction, ParseError> {
    let type_name = action_type.type_name();
    let mut action = CardAction::new(body);
    action.id = json::string(json, "id", type_name)?;
    action.title = json::string(json, "title", type_name)?;
    action.icon_url = json::string(json, "iconUrl", type_name)?;
    action.additional_properties = json::additional_properties(json, COMMON_ACTION_KEYS, known);
    Ok(action)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitActionParser;

impl ActionParser for SubmitActionParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        _context: &mut ParseContext<'_>,
    ) -> Result<CardAction, ParseError> {
        let data = json.get("data").filter(|value| !value.is_null()).cloned();
        action(
            json,
            ActionType::Submit,
            &["data"],
            ActionBody::Submit(SubmitAction { data }),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenUrlActionParser;

impl ActionParser for OpenUrlActionParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        _context: &mut ParseContext<'_>,
    ) -> Result<CardAction, ParseError> {
        let kind = ActionType::OpenUrl;
        let url = json::required_string(json, "url", kind.type_name())?;
        action(json, kind, &["url"], ActionBody::OpenUrl(OpenUrlAction { url }))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowCardActionParser;

impl ActionParser for ShowCardActionParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardAction, ParseError> {
        let kind = ActionType::ShowCard;
        let value = json
            .get("card")
            .ok_or_else(|| ParseError::missing(kind.type_name(), "card"))?;
        let card = context.parse_nested_card(value, kind.type_name())?;
        action(
            json,
            kind,
            &["card"],
            ActionBody::ShowCard(ShowCardAction {
                card: Box::new(card),
            }),
        )
    }
}
