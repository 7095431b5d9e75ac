use serde_json::{Map, Value};

use crate::{
    action::CardAction,
    enums::{
        ChoiceSetStyle, ContainerStyle, HorizontalAlignment, ImageSize, ImageStyle, Spacing,
        TextColor, TextInputStyle, TextSize, TextWeight, VerticalContentAlignment,
    },
    json::JsonWriter,
    types::ElementType,
};

/// One node of a card body.
#[derive(Debug, Clone, PartialEq)]
pub struct CardElement {
    pub id: Option<String>,
    pub spacing: Spacing,
    pub separator: bool,
    pub additional_properties: Map<String, Value>,
    pub body: ElementBody,
}

/// Type-specific payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementBody {
    ActionSet(ActionSet),
    ChoiceSetInput(ChoiceSetInput),
    Column(Column),
    ColumnSet(ColumnSet),
    Container(Container),
    DateInput(DateInput),
    FactSet(FactSet),
    Image(Image),
    ImageSet(ImageSet),
    NumberInput(NumberInput),
    TextBlock(TextBlock),
    TextInput(TextInput),
    TimeInput(TimeInput),
    ToggleInput(ToggleInput),
    /// Host-defined element produced by a registered custom parser.
    Custom(CustomElement),
    /// Element whose type had no parser, kept under `UnknownTypePolicy::KeepAsUnknown`.
    Unknown(CustomElement),
}

impl CardElement {
    pub fn new(body: impl Into<ElementBody>) -> Self {
        Self {
            id: None,
            spacing: Spacing::Default,
            separator: false,
            additional_properties: Map::new(),
            body: body.into(),
        }
    }

    pub fn custom(type_name: impl Into<String>, payload: Value) -> Self {
        Self::new(ElementBody::Custom(CustomElement {
            type_name: type_name.into(),
            payload,
        }))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn element_type(&self) -> ElementType {
        match &self.body {
            ElementBody::ActionSet(_) => ElementType::ActionSet,
            ElementBody::ChoiceSetInput(_) => ElementType::ChoiceSetInput,
            ElementBody::Column(_) => ElementType::Column,
            ElementBody::ColumnSet(_) => ElementType::ColumnSet,
            ElementBody::Container(_) => ElementType::Container,
            ElementBody::DateInput(_) => ElementType::DateInput,
            ElementBody::FactSet(_) => ElementType::FactSet,
            ElementBody::Image(_) => ElementType::Image,
            ElementBody::ImageSet(_) => ElementType::ImageSet,
            ElementBody::NumberInput(_) => ElementType::NumberInput,
            ElementBody::TextBlock(_) => ElementType::TextBlock,
            ElementBody::TextInput(_) => ElementType::TextInput,
            ElementBody::TimeInput(_) => ElementType::TimeInput,
            ElementBody::ToggleInput(_) => ElementType::ToggleInput,
            ElementBody::Custom(_) => ElementType::Custom,
            ElementBody::Unknown(_) => ElementType::Unknown,
        }
    }

    /// Type string used for renderer lookup. Custom and unknown elements
    /// report the name they were parsed from.
    pub fn element_type_string(&self) -> &str {
        match &self.body {
            ElementBody::Custom(custom) | ElementBody::Unknown(custom) => &custom.type_name,
            _ => self.element_type().type_name(),
        }
    }

    /// Input elements whose `isRequired` flag is set.
    pub fn is_required_input(&self) -> bool {
        match &self.body {
            ElementBody::ChoiceSetInput(input) => input.is_required,
            ElementBody::DateInput(input) => input.is_required,
            ElementBody::NumberInput(input) => input.is_required,
            ElementBody::TextInput(input) => input.is_required,
            ElementBody::TimeInput(input) => input.is_required,
            ElementBody::ToggleInput(input) => input.is_required,
            _ => false,
        }
    }

    /// Child elements nested directly under this one.
    pub fn children(&self) -> &[CardElement] {
        match &self.body {
            ElementBody::Container(container) => container.items.as_slice(),
            ElementBody::Column(column) => column.items.as_slice(),
            ElementBody::ColumnSet(set) => set.columns.as_slice(),
            _ => &[],
        }
    }

    pub fn to_json(&self) -> Value {
        let mut writer = JsonWriter::new(self.element_type_string());
        if let ElementBody::Custom(custom) | ElementBody::Unknown(custom) = &self.body {
            if let Value::Object(payload) = &custom.payload {
                writer.extend(payload);
            }
        }
        writer
            .string("id", self.id.as_deref())
            .choice("spacing", self.spacing)
            .flag("separator", self.separator, false);
        match &self.body {
            ElementBody::ActionSet(set) => {
                writer.list("actions", set.actions.iter().map(CardAction::to_json).collect());
            }
            ElementBody::ChoiceSetInput(input) => {
                writer
                    .flag("isRequired", input.is_required, false)
                    .flag("isMultiSelect", input.is_multi_select, false)
                    .choice("style", input.style)
                    .string("value", input.value.as_deref())
                    .list(
                        "choices",
                        input
                            .choices
                            .iter()
                            .map(|choice| {
                                JsonWriter::new(ElementType::ChoiceInput.type_name())
                                    .string("title", Some(choice.title.as_str()))
                                    .string("value", Some(choice.value.as_str()))
                                    .finish()
                            })
                            .collect(),
                    );
            }
            ElementBody::Column(column) => {
                writer
                    .string("width", column.width.to_json_string().as_deref())
                    .choice("style", column.style)
                    .list("items", column.items.iter().map(CardElement::to_json).collect());
                if let Some(action) = &column.select_action {
                    writer.value("selectAction", action.to_json());
                }
            }
            ElementBody::ColumnSet(set) => {
                writer.list("columns", set.columns.iter().map(CardElement::to_json).collect());
                if let Some(action) = &set.select_action {
                    writer.value("selectAction", action.to_json());
                }
            }
            ElementBody::Container(container) => {
                writer
                    .choice("style", container.style)
                    .choice("verticalContentAlignment", container.vertical_content_alignment)
                    .list("items", container.items.iter().map(CardElement::to_json).collect());
                if let Some(action) = &container.select_action {
                    writer.value("selectAction", action.to_json());
                }
            }
            ElementBody::DateInput(input) => {
                writer
                    .flag("isRequired", input.is_required, false)
                    .string("placeholder", input.placeholder.as_deref())
                    .string("value", input.value.as_deref())
                    .string("min", input.min.as_deref())
                    .string("max", input.max.as_deref());
            }
            ElementBody::FactSet(set) => {
                writer.list(
                    "facts",
                    set.facts
                        .iter()
                        .map(|fact| {
                            JsonWriter::untyped()
                                .string("title", Some(fact.title.as_str()))
                                .string("value", Some(fact.value.as_str()))
                                .finish()
                        })
                        .collect(),
                );
            }
            ElementBody::Image(image) => image.write(&mut writer),
            ElementBody::ImageSet(set) => {
                writer.choice("imageSize", set.image_size).list(
                    "images",
                    set.images
                        .iter()
                        .map(|image| {
                            let mut inner = JsonWriter::new(ElementType::Image.type_name());
                            image.write(&mut inner);
                            inner.finish()
                        })
                        .collect(),
                );
            }
            ElementBody::NumberInput(input) => {
                writer
                    .flag("isRequired", input.is_required, false)
                    .string("placeholder", input.placeholder.as_deref())
                    .number("value", input.value)
                    .number("min", input.min)
                    .number("max", input.max);
            }
            ElementBody::TextBlock(text) => {
                writer
                    .string("text", Some(text.text.as_str()))
                    .choice("size", text.size)
                    .choice("weight", text.weight)
                    .choice("color", text.color)
                    .flag("isSubtle", text.is_subtle, false)
                    .flag("wrap", text.wrap, false)
                    .number("maxLines", (text.max_lines > 0).then_some(text.max_lines))
                    .choice("horizontalAlignment", text.horizontal_alignment);
            }
            ElementBody::TextInput(input) => {
                writer
                    .flag("isRequired", input.is_required, false)
                    .string("placeholder", input.placeholder.as_deref())
                    .string("value", input.value.as_deref())
                    .flag("isMultiline", input.is_multiline, false)
                    .number("maxLength", (input.max_length > 0).then_some(input.max_length))
                    .choice("style", input.style);
            }
            ElementBody::TimeInput(input) => {
                writer
                    .flag("isRequired", input.is_required, false)
                    .string("placeholder", input.placeholder.as_deref())
                    .string("value", input.value.as_deref())
                    .string("min", input.min.as_deref())
                    .string("max", input.max.as_deref());
            }
            ElementBody::ToggleInput(input) => {
                writer
                    .flag("isRequired", input.is_required, false)
                    .string("title", Some(input.title.as_str()))
                    .string("value", input.value.as_deref())
                    .string("valueOn", Some(input.value_on.as_str()))
                    .string("valueOff", Some(input.value_off.as_str()));
            }
            ElementBody::Custom(_) | ElementBody::Unknown(_) => {}
        }
        writer.extend(&self.additional_properties).finish()
    }
}

/// Text with optional formatting. `language` is set from the card's `lang`
/// when the element does not carry its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
    pub size: TextSize,
    pub weight: TextWeight,
    pub color: TextColor,
    pub is_subtle: bool,
    pub wrap: bool,
    pub max_lines: u32,
    pub horizontal_alignment: HorizontalAlignment,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub url: String,
    pub size: ImageSize,
    pub style: ImageStyle,
    pub alt_text: Option<String>,
    pub horizontal_alignment: HorizontalAlignment,
    pub select_action: Option<Box<CardAction>>,
}

impl Image {
    fn write(&self, writer: &mut JsonWriter) {
        writer
            .string("url", Some(self.url.as_str()))
            .choice("size", self.size)
            .choice("style", self.style)
            .string("altText", self.alt_text.as_deref())
            .choice("horizontalAlignment", self.horizontal_alignment);
        if let Some(action) = &self.select_action {
            writer.value("selectAction", action.to_json());
        }
    }
}

/// Gallery of images. `image_size` of `Auto` defers to host config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSet {
    pub images: Vec<Image>,
    pub image_size: ImageSize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub items: Vec<CardElement>,
    pub style: ContainerStyle,
    pub vertical_content_alignment: VerticalContentAlignment,
    pub select_action: Option<Box<CardAction>>,
}

/// Columns laid out horizontally. Every entry of `columns` carries
/// [`ElementBody::Column`] unless a host registered its own `Column` parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    pub columns: Vec<CardElement>,
    pub select_action: Option<Box<CardAction>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub width: ColumnWidth,
    pub items: Vec<CardElement>,
    pub style: ContainerStyle,
    pub select_action: Option<Box<CardAction>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnWidth {
    #[default]
    Auto,
    Stretch,
    /// Relative weight against sibling weighted columns.
    Weight(u32),
    Pixels(u32),
}

impl ColumnWidth {
    /// Accepts `auto`, `stretch`, a bare number (weight), a numeric string,
    /// or `<n>px`.
    pub fn parse(value: &Value) -> Option<ColumnWidth> {
        match value {
            Value::Number(number) => number
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(ColumnWidth::Weight),
            Value::String(text) => {
                let text = text.trim();
                if text.eq_ignore_ascii_case("auto") {
                    Some(ColumnWidth::Auto)
                } else if text.eq_ignore_ascii_case("stretch") {
                    Some(ColumnWidth::Stretch)
                } else if let Some(pixels) = text
                    .strip_suffix("px")
                    .or_else(|| text.strip_suffix("PX"))
                {
                    pixels.trim().parse().ok().map(ColumnWidth::Pixels)
                } else {
                    text.parse().ok().map(ColumnWidth::Weight)
                }
            }
            _ => None,
        }
    }

    fn to_json_string(self) -> Option<String> {
        match self {
            ColumnWidth::Auto => None,
            ColumnWidth::Stretch => Some("stretch".to_string()),
            ColumnWidth::Weight(weight) => Some(weight.to_string()),
            ColumnWidth::Pixels(pixels) => Some(format!("{pixels}px")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSet {
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionSet {
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub is_required: bool,
    pub placeholder: Option<String>,
    pub value: Option<String>,
    pub is_multiline: bool,
    /// Zero means unlimited.
    pub max_length: u32,
    pub style: TextInputStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberInput {
    pub is_required: bool,
    pub placeholder: Option<String>,
    pub value: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInput {
    pub is_required: bool,
    pub placeholder: Option<String>,
    pub value: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeInput {
    pub is_required: bool,
    pub placeholder: Option<String>,
    pub value: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleInput {
    pub is_required: bool,
    pub title: String,
    pub value: Option<String>,
    pub value_on: String,
    pub value_off: String,
}

impl Default for ToggleInput {
    fn default() -> Self {
        Self {
            is_required: false,
            title: String::new(),
            value: None,
            value_on: "true".to_string(),
            value_off: "false".to_string(),
        }
    }
}

impl ToggleInput {
    pub fn is_on(&self) -> bool {
        self.value.as_deref() == Some(self.value_on.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceInput {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSetInput {
    pub is_required: bool,
    pub choices: Vec<ChoiceInput>,
    pub is_multi_select: bool,
    pub style: ChoiceSetStyle,
    /// Comma-separated selected values.
    pub value: Option<String>,
}

impl ChoiceSetInput {
    pub fn selected_values(&self) -> Vec<&str> {
        self.value
            .as_deref()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Element carried by name and raw JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomElement {
    pub type_name: String,
    pub payload: Value,
}

macro_rules! impl_into_body {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl From<$ty> for ElementBody {
                fn from(value: $ty) -> Self {
                    ElementBody::$ty(value)
                }
            }
        )+
    };
}

impl_into_body!(
    ActionSet,
    ChoiceSetInput,
    Column,
    ColumnSet,
    Container,
    DateInput,
    FactSet,
    Image,
    ImageSet,
    NumberInput,
    TextBlock,
    TextInput,
    TimeInput,
    ToggleInput,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn custom_elements_report_their_own_type_name() {
        let element = CardElement::custom("Rating", json!({"stars": 4}));
        assert_eq!(element.element_type(), ElementType::Custom);
        assert_eq!(element.element_type_string(), "Rating");
        assert_eq!(element.to_json(), json!({"type": "Rating", "stars": 4}));
    }

    #[test]
    fn column_width_forms() {
        assert_eq!(ColumnWidth::parse(&json!("Auto")), Some(ColumnWidth::Auto));
        assert_eq!(ColumnWidth::parse(&json!("stretch")), Some(ColumnWidth::Stretch));
        assert_eq!(ColumnWidth::parse(&json!(2)), Some(ColumnWidth::Weight(2)));
        assert_eq!(ColumnWidth::parse(&json!("3")), Some(ColumnWidth::Weight(3)));
        assert_eq!(ColumnWidth::parse(&json!("50px")), Some(ColumnWidth::Pixels(50)));
        assert_eq!(ColumnWidth::parse(&json!("wide")), None);
    }

    #[test]
    fn text_block_serializes_non_defaults() {
        let element = CardElement::new(TextBlock {
            text: "Hello".into(),
            weight: TextWeight::Bolder,
            wrap: true,
            ..TextBlock::default()
        })
        .with_id("title");
        assert_eq!(
            element.to_json(),
            json!({
                "type": "TextBlock",
                "id": "title",
                "text": "Hello",
                "weight": "bolder",
                "wrap": true
            })
        );
    }

    #[test]
    fn choice_set_selected_values() {
        let input = ChoiceSetInput {
            value: Some("a, b,,c".into()),
            ..ChoiceSetInput::default()
        };
        assert_eq!(input.selected_values(), vec!["a", "b", "c"]);
    }
}
