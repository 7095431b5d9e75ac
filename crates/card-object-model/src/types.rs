use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag carried by every parsed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    ActionSet,
    AdaptiveCard,
    ChoiceInput,
    ChoiceSetInput,
    Column,
    ColumnSet,
    Container,
    Custom,
    DateInput,
    Fact,
    FactSet,
    Image,
    ImageSet,
    NumberInput,
    TextBlock,
    TextInput,
    TimeInput,
    ToggleInput,
    Unknown,
}

impl ElementType {
    /// Element types with a built-in parser and renderer.
    pub const BUILT_IN: &'static [ElementType] = &[
        ElementType::ActionSet,
        ElementType::ChoiceSetInput,
        ElementType::Column,
        ElementType::ColumnSet,
        ElementType::Container,
        ElementType::DateInput,
        ElementType::FactSet,
        ElementType::Image,
        ElementType::ImageSet,
        ElementType::NumberInput,
        ElementType::TextBlock,
        ElementType::TextInput,
        ElementType::TimeInput,
        ElementType::ToggleInput,
    ];

    /// The `type` string used in card JSON.
    pub fn type_name(self) -> &'static str {
        match self {
            ElementType::ActionSet => "ActionSet",
            ElementType::AdaptiveCard => "AdaptiveCard",
            ElementType::ChoiceInput => "Input.Choice",
            ElementType::ChoiceSetInput => "Input.ChoiceSet",
            ElementType::Column => "Column",
            ElementType::ColumnSet => "ColumnSet",
            ElementType::Container => "Container",
            ElementType::Custom => "Custom",
            ElementType::DateInput => "Input.Date",
            ElementType::Fact => "Fact",
            ElementType::FactSet => "FactSet",
            ElementType::Image => "Image",
            ElementType::ImageSet => "ImageSet",
            ElementType::NumberInput => "Input.Number",
            ElementType::TextBlock => "TextBlock",
            ElementType::TextInput => "Input.Text",
            ElementType::TimeInput => "Input.Time",
            ElementType::ToggleInput => "Input.Toggle",
            ElementType::Unknown => "Unknown",
        }
    }

    /// Maps a JSON `type` string to its tag; unrecognised names are `Unknown`.
    pub fn from_type_name(type_name: &str) -> ElementType {
        const NAMED: &[ElementType] = &[
            ElementType::ActionSet,
            ElementType::AdaptiveCard,
            ElementType::ChoiceInput,
            ElementType::ChoiceSetInput,
            ElementType::Column,
            ElementType::ColumnSet,
            ElementType::Container,
            ElementType::DateInput,
            ElementType::Fact,
            ElementType::FactSet,
            ElementType::Image,
            ElementType::ImageSet,
            ElementType::NumberInput,
            ElementType::TextBlock,
            ElementType::TextInput,
            ElementType::TimeInput,
            ElementType::ToggleInput,
        ];
        let type_name = type_name.trim();
        NAMED
            .iter()
            .copied()
            .find(|candidate| candidate.type_name().eq_ignore_ascii_case(type_name))
            .unwrap_or(ElementType::Unknown)
    }

    pub fn is_input(self) -> bool {
        matches!(
            self,
            ElementType::ChoiceSetInput
                | ElementType::DateInput
                | ElementType::NumberInput
                | ElementType::TextInput
                | ElementType::TimeInput
                | ElementType::ToggleInput
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Tag carried by every parsed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Submit,
    OpenUrl,
    ShowCard,
    Custom,
    Unknown,
}

impl ActionType {
    pub const BUILT_IN: &'static [ActionType] =
        &[ActionType::Submit, ActionType::OpenUrl, ActionType::ShowCard];

    pub fn type_name(self) -> &'static str {
        match self {
            ActionType::Submit => "Action.Submit",
            ActionType::OpenUrl => "Action.OpenUrl",
            ActionType::ShowCard => "Action.ShowCard",
            ActionType::Custom => "Custom",
            ActionType::Unknown => "Unknown",
        }
    }

    pub fn from_type_name(type_name: &str) -> ActionType {
        let type_name = type_name.trim();
        ActionType::BUILT_IN
            .iter()
            .copied()
            .find(|candidate| candidate.type_name().eq_ignore_ascii_case(type_name))
            .unwrap_or(ActionType::Unknown)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Which of the two registries a type name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Element,
    Action,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Element => f.write_str("element"),
            NodeKind::Action => f.write_str("action"),
        }
    }
}
