//! Typed Adaptive Card object model.
//!
//! JSON is turned into typed elements and actions by parsers looked up in
//! case-insensitive registries ([`ElementParserRegistration`] and
//! [`ActionParserRegistration`]). Hosts add custom element or action types by
//! registering their own parsers; unknown types are handled according to an
//! [`UnknownTypePolicy`] and reported as [`CardWarning`]s.

pub mod action;
pub mod card;
pub mod element;
pub mod enums;
pub mod errors;
mod json;
pub mod parse;
pub mod parsers;
pub mod types;
pub mod warning;

pub use action::{ActionBody, CardAction, CustomAction, OpenUrlAction, ShowCardAction, SubmitAction};
pub use card::{AdaptiveCard, ParseResult, SUPPORTED_SCHEMA_VERSION, parse_card, parse_card_str};
pub use element::{
    ActionSet, CardElement, ChoiceInput, ChoiceSetInput, Column, ColumnSet, ColumnWidth, Container,
    CustomElement, DateInput, ElementBody, Fact, FactSet, Image, ImageSet, NumberInput, TextBlock,
    TextInput, TimeInput, ToggleInput,
};
pub use enums::{
    CardEnum, ChoiceSetStyle, ContainerStyle, HorizontalAlignment, ImageSize, ImageStyle, Spacing,
    TextColor, TextInputStyle, TextSize, TextWeight, VerticalContentAlignment,
};
pub use errors::ParseError;
pub use parse::{
    ActionParser, ActionParserRegistration, ElementParser, ElementParserRegistration, ParseContext,
    UnknownTypePolicy,
};
pub use parsers::{default_action_parsers, default_element_parsers};
pub use types::{ActionType, ElementType, NodeKind};
pub use warning::{CardWarning, WarningStatusCode};
