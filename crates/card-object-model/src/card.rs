use serde_json::{Map, Value};

use crate::{
    action::{ActionBody, CardAction},
    element::{CardElement, ElementBody},
    errors::ParseError,
    json::{self, JsonWriter},
    parse::{ActionParserRegistration, ElementParserRegistration, ParseContext, UnknownTypePolicy},
    types::ElementType,
    warning::{CardWarning, WarningStatusCode},
};

/// Highest schema version this model understands.
pub const SUPPORTED_SCHEMA_VERSION: &str = "1.1";

const CARD_KEYS: &[&str] = &[
    "type",
    "version",
    "fallbackText",
    "lang",
    "speak",
    "backgroundImage",
    "body",
    "actions",
    "$schema",
];

/// Root of a card document, also used for the nested card of `Action.ShowCard`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdaptiveCard {
    pub version: Option<String>,
    pub fallback_text: Option<String>,
    pub lang: Option<String>,
    pub speak: Option<String>,
    pub background_image: Option<String>,
    pub body: Vec<CardElement>,
    pub actions: Vec<CardAction>,
    pub additional_properties: Map<String, Value>,
}

/// A parsed card together with the warnings collected while parsing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub card: AdaptiveCard,
    pub warnings: Vec<CardWarning>,
}

/// Parses a card from JSON text.
pub fn parse_card_str(
    json: &str,
    element_parsers: &ElementParserRegistration,
    action_parsers: &ActionParserRegistration,
    policy: UnknownTypePolicy,
) -> Result<ParseResult, ParseError> {
    let value: Value = serde_json::from_str(json)?;
    parse_card(&value, element_parsers, action_parsers, policy)
}

/// Parses a card from a JSON value.
pub fn parse_card(
    value: &Value,
    element_parsers: &ElementParserRegistration,
    action_parsers: &ActionParserRegistration,
    policy: UnknownTypePolicy,
) -> Result<ParseResult, ParseError> {
    let Some(map) = value.as_object() else {
        return Err(ParseError::ExpectedObject {
            what: "the card root".to_string(),
        });
    };
    let mut context = ParseContext::new(element_parsers, action_parsers, policy);
    let card = AdaptiveCard::parse_object(map, &mut context, true)?;
    Ok(ParseResult {
        card,
        warnings: context.into_warnings(),
    })
}

impl AdaptiveCard {
    pub(crate) fn parse_object(
        map: &Map<String, Value>,
        context: &mut ParseContext<'_>,
        is_root: bool,
    ) -> Result<AdaptiveCard, ParseError> {
        let type_name = ElementType::AdaptiveCard.type_name();
        match map.get("type").and_then(Value::as_str) {
            Some(found) if !found.trim().eq_ignore_ascii_case(type_name) => {
                return Err(if is_root {
                    ParseError::NotAnAdaptiveCard {
                        found: found.to_string(),
                    }
                } else {
                    let reason = format!("nested card has type `{found}`");
                    ParseError::invalid(type_name, "type", reason)
                });
            }
            None if is_root => {
                return Err(ParseError::missing(type_name, "type"));
            }
            _ => {}
        }

        let version = json::string(map, "version", type_name)?;
        if is_root {
            check_version(version.as_deref(), context);
        }

        let mut card = AdaptiveCard {
            version,
            fallback_text: json::string(map, "fallbackText", type_name)?,
            lang: json::string(map, "lang", type_name)?,
            speak: json::string(map, "speak", type_name)?,
            background_image: background_image(map)?,
            body: context.parse_elements(map, "body", type_name)?,
            actions: context.parse_actions(map, "actions", type_name)?,
            additional_properties: json::additional_properties(map, CARD_KEYS, &[]),
        };
        if let Some(lang) = card.lang.clone() {
            propagate_language(&lang, &mut card.body);
            propagate_language_to_actions(&lang, &mut card.actions);
        }
        Ok(card)
    }

    pub fn to_json(&self) -> Value {
        JsonWriter::new(ElementType::AdaptiveCard.type_name())
            .string("version", self.version.as_deref())
            .string("fallbackText", self.fallback_text.as_deref())
            .string("lang", self.lang.as_deref())
            .string("speak", self.speak.as_deref())
            .string("backgroundImage", self.background_image.as_deref())
            .list("body", self.body.iter().map(CardElement::to_json).collect())
            .list("actions", self.actions.iter().map(CardAction::to_json).collect())
            .extend(&self.additional_properties)
            .finish()
    }

    /// Depth-first walk over every element of the body, including those
    /// nested in containers and columns.
    pub fn walk(&self, visit: &mut impl FnMut(&CardElement)) {
        fn walk_elements(elements: &[CardElement], visit: &mut impl FnMut(&CardElement)) {
            for element in elements {
                visit(element);
                walk_elements(element.children(), visit);
            }
        }
        walk_elements(&self.body, visit);
    }

    /// Ids of every input element in the body.
    pub fn input_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.walk(&mut |element| {
            if element.element_type().is_input() {
                if let Some(id) = &element.id {
                    ids.push(id.clone());
                }
            }
        });
        ids
    }
}

/// `backgroundImage` is either a URL string or an object with a `url`.
fn background_image(map: &Map<String, Value>) -> Result<Option<String>, ParseError> {
    match map.get("backgroundImage") {
        Some(Value::Object(image)) => json::string(image, "url", "backgroundImage"),
        _ => json::string(map, "backgroundImage", ElementType::AdaptiveCard.type_name()),
    }
}

fn check_version(version: Option<&str>, context: &mut ParseContext<'_>) {
    let Some(version) = version else {
        context.add_warning(
            WarningStatusCode::RequiredPropertyMissing,
            "card is missing `version`",
        );
        return;
    };
    match (parse_version(version), parse_version(SUPPORTED_SCHEMA_VERSION)) {
        (Some(found), Some(supported)) if found > supported => context.add_warning(
            WarningStatusCode::UnsupportedSchemaVersion,
            format!(
                "card version {version} is newer than supported version \
                 {SUPPORTED_SCHEMA_VERSION}"
            ),
        ),
        (None, _) => context.add_warning(
            WarningStatusCode::InvalidValue,
            format!("card version `{version}` is not of the form major.minor"),
        ),
        _ => {}
    }
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(minor) => minor.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

/// Gives every text block and date/time input without its own language
/// the card's language, descending into containers, columns and the
/// nested cards of show-card actions.
fn propagate_language(language: &str, elements: &mut [CardElement]) {
    for element in elements {
        match &mut element.body {
            ElementBody::TextBlock(text) if text.language.is_none() => {
                text.language = Some(language.to_string());
            }
            ElementBody::DateInput(input) if input.language.is_none() => {
                input.language = Some(language.to_string());
            }
            ElementBody::TimeInput(input) if input.language.is_none() => {
                input.language = Some(language.to_string());
            }
            ElementBody::Container(container) => propagate_language(language, &mut container.items),
            ElementBody::ColumnSet(set) => propagate_language(language, &mut set.columns),
            ElementBody::Column(column) => propagate_language(language, &mut column.items),
            ElementBody::ActionSet(set) => {
                propagate_language_to_actions(language, &mut set.actions)
            }
            _ => {}
        }
    }
}

/// A nested card with its own `lang` already propagated it while parsing.
fn propagate_language_to_actions(language: &str, actions: &mut [CardAction]) {
    for action in actions {
        if let ActionBody::ShowCard(show_card) = &mut action.body {
            let card = &mut show_card.card;
            if card.lang.is_none() {
                propagate_language(language, &mut card.body);
                propagate_language_to_actions(language, &mut card.actions);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parsing() {
        assert_eq!(parse_version("1.0"), Some((1, 0)));
        assert_eq!(parse_version("2"), Some((2, 0)));
        assert_eq!(parse_version("1.x"), None);
        assert!(parse_version("1.2") > parse_version(SUPPORTED_SCHEMA_VERSION));
    }
}
