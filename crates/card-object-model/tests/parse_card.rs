use std::sync::Arc;

use card_object_model::{
    ActionBody, CardElement, ElementBody, ElementParser, ElementType, NodeKind,
    ParseContext, ParseError, ParseResult, UnknownTypePolicy, WarningStatusCode,
    default_action_parsers, default_element_parsers, parse_card, parse_card_str,
};
use serde_json::{Map, Value, json};

fn parse(value: Value) -> ParseResult {
    parse_with(value, UnknownTypePolicy::default())
}

fn parse_with(value: Value, policy: UnknownTypePolicy) -> ParseResult {
    parse_card(
        &value,
        &default_element_parsers(),
        &default_action_parsers(),
        policy,
    )
    .expect("card parses")
}

fn codes(result: &ParseResult) -> Vec<WarningStatusCode> {
    result.warnings.iter().map(|w| w.status_code).collect()
}

#[test]
fn parses_designer_sample_card() {
    let result = parse(json!({
        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {
                "type": "Container",
                "items": [
                    {
                        "type": "TextBlock",
                        "text": "Publish Adaptive Card schema",
                        "weight": "bolder",
                        "size": "medium"
                    },
                    {
                        "type": "ColumnSet",
                        "columns": [
                            {"type": "Column", "width": "auto", "items": [
                                {
                                    "type": "Image",
                                    "url": "https://example.com/p.jpg",
                                    "size": "small",
                                    "style": "person"
                                }
                            ]},
                            {"type": "Column", "width": "stretch", "items": [
                                {
                                    "type": "TextBlock",
                                    "text": "Matt Hidinger",
                                    "weight": "bolder",
                                    "wrap": true
                                },
                                {
                                    "type": "TextBlock",
                                    "spacing": "none",
                                    "text": "Created today",
                                    "isSubtle": true,
                                    "wrap": true
                                }
                            ]}
                        ]
                    }
                ]
            },
            {"type": "ActionSet", "actions": [
                {"type": "Action.ShowCard", "title": "Set due date", "card": {
                    "type": "AdaptiveCard",
                    "body": [{"type": "Input.Date", "id": "dueDate", "title": "Select due date"}],
                    "actions": [{"type": "Action.Submit", "title": "OK"}]
                }}
            ]}
        ],
        "actions": [{"type": "Action.OpenUrl", "title": "View", "url": "https://adaptivecards.io"}]
    }));

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    let card = &result.card;
    assert_eq!(card.version.as_deref(), Some("1.0"));
    assert_eq!(card.body.len(), 2);
    assert_eq!(card.body[0].element_type(), ElementType::Container);
    assert_eq!(card.body[1].element_type(), ElementType::ActionSet);

    let columns = card.body[0].children()[1].children();
    assert_eq!(columns.len(), 2);
    assert!(columns.iter().all(|c| c.element_type() == ElementType::Column));

    let ElementBody::ActionSet(set) = &card.body[1].body else {
        panic!("expected action set");
    };
    let ActionBody::ShowCard(show) = &set.actions[0].body else {
        panic!("expected show card");
    };
    assert_eq!(show.card.body[0].element_type(), ElementType::DateInput);
    assert_eq!(card.actions[0].title.as_deref(), Some("View"));
}

#[test]
fn element_type_names_are_case_insensitive() {
    let result = parse(json!({
        "type": "adaptivecard",
        "version": "1.0",
        "body": [
            {"type": "textblock", "text": "lower"},
            {"type": "INPUT.TOGGLE", "id": "t", "title": "Agree"}
        ],
        "actions": [{"type": "action.submit", "title": "Go"}]
    }));
    assert!(result.warnings.is_empty());
    assert_eq!(result.card.body[0].element_type(), ElementType::TextBlock);
    assert_eq!(result.card.body[1].element_type(), ElementType::ToggleInput);
    assert_eq!(result.card.actions.len(), 1);
}

#[test]
fn unknown_types_are_dropped_with_warnings_and_siblings_survive() {
    let result = parse(json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {"type": "Carousel"},
            {"type": "TextBlock", "text": "kept"}
        ],
        "actions": [{"type": "Action.Execute", "title": "Run"}]
    }));
    assert_eq!(result.card.body.len(), 1);
    assert!(result.card.actions.is_empty());
    assert_eq!(
        codes(&result),
        vec![
            WarningStatusCode::UnknownElementType,
            WarningStatusCode::UnknownActionElementType
        ]
    );
    assert_eq!(result.warnings[0].path.as_deref(), Some("/body/0"));
    assert_eq!(result.warnings[1].path.as_deref(), Some("/actions/0"));
}

#[test]
fn keep_as_unknown_preserves_raw_json() {
    let node = json!({"type": "Carousel", "pages": [1, 2]});
    let result = parse_with(
        json!({"type": "AdaptiveCard", "version": "1.0", "body": [node.clone()]}),
        UnknownTypePolicy::KeepAsUnknown,
    );
    assert_eq!(result.card.body[0].element_type(), ElementType::Unknown);
    assert_eq!(result.card.body[0].to_json(), node);
}

#[test]
fn fail_policy_aborts_even_when_nested() {
    let err = parse_card(
        &json!({
            "type": "AdaptiveCard",
            "version": "1.0",
            "body": [{"type": "Container", "items": [{"type": "Carousel"}]}]
        }),
        &default_element_parsers(),
        &default_action_parsers(),
        UnknownTypePolicy::Fail,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnknownType {
            kind: NodeKind::Element,
            ref type_name,
        } if type_name == "Carousel"
    ));
}

#[test]
fn handler_failures_skip_only_the_failing_element() {
    let result = parse(json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {"type": "Image"},
            {"type": "Input.Text", "placeholder": "no id"},
            {"type": "TextBlock", "text": "fine", "wrap": "sometimes"},
            {"type": "TextBlock", "text": "survivor"}
        ]
    }));
    assert_eq!(result.card.body.len(), 1);
    assert_eq!(
        codes(&result),
        vec![
            WarningStatusCode::RequiredPropertyMissing,
            WarningStatusCode::RequiredPropertyMissing,
            WarningStatusCode::InvalidValue
        ]
    );
}

#[test]
fn unknown_enum_values_fall_back_with_warning() {
    let result = parse(json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [{"type": "TextBlock", "text": "x", "color": "purple"}]
    }));
    assert_eq!(result.card.body.len(), 1);
    assert_eq!(codes(&result), vec![WarningStatusCode::UnknownEnumValue]);
}

#[test]
fn newer_schema_version_warns() {
    let result = parse(json!({"type": "AdaptiveCard", "version": "1.5", "body": []}));
    assert_eq!(codes(&result), vec![WarningStatusCode::UnsupportedSchemaVersion]);
}

#[test]
fn root_must_be_an_adaptive_card() {
    let err = parse_card_str(
        r#"{"type": "MessageCard"}"#,
        &default_element_parsers(),
        &default_action_parsers(),
        UnknownTypePolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::NotAnAdaptiveCard { .. }));

    let err = parse_card_str(
        "{not json",
        &default_element_parsers(),
        &default_action_parsers(),
        UnknownTypePolicy::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn language_propagates_into_nested_text() {
    let result = parse(json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "lang": "fr",
        "body": [
            {"type": "Container", "items": [{"type": "TextBlock", "text": "Bonjour"}]},
            {"type": "ColumnSet", "columns": [{"items": [{"type": "Input.Date", "id": "d"}]}]}
        ]
    }));
    let mut languages = Vec::new();
    result.card.walk(&mut |element| match &element.body {
        ElementBody::TextBlock(text) => languages.push(text.language.clone()),
        ElementBody::DateInput(input) => languages.push(input.language.clone()),
        _ => {}
    });
    assert_eq!(languages, vec![Some("fr".to_string()), Some("fr".to_string())]);
    assert_eq!(result.card.input_ids(), vec!["d".to_string()]);
}

#[test]
fn serializes_back_to_equivalent_json() {
    let source = json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {"type": "TextBlock", "text": "Hello", "size": "large", "x-extra": true},
            {"type": "Input.ChoiceSet", "id": "color", "style": "expanded", "choices": [
                {"type": "Input.Choice", "title": "Red", "value": "red"}
            ]},
            {"type": "FactSet", "facts": [{"title": "Owner", "value": "Ada"}]}
        ],
        "actions": [{"type": "Action.Submit", "title": "Send", "data": {"x": 1}}]
    });
    let result = parse(source.clone());
    assert_eq!(result.card.to_json(), source);
}

struct RatingParser;

impl ElementParser for RatingParser {
    fn from_json(
        &self,
        json: &Map<String, Value>,
        context: &mut ParseContext<'_>,
    ) -> Result<CardElement, ParseError> {
        // Nested body resolves through the same registries.
        let footer = context.parse_elements(json, "footer", "Rating")?;
        let stars = json.get("stars").cloned().unwrap_or(json!(0));
        Ok(CardElement::custom(
            "Rating",
            json!({"stars": stars, "footerCount": footer.len()}),
        ))
    }
}

#[test]
fn host_registered_parser_handles_custom_type() {
    let mut elements = default_element_parsers();
    elements.set("Rating", Arc::new(RatingParser)).unwrap();
    let result = parse_card(
        &json!({
            "type": "AdaptiveCard",
            "version": "1.0",
            "body": [{
                "type": "rating",
                "stars": 5,
                "footer": [{"type": "TextBlock", "text": "thanks"}]
            }]
        }),
        &elements,
        &default_action_parsers(),
        UnknownTypePolicy::Fail,
    )
    .expect("custom type parses");
    let element = &result.card.body[0];
    assert_eq!(element.element_type(), ElementType::Custom);
    assert_eq!(element.element_type_string(), "Rating");
    let ElementBody::Custom(custom) = &element.body else {
        panic!("expected custom element");
    };
    assert_eq!(custom.payload["footerCount"], json!(1));
}

#[test]
fn removing_a_builtin_parser_makes_it_unknown() {
    let mut elements = default_element_parsers();
    elements.remove("Image");
    let result = parse_card(
        &json!({"type": "AdaptiveCard", "version": "1.0", "body": [{"type": "Image", "url": "u"}]}),
        &elements,
        &default_action_parsers(),
        UnknownTypePolicy::default(),
    )
    .unwrap();
    assert!(result.card.body.is_empty());
    assert_eq!(codes(&result), vec![WarningStatusCode::UnknownElementType]);
}

#[test]
fn bad_set_items_are_skipped_individually() {
    let result = parse(json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {"type": "ImageSet", "images": [
                {"type": "Image", "url": "https://a/1.png"},
                {"type": "Image"},
                {"type": "Image", "url": "https://a/3.png", "size": "huge"}
            ]},
            {"type": "FactSet", "facts": [
                {"title": "Owner"},
                {"title": "Status", "value": "Open"}
            ]},
            {"type": "Input.ChoiceSet", "id": "color", "choices": [
                "red",
                {"title": "Blue", "value": "blue"}
            ]}
        ]
    }));
    assert_eq!(result.card.body.len(), 3);

    let ElementBody::ImageSet(images) = &result.card.body[0].body else {
        panic!("expected an image set");
    };
    let urls: Vec<&str> = images.images.iter().map(|image| image.url.as_str()).collect();
    assert_eq!(urls, vec!["https://a/1.png", "https://a/3.png"]);

    let ElementBody::FactSet(facts) = &result.card.body[1].body else {
        panic!("expected a fact set");
    };
    assert_eq!(facts.facts.len(), 1);
    assert_eq!(facts.facts[0].value, "Open");

    let ElementBody::ChoiceSetInput(choices) = &result.card.body[2].body else {
        panic!("expected a choice set");
    };
    assert_eq!(choices.choices.len(), 1);
    assert_eq!(choices.choices[0].value, "blue");

    let reported: Vec<(WarningStatusCode, Option<&str>)> = result
        .warnings
        .iter()
        .map(|w| (w.status_code, w.path.as_deref()))
        .collect();
    assert_eq!(
        reported,
        vec![
            (WarningStatusCode::RequiredPropertyMissing, Some("/body/0/images/1")),
            (WarningStatusCode::UnknownEnumValue, Some("/body/0/images/2")),
            (WarningStatusCode::RequiredPropertyMissing, Some("/body/1/facts/0")),
            (WarningStatusCode::InvalidValue, Some("/body/2/choices/0")),
        ]
    );
}

#[test]
fn skipped_container_reports_only_its_own_failure() {
    let result = parse(json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "body": [
            {"type": "Container", "separator": 5, "items": [
                {"type": "Carousel"},
                {"type": "TextBlock", "text": "gone", "size": "huge"}
            ]},
            {"type": "TextBlock", "text": "kept", "size": "huge"}
        ]
    }));
    assert_eq!(result.card.body.len(), 1);
    let reported: Vec<(WarningStatusCode, Option<&str>)> = result
        .warnings
        .iter()
        .map(|w| (w.status_code, w.path.as_deref()))
        .collect();
    assert_eq!(
        reported,
        vec![
            (WarningStatusCode::InvalidValue, Some("/body/0")),
            (WarningStatusCode::UnknownEnumValue, Some("/body/1")),
        ]
    );
}

#[test]
fn language_reaches_show_card_bodies() {
    let result = parse(json!({
        "type": "AdaptiveCard",
        "version": "1.0",
        "lang": "de",
        "body": [
            {"type": "ActionSet", "actions": [
                {"type": "Action.ShowCard", "title": "More", "card": {
                    "type": "AdaptiveCard",
                    "body": [{"type": "Input.Time", "id": "t"}]
                }}
            ]}
        ],
        "actions": [
            {"type": "Action.ShowCard", "title": "Details", "card": {
                "type": "AdaptiveCard",
                "body": [{"type": "TextBlock", "text": "Hallo"}]
            }},
            {"type": "Action.ShowCard", "title": "English", "card": {
                "type": "AdaptiveCard",
                "lang": "en",
                "body": [{"type": "TextBlock", "text": "Hello"}]
            }}
        ]
    }));
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);

    let nested_body = |action: &card_object_model::CardAction| match &action.body {
        ActionBody::ShowCard(show_card) => show_card.card.body.clone(),
        other => panic!("expected a show card, got {other:?}"),
    };
    let ElementBody::ActionSet(set) = &result.card.body[0].body else {
        panic!("expected an action set");
    };
    let show_card_body = nested_body(&set.actions[0]);
    let ElementBody::TimeInput(time) = &show_card_body[0].body else {
        panic!("expected a time input");
    };
    assert_eq!(time.language.as_deref(), Some("de"));

    let languages: Vec<Option<String>> = result
        .card
        .actions
        .iter()
        .map(|action| match &nested_body(action)[0].body {
            ElementBody::TextBlock(text) => text.language.clone(),
            other => panic!("expected a text block, got {other:?}"),
        })
        .collect();
    assert_eq!(languages, vec![Some("de".to_string()), Some("en".to_string())]);
    assert_eq!(result.card.actions[0].to_json()["card"].get("lang"), None);
}

#[test]
fn default_parsers_cover_builtin_types() {
    let elements = default_element_parsers();
    for element_type in ElementType::BUILT_IN {
        assert!(elements.contains(element_type.type_name()), "{element_type}");
    }
    assert_eq!(default_action_parsers().len(), 3);
}
