//! Construction of UI nodes for the built-in element and action types.
//!
//! Every builder receives the element (for its common fields), its typed
//! body, the render context and the args handed down by the parent.

use card_object_model::{
    ActionSet, ActionType, AdaptiveCard, CardAction, CardElement, CardEnum, ChoiceSetInput,
    ChoiceSetStyle, Column, ColumnSet, ColumnWidth, Container, DateInput, FactSet, Image,
    ImageSet, ImageSize, ImageStyle, NumberInput, OpenUrlAction, ParseError, ShowCardAction,
    Spacing, SubmitAction, TextBlock, TextInput, TextWeight, TimeInput, ToggleInput,
    WarningStatusCode,
};
use serde_json::{Value, json};

use crate::{
    args::RenderArgs,
    config::ShowCardActionMode,
    context::RenderContext,
    errors::RenderError,
    ui::{UiKind, UiNode},
};

/// URL schemes an image source may use.
const ASSET_SCHEMES: &[&str] = &["http", "https", "data", "file", "ms-appx", "ms-appdata"];

/// Marks the collapsed panel an inline `Action.ShowCard` hands to its action bar.
const INLINE_SHOW_CARD: &str = "inlineShowCard";

/// Renders a whole card: a background border around the body panel and the
/// card's action bar.
pub fn build_card(
    card: &AdaptiveCard,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> UiNode {
    let config = context.host_config();
    let mut root = UiNode::new(UiKind::Border)
        .with("background", context.background_color(args.container_style))
        .with("padding", config.spacing.padding)
        .with_opt("backgroundImage", card.background_image.as_deref())
        .with_opt("language", card.lang.as_deref())
        .with_opt("speak", card.speak.as_deref());

    let body_args = args.child(UiKind::StackPanel);
    let mut body = UiNode::new(UiKind::StackPanel);
    build_panel_children(&card.body, context, &body_args, &mut body);

    if !card.actions.is_empty() {
        match build_action_bar(&card.actions, "card actions", context, &body_args) {
            Ok(mut bar) => {
                if !body.children.is_empty() {
                    bar.set("spacing", config.spacing(Spacing::Default));
                }
                body.push(bar);
            }
            Err(err) => {
                context.add_warning(err.warning_code(), format!("card actions skipped: {err}"))
            }
        }
    }
    root.with_child(body)
}

/// Renders `elements` into `panel`, placing the configured spacing or a
/// separator line before every element but the first.
pub fn build_panel_children(
    elements: &[CardElement],
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
    panel: &mut UiNode,
) {
    let config = context.host_config();
    for element in elements {
        let Some(mut node) = context.render_element(element, args) else {
            continue;
        };
        if !panel.children.is_empty() {
            let spacing = config.spacing(element.spacing);
            if element.separator {
                panel.push(build_separator(context, spacing, "horizontal"));
            } else {
                node.set("spacing", spacing);
            }
        }
        if let Some(id) = &element.id {
            node.set("id", id.as_str());
        }
        panel.push(node);
    }
}

fn build_separator(context: &RenderContext<'_>, spacing: u32, orientation: &str) -> UiNode {
    let separator = &context.host_config().separator;
    UiNode::new(UiKind::Separator)
        .with("thickness", separator.line_thickness)
        .with("color", separator.line_color.as_str())
        .with("spacing", spacing)
        .with("orientation", orientation)
}

pub fn build_text_block(
    _element: &CardElement,
    text: &TextBlock,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let config = context.host_config();
    let mut node = UiNode::new(UiKind::TextBlock)
        .with("text", text.text.as_str())
        .with("fontFamily", config.font_family.as_str())
        .with("fontSize", config.font_size(text.size))
        .with("fontWeight", config.font_weight(text.weight))
        .with(
            "foreground",
            context.foreground_color(text.color, text.is_subtle, args.container_style),
        )
        .with("horizontalAlignment", text.horizontal_alignment.as_str())
        .with("wrap", text.wrap)
        .with_opt("language", text.language.as_deref());
    if text.max_lines > 0 {
        node.set("maxLines", text.max_lines);
    }
    Ok(node)
}

pub fn build_image(
    _element: &CardElement,
    image: &Image,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let node = image_node(image, image.size, context)?;
    Ok(wrap_select_action(node, image.select_action.as_deref(), context, args))
}

fn image_node(
    image: &Image,
    size: ImageSize,
    context: &RenderContext<'_>,
) -> Result<UiNode, RenderError> {
    check_asset_url(&image.url)?;
    let mut node = UiNode::new(UiKind::Image)
        .with("source", image.url.as_str())
        .with("horizontalAlignment", image.horizontal_alignment.as_str())
        .with_opt("altText", image.alt_text.as_deref());
    match context.host_config().image_size(size) {
        Some(pixels) => {
            node.set("width", pixels);
            node.set("stretch", "uniform");
        }
        None if size == ImageSize::Stretch => node.set("stretch", "uniformToFill"),
        None => node.set("stretch", "none"),
    }
    if image.style == ImageStyle::Person {
        node.set("clip", "ellipse");
    }
    Ok(node)
}

fn check_asset_url(url: &str) -> Result<(), RenderError> {
    let scheme = url.split_once(':').map(|(scheme, _)| scheme.trim());
    match scheme {
        Some(scheme) if ASSET_SCHEMES.iter().any(|known| known.eq_ignore_ascii_case(scheme)) => {
            Ok(())
        }
        _ => Err(RenderError::AssetLoadFailed {
            url: url.to_string(),
            reason: "missing or unsupported URL scheme".to_string(),
        }),
    }
}

/// Images share the set's size, or the host's image set size when the set
/// leaves it on `auto`. A failing image is skipped on its own.
pub fn build_image_set(
    _element: &CardElement,
    set: &ImageSet,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let config = context.host_config();
    let size = match set.image_size {
        ImageSize::Auto => config.image_set.image_size,
        size => size,
    };
    let child_args = args.child(UiKind::StackPanel);
    let mut panel = UiNode::new(UiKind::StackPanel)
        .with("orientation", "horizontal")
        .with("wrap", true);
    for image in &set.images {
        match image_node(image, size, context) {
            Ok(node) => {
                let select_action = image.select_action.as_deref();
                let mut node = wrap_select_action(node, select_action, context, &child_args);
                node.set("maxHeight", config.image_set.max_image_height);
                panel.push(node);
            }
            Err(err) => context.add_warning(err.warning_code(), format!("image skipped: {err}")),
        }
    }
    Ok(panel)
}

pub fn build_container(
    _element: &CardElement,
    container: &Container,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let child_args = args.styled(container.style, UiKind::StackPanel);
    let mut panel = UiNode::new(UiKind::StackPanel)
        .with("verticalContentAlignment", container.vertical_content_alignment.as_str());
    build_panel_children(&container.items, context, &child_args, &mut panel);
    let border = styled_border(panel, args, &child_args, context);
    Ok(wrap_select_action(border, container.select_action.as_deref(), context, args))
}

/// Border drawing a background only where the style differs from the parent's.
fn styled_border(
    content: UiNode,
    parent: &RenderArgs,
    own: &RenderArgs,
    context: &RenderContext<'_>,
) -> UiNode {
    let mut border = UiNode::new(UiKind::Border).with("style", own.container_style.as_str());
    if own.container_style != parent.container_style {
        border.set("background", context.background_color(own.container_style));
        border.set("padding", context.host_config().spacing.padding);
    }
    border.with_child(content)
}

/// Columns are dispatched through the registry like any other element, so a
/// host-registered `Column` renderer takes part in column sets.
pub fn build_column_set(
    _element: &CardElement,
    set: &ColumnSet,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let config = context.host_config();
    let child_args = args.child(UiKind::Grid);
    let mut grid = UiNode::new(UiKind::Grid);
    let mut widths = Vec::new();
    for column in &set.columns {
        let Some(mut node) = context.render_element(column, &child_args) else {
            continue;
        };
        if !grid.children.is_empty() {
            let spacing = config.spacing(column.spacing);
            if column.separator {
                let mut separator = build_separator(context, spacing, "vertical");
                separator.set("gridColumn", grid.children.len());
                widths.push(Value::from("auto"));
                grid.push(separator);
            } else {
                node.set("spacing", spacing);
            }
        }
        if let Some(id) = &column.id {
            node.set("id", id.as_str());
        }
        node.set("gridColumn", grid.children.len());
        widths.push(node.property("width").cloned().unwrap_or_else(|| Value::from("auto")));
        grid.push(node);
    }
    grid.set("columnWidths", widths);
    Ok(wrap_select_action(grid, set.select_action.as_deref(), context, args))
}

pub fn build_column(
    _element: &CardElement,
    column: &Column,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let child_args = args.styled(column.style, UiKind::StackPanel);
    let mut panel = UiNode::new(UiKind::StackPanel);
    build_panel_children(&column.items, context, &child_args, &mut panel);
    let mut border = styled_border(panel, args, &child_args, context);
    border.set("width", column_width(column.width));
    Ok(wrap_select_action(border, column.select_action.as_deref(), context, args))
}

/// Grid length notation: `auto`, `*`, `<n>*` or `<n>px`.
fn column_width(width: ColumnWidth) -> String {
    match width {
        ColumnWidth::Auto => "auto".to_string(),
        ColumnWidth::Stretch => "*".to_string(),
        ColumnWidth::Weight(weight) => format!("{weight}*"),
        ColumnWidth::Pixels(pixels) => format!("{pixels}px"),
    }
}

pub fn build_fact_set(
    _element: &CardElement,
    set: &FactSet,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let config = context.host_config();
    let foreground = context.foreground_color(Default::default(), false, args.container_style);
    let cell = |text: &str, weight: TextWeight, row: usize, column: usize| {
        UiNode::new(UiKind::TextBlock)
            .with("text", text)
            .with("fontFamily", config.font_family.as_str())
            .with("fontSize", config.font_sizes.default)
            .with("fontWeight", config.font_weight(weight))
            .with("foreground", foreground)
            .with("wrap", true)
            .with("gridRow", row)
            .with("gridColumn", column)
    };
    let mut grid = UiNode::new(UiKind::Grid).with("columnWidths", json!(["auto", "*"]));
    for (row, fact) in set.facts.iter().enumerate() {
        grid.push(cell(&fact.title, TextWeight::Bolder, row, 0));
        grid.push(cell(&fact.value, TextWeight::Default, row, 1));
    }
    Ok(grid)
}

pub fn build_action_set(
    _element: &CardElement,
    set: &ActionSet,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    build_action_bar(&set.actions, "ActionSet", context, args)
}

/// Renders up to `maxActions` buttons in a row. Inline show cards are moved
/// out of their buttons into collapsed panels below the row.
pub fn build_action_bar(
    actions: &[CardAction],
    owner: &str,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let config = context.host_config();
    if !config.supports_interactivity {
        return Err(RenderError::InteractivityNotSupported {
            type_name: owner.to_string(),
        });
    }
    let max_actions = config.actions.max_actions as usize;
    if actions.len() > max_actions {
        context.add_warning(
            WarningStatusCode::MaxActionsExceeded,
            format!(
                "{owner} has {} actions, only the first {max_actions} are shown",
                actions.len()
            ),
        );
    }

    let button_args = args.child(UiKind::StackPanel);
    let mut bar = UiNode::new(UiKind::StackPanel)
        .with("orientation", "horizontal")
        .with("buttonSpacing", config.actions.button_spacing);
    let mut show_cards = Vec::new();
    for action in actions.iter().take(max_actions) {
        let Some(mut button) = context.render_action(action, &button_args) else {
            continue;
        };
        let inline = button
            .children
            .iter()
            .position(|child| child.property(INLINE_SHOW_CARD).is_some());
        if let Some(position) = inline {
            let mut panel = button.children.remove(position);
            panel.properties.remove(INLINE_SHOW_CARD);
            button.set("showCardIndex", show_cards.len());
            show_cards.push(panel);
        }
        bar.push(button);
    }

    if show_cards.is_empty() {
        return Ok(bar);
    }
    let mut wrapper = UiNode::new(UiKind::StackPanel).with_child(bar);
    wrapper.children.extend(show_cards);
    Ok(wrapper)
}

/// Wraps `node` in the button of its select action, when it has one.
fn wrap_select_action(
    node: UiNode,
    action: Option<&CardAction>,
    context: &mut RenderContext<'_>,
    args: &RenderArgs,
) -> UiNode {
    let Some(action) = action else {
        return node;
    };
    if action.action_type() == ActionType::ShowCard {
        context.add_warning(
            WarningStatusCode::InvalidValue,
            "Action.ShowCard is not supported as a select action",
        );
        return node;
    }
    match context.render_action(action, &args.child(UiKind::Button)) {
        Some(mut button) => {
            button.set("isSelectAction", true);
            button.children.insert(0, node);
            button
        }
        None => node,
    }
}

/// Common part of every input control; registers the input id.
fn input_node(
    element: &CardElement,
    kind: UiKind,
    is_required: bool,
    context: &mut RenderContext<'_>,
) -> Result<UiNode, RenderError> {
    let type_name = element.element_type_string();
    if !context.host_config().supports_interactivity {
        return Err(RenderError::InteractivityNotSupported {
            type_name: type_name.to_string(),
        });
    }
    let id = element
        .id
        .as_deref()
        .ok_or_else(|| ParseError::missing(type_name, "id"))?;
    context.register_input(id);
    Ok(UiNode::new(kind)
        .with("id", id)
        .with("isRequired", is_required))
}

pub fn build_text_input(
    element: &CardElement,
    input: &TextInput,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let mut node = input_node(element, UiKind::TextBox, input.is_required, context)?
        .with_opt("placeholder", input.placeholder.as_deref())
        .with_opt("text", input.value.as_deref())
        .with("acceptsReturn", input.is_multiline)
        .with("inputScope", input.style.as_str());
    if input.max_length > 0 {
        node.set("maxLength", input.max_length);
    }
    Ok(node)
}

pub fn build_number_input(
    element: &CardElement,
    input: &NumberInput,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    Ok(input_node(element, UiKind::NumberBox, input.is_required, context)?
        .with_opt("placeholder", input.placeholder.as_deref())
        .with_opt("value", input.value)
        .with_opt("minimum", input.min)
        .with_opt("maximum", input.max))
}

pub fn build_date_input(
    element: &CardElement,
    input: &DateInput,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    Ok(input_node(element, UiKind::DatePicker, input.is_required, context)?
        .with_opt("placeholder", input.placeholder.as_deref())
        .with_opt("date", input.value.as_deref())
        .with_opt("minDate", input.min.as_deref())
        .with_opt("maxDate", input.max.as_deref())
        .with_opt("language", input.language.as_deref()))
}

pub fn build_time_input(
    element: &CardElement,
    input: &TimeInput,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    Ok(input_node(element, UiKind::TimePicker, input.is_required, context)?
        .with_opt("placeholder", input.placeholder.as_deref())
        .with_opt("time", input.value.as_deref())
        .with_opt("minTime", input.min.as_deref())
        .with_opt("maxTime", input.max.as_deref())
        .with_opt("language", input.language.as_deref()))
}

pub fn build_toggle_input(
    element: &CardElement,
    input: &ToggleInput,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    Ok(input_node(element, UiKind::CheckBox, input.is_required, context)?
        .with("content", input.title.as_str())
        .with("isChecked", input.is_on())
        .with("valueOn", input.value_on.as_str())
        .with("valueOff", input.value_off.as_str()))
}

/// Compact single-select sets become a combo box; expanded or multi-select
/// sets become a panel of radio buttons or check boxes.
pub fn build_choice_set_input(
    element: &CardElement,
    input: &ChoiceSetInput,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let selected = input.selected_values();
    let compact = input.style == ChoiceSetStyle::Compact && !input.is_multi_select;
    let kind = if compact {
        UiKind::ComboBox
    } else {
        UiKind::StackPanel
    };
    let mut node = input_node(element, kind, input.is_required, context)?
        .with("isMultiSelect", input.is_multi_select);

    if compact {
        let index = input
            .choices
            .iter()
            .position(|choice| selected.contains(&choice.value.as_str()));
        node.set("selectedIndex", index.map_or(-1, |index| index as i64));
        for choice in &input.choices {
            node.push(
                UiNode::new(UiKind::TextBlock)
                    .with("text", choice.title.as_str())
                    .with("value", choice.value.as_str()),
            );
        }
        return Ok(node);
    }

    let choice_kind = if input.is_multi_select {
        UiKind::CheckBox
    } else {
        UiKind::RadioButton
    };
    let group = element.id.clone().unwrap_or_default();
    for choice in &input.choices {
        let mut option = UiNode::new(choice_kind)
            .with("content", choice.title.as_str())
            .with("value", choice.value.as_str())
            .with("isChecked", selected.contains(&choice.value.as_str()));
        if choice_kind == UiKind::RadioButton {
            option.set("groupName", group.as_str());
        }
        node.push(option);
    }
    Ok(node)
}

/// Button shared by every action type.
fn action_button(action: &CardAction, context: &RenderContext<'_>) -> Result<UiNode, RenderError> {
    let type_name = action.action_type_string();
    if !context.host_config().supports_interactivity {
        return Err(RenderError::InteractivityNotSupported {
            type_name: type_name.to_string(),
        });
    }
    Ok(UiNode::new(UiKind::Button)
        .with("actionType", type_name)
        .with("title", action.title.as_deref().unwrap_or_default())
        .with_opt("id", action.id.as_deref())
        .with_opt("iconUrl", action.icon_url.as_deref()))
}

pub fn build_submit_action(
    action: &CardAction,
    submit: &SubmitAction,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    Ok(action_button(action, context)?.with_opt("data", submit.data.clone()))
}

pub fn build_open_url_action(
    action: &CardAction,
    open: &OpenUrlAction,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    Ok(action_button(action, context)?.with("navigateUri", open.url.as_str()))
}

/// Renders the nested card with the host's show-card style, either as a
/// flyout attached to the button or as a collapsed inline panel.
pub fn build_show_card_action(
    action: &CardAction,
    show: &ShowCardAction,
    context: &mut RenderContext<'_>,
    _args: &RenderArgs,
) -> Result<UiNode, RenderError> {
    let button = action_button(action, context)?;
    let show_card = &context.host_config().actions.show_card;
    let card = match show_card.action_mode {
        ShowCardActionMode::Popup => {
            let card_args = RenderArgs::new(show_card.style, Some(UiKind::Flyout));
            UiNode::new(UiKind::Flyout).with_child(build_card(&show.card, context, &card_args))
        }
        ShowCardActionMode::Inline => {
            let card_args = RenderArgs::new(show_card.style, Some(UiKind::StackPanel));
            UiNode::new(UiKind::StackPanel)
                .with(INLINE_SHOW_CARD, true)
                .with("visibility", "collapsed")
                .with("spacing", show_card.inline_top_margin)
                .with_child(build_card(&show.card, context, &card_args))
        }
    };
    Ok(button
        .with("actionMode", match show_card.action_mode {
            ShowCardActionMode::Popup => "popup",
            ShowCardActionMode::Inline => "inline",
        })
        .with_child(card))
}
