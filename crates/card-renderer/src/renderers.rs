//! Built-in renderers, one per element and action type.

use card_object_model::{ActionBody, ActionType, CardAction, CardElement, ElementBody, ElementType};

use crate::{
    args::RenderArgs,
    builder,
    context::RenderContext,
    errors::RenderError,
    render::{ActionRenderer, ElementRenderer},
    ui::UiNode,
};

macro_rules! element_renderer {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $build:path) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl ElementRenderer for $name {
            fn render(
                &self,
                element: &CardElement,
                context: &mut RenderContext<'_>,
                args: &RenderArgs,
            ) -> Result<UiNode, RenderError> {
                match &element.body {
                    ElementBody::$variant(body) => $build(element, body, context, args),
                    _ => Err(RenderError::unexpected(
                        ElementType::$variant.type_name(),
                        element.element_type_string(),
                    )),
                }
            }
        }
    };
}

macro_rules! action_renderer {
    ($name:ident, $variant:ident, $action_type:ident, $build:path) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl ActionRenderer for $name {
            fn render(
                &self,
                action: &CardAction,
                context: &mut RenderContext<'_>,
                args: &RenderArgs,
            ) -> Result<UiNode, RenderError> {
                match &action.body {
                    ActionBody::$variant(body) => $build(action, body, context, args),
                    _ => Err(RenderError::unexpected(
                        ActionType::$action_type.type_name(),
                        action.action_type_string(),
                    )),
                }
            }
        }
    };
}

element_renderer!(TextBlockRenderer, TextBlock, builder::build_text_block);
element_renderer!(
    /// Fails with `AssetLoadFailed` when the image URL has no usable scheme.
    ImageRenderer,
    Image,
    builder::build_image
);
element_renderer!(ImageSetRenderer, ImageSet, builder::build_image_set);
element_renderer!(ContainerRenderer, Container, builder::build_container);
element_renderer!(ColumnSetRenderer, ColumnSet, builder::build_column_set);
element_renderer!(ColumnRenderer, Column, builder::build_column);
element_renderer!(FactSetRenderer, FactSet, builder::build_fact_set);
element_renderer!(ActionSetRenderer, ActionSet, builder::build_action_set);
element_renderer!(TextInputRenderer, TextInput, builder::build_text_input);
element_renderer!(NumberInputRenderer, NumberInput, builder::build_number_input);
element_renderer!(DateInputRenderer, DateInput, builder::build_date_input);
element_renderer!(TimeInputRenderer, TimeInput, builder::build_time_input);
element_renderer!(ToggleInputRenderer, ToggleInput, builder::build_toggle_input);
element_renderer!(ChoiceSetInputRenderer, ChoiceSetInput, builder::build_choice_set_input);

action_renderer!(SubmitActionRenderer, Submit, Submit, builder::build_submit_action);
action_renderer!(OpenUrlActionRenderer, OpenUrl, OpenUrl, builder::build_open_url_action);
action_renderer!(ShowCardActionRenderer, ShowCard, ShowCard, builder::build_show_card_action);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::HostConfig,
        render::{default_action_renderers, default_element_renderers},
    };
    use card_object_model::{TextBlock, WarningStatusCode};

    #[test]
    fn renderer_rejects_mismatched_element() {
        let config = HostConfig::default();
        let elements = default_element_renderers();
        let actions = default_action_renderers();
        let mut context = RenderContext::new(&config, &elements, &actions);
        let text = CardElement::new(ElementBody::TextBlock(TextBlock::default()));

        let err = ImageRenderer
            .render(&text, &mut context, &RenderArgs::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnexpectedElement { .. }));
        assert_eq!(err.warning_code(), WarningStatusCode::RenderFailed);
    }
}
