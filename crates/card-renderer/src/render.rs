use std::sync::Arc;

use card_object_model::{ActionType, CardAction, CardElement, ElementType};
use card_type_registry::TypeRegistry;

use crate::{args::RenderArgs, context::RenderContext, errors::RenderError, renderers, ui::UiNode};

/// Builds the UI node of one element type.
pub trait ElementRenderer: Send + Sync {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<UiNode, RenderError>;
}

/// Builds the UI node of one action type.
pub trait ActionRenderer: Send + Sync {
    fn render(
        &self,
        action: &CardAction,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<UiNode, RenderError>;
}

pub type ElementRendererRegistration = TypeRegistry<dyn ElementRenderer>;
pub type ActionRendererRegistration = TypeRegistry<dyn ActionRenderer>;

/// Registration holding a renderer for every built-in element type.
pub fn default_element_renderers() -> ElementRendererRegistration {
    let builtins: [(ElementType, Arc<dyn ElementRenderer>); 14] = [
        (ElementType::TextBlock, Arc::new(renderers::TextBlockRenderer)),
        (ElementType::Image, Arc::new(renderers::ImageRenderer)),
        (ElementType::ImageSet, Arc::new(renderers::ImageSetRenderer)),
        (ElementType::Container, Arc::new(renderers::ContainerRenderer)),
        (ElementType::ColumnSet, Arc::new(renderers::ColumnSetRenderer)),
        (ElementType::Column, Arc::new(renderers::ColumnRenderer)),
        (ElementType::FactSet, Arc::new(renderers::FactSetRenderer)),
        (ElementType::ActionSet, Arc::new(renderers::ActionSetRenderer)),
        (ElementType::TextInput, Arc::new(renderers::TextInputRenderer)),
        (ElementType::NumberInput, Arc::new(renderers::NumberInputRenderer)),
        (ElementType::DateInput, Arc::new(renderers::DateInputRenderer)),
        (ElementType::TimeInput, Arc::new(renderers::TimeInputRenderer)),
        (ElementType::ToggleInput, Arc::new(renderers::ToggleInputRenderer)),
        (ElementType::ChoiceSetInput, Arc::new(renderers::ChoiceSetInputRenderer)),
    ];
    let mut registration = ElementRendererRegistration::new();
    for (element_type, renderer) in builtins {
        registration.register_builtin(element_type.type_name(), renderer);
    }
    registration
}

/// Registration holding a renderer for every built-in action type.
pub fn default_action_renderers() -> ActionRendererRegistration {
    let builtins: [(ActionType, Arc<dyn ActionRenderer>); 3] = [
        (ActionType::Submit, Arc::new(renderers::SubmitActionRenderer)),
        (ActionType::OpenUrl, Arc::new(renderers::OpenUrlActionRenderer)),
        (ActionType::ShowCard, Arc::new(renderers::ShowCardActionRenderer)),
    ];
    let mut registration = ActionRendererRegistration::new();
    for (action_type, renderer) in builtins {
        registration.register_builtin(action_type.type_name(), renderer);
    }
    registration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_types() {
        let elements = default_element_renderers();
        for element_type in ElementType::BUILT_IN {
            assert!(elements.contains(element_type.type_name()), "{element_type}");
        }
        let actions = default_action_renderers();
        assert!(actions.contains("action.showcard"));
        assert_eq!(actions.len(), ActionType::BUILT_IN.len());
    }
}
