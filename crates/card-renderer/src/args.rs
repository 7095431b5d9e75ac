use card_object_model::ContainerStyle;

use crate::ui::UiKind;

/// Arguments that flow from a parent renderer to its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderArgs {
    /// Effective container style the element is rendered inside.
    pub container_style: ContainerStyle,
    /// Kind of the UI node the rendered element is placed into.
    pub parent_element: Option<UiKind>,
}

impl RenderArgs {
    pub fn new(container_style: ContainerStyle, parent_element: Option<UiKind>) -> Self {
        Self {
            container_style,
            parent_element,
        }
    }

    /// Args for children placed into a node of `parent` kind.
    pub fn child(self, parent: UiKind) -> Self {
        Self {
            parent_element: Some(parent),
            ..self
        }
    }

    /// Args for children of a styled container. `ContainerStyle::Default`
    /// on a container means "not set" and keeps the inherited style.
    pub fn styled(self, style: ContainerStyle, parent: UiKind) -> Self {
        let container_style = match style {
            ContainerStyle::Default => self.container_style,
            other => other,
        };
        Self {
            container_style,
            parent_element: Some(parent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_cascades_unless_overridden() {
        let root = RenderArgs::default();
        let emphasis = root.styled(ContainerStyle::Emphasis, UiKind::StackPanel);
        assert_eq!(emphasis.container_style, ContainerStyle::Emphasis);

        let inherited = emphasis.styled(ContainerStyle::Default, UiKind::Grid);
        assert_eq!(inherited.container_style, ContainerStyle::Emphasis);
        assert_eq!(inherited.parent_element, Some(UiKind::Grid));

        assert_eq!(inherited.child(UiKind::Border).container_style, ContainerStyle::Emphasis);
    }
}
