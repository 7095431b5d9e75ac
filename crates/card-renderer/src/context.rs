use card_object_model::{
    CardAction, CardElement, CardWarning, ContainerStyle, TextColor, WarningStatusCode,
};
use tracing::{debug, warn};

use crate::{
    args::RenderArgs,
    config::HostConfig,
    render::{ActionRendererRegistration, ElementRendererRegistration},
    ui::UiNode,
};

/// State shared by every renderer while one card is rendered.
///
/// Borrows the host config and renderer registrations, so renderers can
/// dispatch nested elements and actions through the same tables, and
/// collects the warnings of the render pass.
pub struct RenderContext<'a> {
    host_config: &'a HostConfig,
    element_renderers: &'a ElementRendererRegistration,
    action_renderers: &'a ActionRendererRegistration,
    warnings: Vec<CardWarning>,
    input_ids: Vec<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        host_config: &'a HostConfig,
        element_renderers: &'a ElementRendererRegistration,
        action_renderers: &'a ActionRendererRegistration,
    ) -> Self {
        Self {
            host_config,
            element_renderers,
            action_renderers,
            warnings: Vec::new(),
            input_ids: Vec::new(),
        }
    }

    pub fn host_config(&self) -> &'a HostConfig {
        self.host_config
    }

    pub fn element_renderers(&self) -> &'a ElementRendererRegistration {
        self.element_renderers
    }

    pub fn action_renderers(&self) -> &'a ActionRendererRegistration {
        self.action_renderers
    }

    pub fn warnings(&self) -> &[CardWarning] {
        &self.warnings
    }

    pub fn add_warning(&mut self, status_code: WarningStatusCode, message: impl Into<String>) {
        let warning = CardWarning::new(status_code, message);
        debug!(code = ?warning.status_code, message = %warning.message, "render warning");
        self.warnings.push(warning);
    }

    /// Records an input id so the host can gather values on submit.
    pub fn register_input(&mut self, id: &str) {
        self.input_ids.push(id.to_string());
    }

    pub fn input_ids(&self) -> &[String] {
        &self.input_ids
    }

    pub fn into_parts(self) -> (Vec<CardWarning>, Vec<String>) {
        (self.warnings, self.input_ids)
    }

    /// Renders `element` with the renderer registered for its type string.
    ///
    /// A missing renderer or a renderer failure is recorded as a warning and
    /// yields `None`; the caller continues with the next sibling.
    pub fn render_element(&mut self, element: &CardElement, args: &RenderArgs) -> Option<UiNode> {
        let type_name = element.element_type_string();
        let Some(renderer) = self.element_renderers.get(type_name) else {
            debug!(type_name, "no element renderer registered");
            self.add_warning(
                WarningStatusCode::NoRendererForType,
                format!("no renderer registered for element type `{type_name}`"),
            );
            return None;
        };
        match renderer.render(element, self, args) {
            Ok(node) => Some(node),
            Err(err) => {
                warn!(type_name, error = %err, "element renderer failed");
                self.add_warning(err.warning_code(), format!("`{type_name}` skipped: {err}"));
                None
            }
        }
    }

    pub fn render_action(&mut self, action: &CardAction, args: &RenderArgs) -> Option<UiNode> {
        let type_name = action.action_type_string();
        let Some(renderer) = self.action_renderers.get(type_name) else {
            debug!(type_name, "no action renderer registered");
            self.add_warning(
                WarningStatusCode::NoRendererForType,
                format!("no renderer registered for action type `{type_name}`"),
            );
            return None;
        };
        match renderer.render(action, self, args) {
            Ok(node) => Some(node),
            Err(err) => {
                warn!(type_name, error = %err, "action renderer failed");
                self.add_warning(err.warning_code(), format!("`{type_name}` skipped: {err}"));
                None
            }
        }
    }

    /// Foreground color for text of `color` inside a container of `style`.
    pub fn foreground_color(
        &self,
        color: TextColor,
        is_subtle: bool,
        style: ContainerStyle,
    ) -> &'a str {
        let pair = self
            .host_config
            .container_style(style)
            .foreground_colors
            .get(color);
        if is_subtle {
            pair.subtle.as_str()
        } else {
            pair.default.as_str()
        }
    }

    pub fn background_color(&self, style: ContainerStyle) -> &'a str {
        self.host_config.container_style(style).background_color.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{default_action_renderers, default_element_renderers};
    use card_object_model::{ElementBody, TextBlock};
    use serde_json::json;

    #[test]
    fn missing_renderer_records_warning() {
        let config = HostConfig::default();
        let elements = default_element_renderers();
        let actions = default_action_renderers();
        let mut context = RenderContext::new(&config, &elements, &actions);

        let custom = CardElement::custom("Rating", json!({"stars": 3}));
        assert!(context.render_element(&custom, &RenderArgs::default()).is_none());
        assert_eq!(
            context.warnings()[0].status_code,
            WarningStatusCode::NoRendererForType
        );

        let text = CardElement::new(ElementBody::TextBlock(TextBlock {
            text: "ok".into(),
            ..TextBlock::default()
        }));
        assert!(context.render_element(&text, &RenderArgs::default()).is_some());
        assert_eq!(context.warnings().len(), 1);
    }

    #[test]
    fn resolves_colors_per_container_style() {
        let mut config = HostConfig::default();
        config.container_styles.emphasis.foreground_colors.good.subtle = "#10203040".into();
        let elements = default_element_renderers();
        let actions = default_action_renderers();
        let context = RenderContext::new(&config, &elements, &actions);
        assert_eq!(
            context.foreground_color(TextColor::Good, true, ContainerStyle::Emphasis),
            "#10203040"
        );
        assert_eq!(
            context.foreground_color(TextColor::Default, false, ContainerStyle::Default),
            "#FF000000"
        );
        assert_eq!(context.background_color(ContainerStyle::Emphasis), "#08000000");
    }
}
