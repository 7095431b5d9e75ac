use card_object_model::{
    ActionParserRegistration, AdaptiveCard, CardWarning, ElementParserRegistration, ParseResult,
    UnknownTypePolicy, default_action_parsers, default_element_parsers, parse_card,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    args::RenderArgs,
    builder::build_card,
    config::HostConfig,
    context::RenderContext,
    errors::RenderError,
    render::{
        ActionRendererRegistration, ElementRendererRegistration, default_action_renderers,
        default_element_renderers,
    },
    ui::UiNode,
};

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub root: UiNode,
    /// Parse warnings, when rendered from JSON, followed by render warnings.
    pub warnings: Vec<CardWarning>,
    /// Ids of the inputs that made it into the UI tree.
    pub input_ids: Vec<String>,
}

/// Entry point for hosts: parses card JSON and renders cards with the
/// configured host config.
///
/// All four registrations start out holding the built-in types. Hosts add,
/// replace or remove parsers and renderers through the `*_mut` accessors.
#[derive(Clone)]
pub struct CardRenderer {
    host_config: HostConfig,
    policy: UnknownTypePolicy,
    element_parsers: ElementParserRegistration,
    action_parsers: ActionParserRegistration,
    element_renderers: ElementRendererRegistration,
    action_renderers: ActionRendererRegistration,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

impl CardRenderer {
    pub fn new(host_config: HostConfig) -> Self {
        Self {
            host_config,
            policy: UnknownTypePolicy::default(),
            element_parsers: default_element_parsers(),
            action_parsers: default_action_parsers(),
            element_renderers: default_element_renderers(),
            action_renderers: default_action_renderers(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownTypePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn host_config(&self) -> &HostConfig {
        &self.host_config
    }

    pub fn set_host_config(&mut self, host_config: HostConfig) {
        self.host_config = host_config;
    }

    pub fn policy(&self) -> UnknownTypePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: UnknownTypePolicy) {
        self.policy = policy;
    }

    pub fn element_parsers(&self) -> &ElementParserRegistration {
        &self.element_parsers
    }

    pub fn element_parsers_mut(&mut self) -> &mut ElementParserRegistration {
        &mut self.element_parsers
    }

    pub fn action_parsers(&self) -> &ActionParserRegistration {
        &self.action_parsers
    }

    pub fn action_parsers_mut(&mut self) -> &mut ActionParserRegistration {
        &mut self.action_parsers
    }

    pub fn element_renderers(&self) -> &ElementRendererRegistration {
        &self.element_renderers
    }

    pub fn element_renderers_mut(&mut self) -> &mut ElementRendererRegistration {
        &mut self.element_renderers
    }

    pub fn action_renderers(&self) -> &ActionRendererRegistration {
        &self.action_renderers
    }

    pub fn action_renderers_mut(&mut self) -> &mut ActionRendererRegistration {
        &mut self.action_renderers
    }

    pub fn parse_card(&self, json: &str) -> Result<ParseResult, RenderError> {
        let value: Value = serde_json::from_str(json).map_err(card_object_model::ParseError::from)?;
        self.parse_card_value(&value)
    }

    pub fn parse_card_value(&self, value: &Value) -> Result<ParseResult, RenderError> {
        Ok(parse_card(
            value,
            &self.element_parsers,
            &self.action_parsers,
            self.policy,
        )?)
    }

    /// Renders an already parsed card. Never fails; elements that cannot be
    /// rendered are skipped and reported in the warnings.
    pub fn render(&self, card: &AdaptiveCard) -> RenderedCard {
        let mut context =
            RenderContext::new(&self.host_config, &self.element_renderers, &self.action_renderers);
        let root = build_card(card, &mut context, &RenderArgs::default());
        let (warnings, input_ids) = context.into_parts();
        debug!(
            warnings = warnings.len(),
            inputs = input_ids.len(),
            "card rendered"
        );
        RenderedCard {
            root,
            warnings,
            input_ids,
        }
    }

    /// Parses and renders card JSON in one step.
    pub fn render_json(&self, json: &str) -> Result<RenderedCard, RenderError> {
        let ParseResult {
            card,
            warnings: parse_warnings,
        } = self.parse_card(json)?;
        let mut rendered = self.render(&card);
        let mut warnings = parse_warnings;
        warnings.append(&mut rendered.warnings);
        rendered.warnings = warnings;
        Ok(rendered)
    }
}

impl std::fmt::Debug for CardRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRenderer")
            .field("host_config", &self.host_config)
            .field("policy", &self.policy)
            .field("element_parsers", &self.element_parsers.type_names())
            .field("action_parsers", &self.action_parsers.type_names())
            .field("element_renderers", &self.element_renderers.type_names())
            .field("action_renderers", &self.action_renderers.type_names())
            .finish()
    }
}
