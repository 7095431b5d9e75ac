//! Renders parsed Adaptive Cards into an inspectable UI node tree.
//!
//! Rendering dispatches every element and action by its type string through
//! case-insensitive renderer registrations, mirroring the parse side.
//! Hosts extend both sides through [`CardRenderer`].

pub mod args;
pub mod builder;
pub mod config;
pub mod context;
pub mod errors;
pub mod render;
pub mod renderer;
pub mod renderers;
pub mod ui;

pub use args::RenderArgs;
pub use config::{
    ActionsConfig, ColorConfig, ContainerStyleConfig, ContainerStylesConfig, FontSizesConfig,
    FontWeightsConfig, ForegroundColorsConfig, HostConfig, HostConfigError, ImageSetConfig,
    ImageSizesConfig, SeparatorConfig, ShowCardActionMode, ShowCardConfig, SpacingConfig,
};
pub use context::RenderContext;
pub use errors::RenderError;
pub use render::{
    ActionRenderer, ActionRendererRegistration, ElementRenderer, ElementRendererRegistration,
    default_action_renderers, default_element_renderers,
};
pub use renderer::{CardRenderer, RenderedCard};
pub use ui::{UiKind, UiNode};
