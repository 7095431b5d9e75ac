use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::Context;
use card_object_model::{CardWarning, UnknownTypePolicy};
use card_renderer::{CardRenderer, HostConfig};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::CliError;

#[derive(Serialize)]
struct ParseOutput {
    card: Value,
    warnings: Vec<CardWarning>,
}

#[derive(Serialize)]
struct TypesOutput {
    element_parsers: Vec<String>,
    element_renderers: Vec<String>,
    action_parsers: Vec<String>,
    action_renderers: Vec<String>,
}

pub fn handle_parse(
    card: &Path,
    policy: UnknownTypePolicy,
    deny_warnings: bool,
) -> Result<(), CliError> {
    let json = read_card(card)?;
    let renderer = CardRenderer::default().with_policy(policy);
    let result = renderer.parse_card(&json).map_err(CliError::Card)?;
    info!(warnings = result.warnings.len(), "card parsed");
    let warning_count = result.warnings.len();
    print_json(&ParseOutput {
        card: result.card.to_json(),
        warnings: result.warnings,
    })?;
    check_warnings(warning_count, deny_warnings)
}

pub fn handle_render(
    card: &Path,
    host_config: Option<&Path>,
    policy: UnknownTypePolicy,
    deny_warnings: bool,
) -> Result<(), CliError> {
    let host_config = load_host_config(host_config)?;
    let json = read_card(card)?;
    let renderer = CardRenderer::new(host_config).with_policy(policy);
    let rendered = renderer.render_json(&json).map_err(CliError::Card)?;
    info!(
        warnings = rendered.warnings.len(),
        inputs = rendered.input_ids.len(),
        "card rendered"
    );
    print_json(&rendered)?;
    check_warnings(rendered.warnings.len(), deny_warnings)
}

pub fn handle_types() -> Result<(), CliError> {
    let renderer = CardRenderer::default();
    print_json(&TypesOutput {
        element_parsers: renderer.element_parsers().type_names(),
        element_renderers: renderer.element_renderers().type_names(),
        action_parsers: renderer.action_parsers().type_names(),
        action_renderers: renderer.action_renderers().type_names(),
    })
}

/// Reads card JSON from a file, or from stdin when the path is `-`.
fn read_card(path: &Path) -> Result<String, CliError> {
    let result = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("read card from stdin")
            .map(|_| buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    };
    result.map_err(|err| CliError::CardFile(path.to_path_buf(), err))
}

fn load_host_config(path: Option<&Path>) -> Result<HostConfig, CliError> {
    let Some(path) = path else {
        return Ok(HostConfig::default());
    };
    debug!(path = %path.display(), "loading host config");
    let contents = fs::read_to_string(path)
        .map_err(|err| CliError::HostConfig(path.to_path_buf(), err.into()))?;
    HostConfig::from_json_str(&contents)
        .map_err(|err| CliError::HostConfig(path.to_path_buf(), err.into()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .context("serialize output")
        .map_err(CliError::Output)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
        .context("write stdout")
        .map_err(CliError::Output)
}

fn check_warnings(count: usize, deny_warnings: bool) -> Result<(), CliError> {
    if deny_warnings && count > 0 {
        Err(CliError::Warnings { count })
    } else {
        Ok(())
    }
}
