//! `replay`: apply clicks to a document snapshot.

use std::fs;
use std::io::Write;

use anyhow::Context;
use tracing::{info, warn};
use zpay_menu::{MemoryDocument, MenuController, NodeId};

use crate::cli::ReplayArgs;
use crate::commands::markup::load_controller;
use crate::error::{CliError, CliResult};

/// One replay step, parsed from a positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// Delegated click on the first element matching `selector`.
    Click { selector: String },
    /// Inline simple toggle of `panel_id` from the button matching `button_selector`.
    ToggleMenu {
        panel_id: String,
        button_selector: String,
    },
}

pub(crate) fn parse_step(input: &str) -> Result<Step, String> {
    let trimmed = input.trim();
    let (verb, rest) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("step '{trimmed}' is missing its arguments"))?;
    let rest = rest.trim();
    match verb {
        "click" => Ok(Step::Click {
            selector: rest.to_string(),
        }),
        "toggle-menu" => {
            let (panel_id, button_selector) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("step '{trimmed}' needs a panel id and a button selector"))?;
            Ok(Step::ToggleMenu {
                panel_id: panel_id.to_string(),
                button_selector: button_selector.trim().to_string(),
            })
        }
        other => Err(format!(
            "unknown step '{other}' (expected 'click' or 'toggle-menu')"
        )),
    }
}

pub(crate) fn handle(args: &ReplayArgs, out: &mut dyn Write) -> CliResult<()> {
    let controller = load_controller(args.markup.as_deref())?;
    let raw = fs::read_to_string(&args.document)
        .with_context(|| format!("failed to read document {}", args.document.display()))
        .map_err(CliError::failure)?;
    let mut document = MemoryDocument::from_json(&raw)
        .with_context(|| format!("failed to load document {}", args.document.display()))
        .map_err(CliError::failure)?;

    for (index, step) in args.steps.iter().enumerate() {
        apply_step(&controller, &mut document, step, index + 1)?;
    }

    let rendered = document.to_json_pretty().map_err(CliError::failure)?;
    match &args.output {
        Some(path) => fs::write(path, format!("{rendered}\n"))
            .with_context(|| format!("failed to write snapshot {}", path.display()))
            .map_err(CliError::failure)?,
        None => writeln!(out, "{rendered}")
            .context("failed to write snapshot")
            .map_err(CliError::failure)?,
    }
    Ok(())
}

fn apply_step(
    controller: &MenuController,
    document: &mut MemoryDocument,
    step: &Step,
    number: usize,
) -> CliResult<()> {
    match step {
        Step::Click { selector } => {
            let target = resolve(document, selector)?;
            let report = controller.handle_click(document, &target);
            info!(
                step = number,
                selector = %selector,
                nested = ?report.nested,
                grouped = ?report.grouped,
                sidebar = ?report.sidebar,
                prevent_default = report.prevent_default(),
                "click replayed"
            );
        }
        Step::ToggleMenu {
            panel_id,
            button_selector,
        } => {
            let button = resolve(document, button_selector)?;
            match controller.toggle_menu(document, panel_id, &button) {
                Some(expanded) => info!(step = number, panel_id = %panel_id, expanded, "menu toggled"),
                None => warn!(step = number, panel_id = %panel_id, "menu panel not found; step had no effect"),
            }
        }
    }
    Ok(())
}

fn resolve(document: &MemoryDocument, selector: &str) -> CliResult<NodeId> {
    document
        .try_query_selector(selector)
        .map_err(|err| CliError::validation(format!("invalid selector '{selector}': {err}")))?
        .ok_or_else(|| CliError::validation(format!("no element matches '{selector}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_step_accepts_both_verbs() {
        assert_eq!(
            parse_step("  click  [data-sb-toggle='#help-menu'] "),
            Ok(Step::Click {
                selector: "[data-sb-toggle='#help-menu']".to_string()
            })
        );
        assert_eq!(
            parse_step("toggle-menu merchant-menu aside > .menu-toggle"),
            Ok(Step::ToggleMenu {
                panel_id: "merchant-menu".to_string(),
                button_selector: "aside > .menu-toggle".to_string(),
            })
        );
    }

    #[test]
    fn parse_step_rejects_malformed_input() {
        assert!(parse_step("click").is_err());
        assert!(parse_step("toggle-menu merchant-menu").is_err());
        let err = parse_step("hover .sb__btn").expect_err("unknown verb");
        assert!(err.contains("unknown step 'hover'"));
    }

    #[test]
    fn resolve_distinguishes_bad_and_missing_selectors() {
        let document = MemoryDocument::new();
        let err = resolve(&document, "a + b").expect_err("unsupported selector");
        assert!(err.display_message().starts_with("invalid selector"));
        let err = resolve(&document, "#nothing").expect_err("no match");
        assert_eq!(err.display_message(), "no element matches '#nothing'");
    }
}
