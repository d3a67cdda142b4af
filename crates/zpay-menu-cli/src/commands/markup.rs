//! `check-markup`: validate conventions and build controllers from them.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::info;
use zpay_menu::{MenuController, MenuMarkup};

use crate::cli::MarkupArgs;
use crate::error::{CliError, CliResult};

pub(crate) fn handle(args: &MarkupArgs, out: &mut dyn Write) -> CliResult<()> {
    let controller = load_controller(args.markup.as_deref())?;
    let rendered = serde_json::to_string_pretty(controller.markup())
        .context("failed to render markup")
        .map_err(CliError::failure)?;
    writeln!(out, "{rendered}")
        .context("failed to write markup")
        .map_err(CliError::failure)?;
    let source = args
        .markup
        .as_deref()
        .map_or_else(|| "defaults".to_string(), |path| path.display().to_string());
    info!(source = %source, "markup is valid");
    Ok(())
}

/// Build a controller from a markup file, or from the template defaults.
pub(crate) fn load_controller(path: Option<&Path>) -> CliResult<MenuController> {
    let markup = load_markup(path)?;
    MenuController::new(markup).map_err(|err| CliError::validation(err.to_string()))
}

fn load_markup(path: Option<&Path>) -> CliResult<MenuMarkup> {
    let Some(path) = path else {
        return Ok(MenuMarkup::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read markup {}", path.display()))
        .map_err(CliError::failure)?;
    MenuMarkup::from_json(&raw).map_err(|err| {
        CliError::validation(format!(
            "invalid markup {}: {:#}",
            path.display(),
            anyhow::Error::from(err)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_a_file() {
        let controller = load_controller(None).expect("defaults are valid");
        assert_eq!(controller.markup(), &MenuMarkup::default());
    }

    #[test]
    fn missing_file_is_an_operational_failure() {
        let err = load_controller(Some(Path::new("/definitely/missing/markup.json")))
            .expect_err("missing file");
        assert_eq!(err.exit_code(), 3);
    }
}
