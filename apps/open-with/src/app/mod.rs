//! Command-line front end
//!
//! Every invocation loads the settings, activates the plugin against a
//! [`StandaloneHost`](crate::host::StandaloneHost) and performs one
//! subcommand. Settings edits go through the settings tab exactly like a
//! user clicking in a settings pane would.

pub mod cli;
pub mod state;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use crate::error::{OpenWithError, Result};
use crate::host::DocumentHandle;
use crate::logging;
use crate::settings::{SettingsActions, SettingsEvent};
use crate::utils::paths::relative_to_root;

pub use cli::{Cli, CliCommand, Switch};
pub use state::{init_state, init_state_with, AppState};

/// Entry point of the `open-with` binary
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    logging::init();
    tracing::debug!(command = ?cli.command, "Starting open-with");

    let result = state::settings_path(cli.settings.clone()).and_then(|settings| {
        let root = command_root(&cli.command)?;
        let mut app = init_state(settings, root)?;
        execute(&mut app, cli.command, &mut std::io::stdout().lock())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Absolute content root for subcommands that act on files
fn command_root(command: &CliCommand) -> Result<Option<std::path::PathBuf>> {
    match command {
        CliCommand::Run { root, .. } | CliCommand::Menu { root, .. } => {
            state::content_root(root).map(Some)
        }
        _ => Ok(None),
    }
}

/// Perform one subcommand against an activated plugin
///
/// Output and notices go to `out`.
pub fn execute(app: &mut AppState, command: CliCommand, out: &mut dyn Write) -> Result<()> {
    let AppState { plugin, host, tab } = app;

    match command {
        CliCommand::Commands => {
            for command in host.commands().iter() {
                writeln!(out, "{}\t{}", command.id, command.name)?;
            }
        }
        CliCommand::Run { id, root, file } => {
            if let Some(file) = file {
                let root = state::content_root(&root)?;
                host.open_document(DocumentHandle::new(relative_to_root(&root, &file)?));
            }
            if !host.execute_command(&id, &*plugin)? {
                writeln!(out, "Command '{id}' is not available without an open file")?;
            }
        }
        CliCommand::Menu { root, file, activate } => {
            let root = state::content_root(&root)?;
            let file = DocumentHandle::new(relative_to_root(&root, &file)?);
            let menu = host.file_menu(plugin, &file)?;

            match activate {
                Some(n) => {
                    let item = n
                        .checked_sub(1)
                        .and_then(|index| menu.items().get(index))
                        .ok_or_else(|| OpenWithError::not_found("Menu item", n.to_string()))?;
                    plugin.activate_menu_item(item, &file, &*host);
                }
                None if menu.is_empty() => writeln!(out, "No menu items for {}", file.path)?,
                None => {
                    for (index, item) in menu.items().iter().enumerate() {
                        writeln!(out, "{}. {}", index + 1, item.title)?;
                    }
                }
            }
        }
        CliCommand::Settings => {
            write!(out, "{}", tab.display(&*plugin)?)?;
        }
        CliCommand::Add { name, code, arguments } => {
            tab.handle(SettingsEvent::SetName(name), plugin, host)?;
            tab.handle(SettingsEvent::SetCode(code), plugin, host)?;
            tab.handle(SettingsEvent::SetArguments(arguments), plugin, host)?;
            let view = tab.handle(SettingsEvent::AddApp, plugin, host)?;
            write!(out, "{view}")?;
        }
        CliCommand::Remove { name } => {
            let row = row_of(&*plugin, &name)?;
            let view = tab.handle(SettingsEvent::RemoveApp(row), plugin, host)?;
            write!(out, "{view}")?;
        }
        CliCommand::Toggle { name } => {
            let row = row_of(&*plugin, &name)?;
            let view = tab.handle(SettingsEvent::ToggleShowInMenu(row), plugin, host)?;
            write!(out, "{view}")?;
        }
        CliCommand::Explorer { state } => {
            let view = tab.handle(
                SettingsEvent::SetExplorerInFileMenu(state.enabled()),
                plugin,
                host,
            )?;
            write!(out, "{view}")?;
        }
    }

    for notice in host.take_notices() {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}

/// Row of the first application whose name matches, ignoring case
fn row_of(actions: &dyn SettingsActions, name: &str) -> Result<usize> {
    let wanted = name.to_lowercase();
    actions
        .settings()?
        .apps
        .iter()
        .position(|app| app.name.to_lowercase() == wanted)
        .ok_or_else(|| OpenWithError::not_found("Application", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::recording::{PlatformCall, RecordingPlatform};
    use crate::settings::{JsonFileStore, MemoryStore, SettingsStore};
    use crate::utils::paths::{resolve_absolute_path, PathStyle};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::try_parse_from(std::iter::once("open-with").chain(args.iter().copied()))
            .map_err(|e| OpenWithError::General(e.to_string()))
    }

    fn run_cmd(app: &mut AppState, args: &[&str]) -> Result<String> {
        let cli = parse(args)?;
        let mut out = Vec::new();
        execute(app, cli.command, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Fresh state whose host root comes from the command, as in `run`
    fn run_fresh(platform: &RecordingPlatform, args: &[&str]) -> Result<String> {
        let cli = parse(args)?;
        let root = command_root(&cli.command)?;
        let mut app = init_state_with(
            Box::new(MemoryStore::new()),
            Box::new(platform.clone()),
            root,
        )?;
        let mut out = Vec::new();
        execute(&mut app, cli.command, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn memory_app(platform: &RecordingPlatform, root: Option<&str>) -> AppState {
        crate::logging::init_test();
        init_state_with(
            Box::new(MemoryStore::new()),
            Box::new(platform.clone()),
            root.map(PathBuf::from),
        )
        .unwrap()
    }

    #[test]
    fn test_add_toggle_and_menu() {
        let platform = RecordingPlatform::new();
        let mut app = memory_app(&platform, Some("/vault"));

        let output = run_cmd(&mut app, &["add", "Code", "code"]).unwrap();
        assert!(output.contains("1. Code [code]"));

        run_cmd(&mut app, &["toggle", "code"]).unwrap();
        run_cmd(&mut app, &["explorer", "on"]).unwrap();

        let output = run_cmd(&mut app, &["menu", "--root", "/vault", "/vault/notes/a.md"]).unwrap();
        assert_eq!(output, "1. Open with Code\n2. Show in system explorer\n");

        run_cmd(
            &mut app,
            &["menu", "--root", "/vault", "/vault/notes/a.md", "--activate", "1"],
        )
        .unwrap();
        assert_eq!(
            platform.calls(),
            vec![PlatformCall::OpenWith {
                target: "code".to_string(),
                path: resolve_absolute_path("/vault", "notes/a.md", PathStyle::current()),
                args: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_commands_lists_builtins_and_added_app() {
        let platform = RecordingPlatform::new();
        let mut app = memory_app(&platform, None);
        run_cmd(&mut app, &["add", "Typora", "typora"]).unwrap();

        let output = run_cmd(&mut app, &["commands"]).unwrap();
        assert!(output.contains("copy-absolute-file-path\tCopy absolute file path"));
        assert!(output.contains("show-file-in-explorer\tShow file in system explorer"));
        assert!(output.contains("open-file-with-typora\tOpen with Typora"));
    }

    #[test]
    fn test_rejected_add_prints_notice() {
        let platform = RecordingPlatform::new();
        let mut app = memory_app(&platform, None);

        let output = run_cmd(&mut app, &["add", "  ", "code"]).unwrap();
        assert!(output.contains("No applications registered."));
        assert!(output.ends_with("Application name cannot be empty\n"));
    }

    #[test]
    fn test_remove_prints_restart_notice() {
        let platform = RecordingPlatform::new();
        let mut app = memory_app(&platform, None);
        run_cmd(&mut app, &["add", "Code", "code"]).unwrap();

        let output = run_cmd(&mut app, &["remove", "Code"]).unwrap();
        assert!(output.contains("Restart"));
        assert!(run_cmd(&mut app, &["remove", "Code"]).is_err());
    }

    #[test]
    fn test_run_without_file_reports_unavailable() {
        let platform = RecordingPlatform::new();
        let mut app = memory_app(&platform, Some("/vault"));

        let output = run_cmd(&mut app, &["run", "copy-absolute-file-path", "--root", "/vault"]).unwrap();
        assert!(output.contains("not available"));
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_relative_root_resolves_against_working_directory() {
        let platform = RecordingPlatform::new();

        run_fresh(
            &platform,
            &["run", "copy-absolute-file-path", "--root", "vault", "notes/a.md"],
        )
        .unwrap();

        let root = std::env::current_dir().unwrap().join("vault");
        let expected = resolve_absolute_path(&root.to_string_lossy(), "notes/a.md", PathStyle::current());
        assert!(Path::new(&expected).is_absolute());
        assert_eq!(platform.calls(), vec![PlatformCall::Clipboard(expected)]);
    }

    #[test]
    fn test_file_outside_root_is_rejected() {
        let platform = RecordingPlatform::new();
        let root = std::env::temp_dir().join("vault");
        let outside = std::env::temp_dir().join("elsewhere").join("other.md");

        let result = run_fresh(
            &platform,
            &[
                "run",
                "copy-absolute-file-path",
                "--root",
                &root.to_string_lossy(),
                &outside.to_string_lossy(),
            ],
        );

        assert!(matches!(result, Err(OpenWithError::Validation(_))));
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_menu_activate_out_of_range() {
        let platform = RecordingPlatform::new();
        let mut app = memory_app(&platform, Some("/vault"));

        let result = run_cmd(&mut app, &["menu", "--root", "/vault", "a.md", "--activate", "0"]);
        assert!(matches!(result, Err(OpenWithError::NotFound { .. })));
    }

    #[test]
    fn test_settings_survive_restart_through_file_store() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let platform = RecordingPlatform::new();

        let mut app = init_state_with(
            Box::new(JsonFileStore::new(&path)),
            Box::new(platform.clone()),
            None,
        )
        .unwrap();
        run_cmd(&mut app, &["add", "Code", "code", "--arguments", "-n"]).unwrap();
        drop(app);

        let store = JsonFileStore::new(&path);
        let data = store.load_data().unwrap().unwrap();
        assert_eq!(data["apps"][0]["arguments"], "-n");

        let mut app = init_state_with(Box::new(store), Box::new(platform), None).unwrap();
        let output = run_cmd(&mut app, &["settings"]).unwrap();
        assert!(output.contains("1. Code [code] args: -n"));
    }
}
