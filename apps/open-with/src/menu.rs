//! File context menu contributions
//!
//! Built fresh from the live settings on every menu-open event, so registry
//! edits show up immediately.

use crate::commands::CommandAction;
use crate::host::Menu;
use crate::settings::AppRegistry;

pub const REVEAL_MENU_TITLE: &str = "Show in system explorer";

/// Menu title for an application entry
pub fn open_with_title(name: &str) -> String {
    format!("Open with {name}")
}

/// Append this plugin's items to a file context menu
///
/// One "Open with" item per entry flagged for the menu, in registry order,
/// then the reveal item when the explorer flag is set. Returns the number
/// of items added.
pub fn contribute_file_menu(menu: &mut Menu, registry: &AppRegistry) -> usize {
    let before = menu.len();

    for app in registry.menu_entries() {
        menu.add_item(open_with_title(&app.name), CommandAction::OpenWith(app.clone()));
    }

    if registry.explorer_in_file_menu() {
        menu.add_item(REVEAL_MENU_TITLE, CommandAction::Reveal);
    }

    menu.len() - before
}
