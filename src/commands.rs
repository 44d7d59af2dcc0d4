//! Command and context-menu registry
//!
//! The host owns the command palette and the editor context menu; the
//! plugin describes its entries statically and hands them to a
//! [`CommandRegistry`] when it loads.

/// Identifies a command the plugin provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// Insert or remove a highlight around the selection
    ToggleHighlight,
}

/// A command definition for the command palette
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: CommandId,
    /// Stable identifier the host stores in keybindings
    pub name: &'static str,
    pub label: &'static str,
    pub keybinding: Option<&'static str>,
}

/// An entry in the editor's right-click menu
#[derive(Debug, Clone)]
pub struct MenuItemDef {
    pub command: CommandId,
    pub title: &'static str,
    pub icon: Option<&'static str>,
}

/// Static registry of all available commands
pub static COMMANDS: &[CommandDef] = &[CommandDef {
    id: CommandId::ToggleHighlight,
    name: "toggle-highlight",
    label: "Toggle highlight",
    keybinding: None,
}];

/// Static registry of editor context-menu entries
pub static EDITOR_MENU_ITEMS: &[MenuItemDef] = &[MenuItemDef {
    command: CommandId::ToggleHighlight,
    title: "Toggle highlight",
    icon: Some("highlighter"),
}];

impl CommandId {
    /// Definition of this command
    pub fn def(self) -> Option<&'static CommandDef> {
        COMMANDS.iter().find(|def| def.id == self)
    }

    /// Look up a command by its stable name
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.id)
    }
}

/// Registration collaborator provided by the host
pub trait CommandRegistry {
    fn add_command(&mut self, command: &CommandDef);

    fn add_editor_menu_item(&mut self, item: &MenuItemDef);
}

/// Register every command and menu entry
pub fn register_all(registry: &mut dyn CommandRegistry) {
    for command in COMMANDS {
        tracing::debug!("Registering command {}", command.name);
        registry.add_command(command);
    }
    for item in EDITOR_MENU_ITEMS {
        registry.add_editor_menu_item(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_has_a_def() {
        assert!(CommandId::ToggleHighlight.def().is_some());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            CommandId::from_name("toggle-highlight"),
            Some(CommandId::ToggleHighlight)
        );
        assert_eq!(CommandId::from_name("nope"), None);
    }

    #[test]
    fn test_menu_items_refer_to_registered_commands() {
        for item in EDITOR_MENU_ITEMS {
            assert!(item.command.def().is_some());
        }
    }
}
