// Menu registry
// Indexes loaded menus by file name, open command and open item. Built once
// per load/reload and swapped into the engine atomically; lookups are
// case-insensitive.

use std::collections::HashMap;
use std::sync::Arc;

use menucraft_domain::{
    ErrorCollector, LoadError, LoadErrorKind, Material, MenuDefinition, MenuFileName, MouseClick,
};

#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus_by_file: HashMap<String, Arc<MenuDefinition>>,
    menus_by_command: HashMap<String, Arc<MenuDefinition>>,
    // Insertion order decides which trigger wins when items overlap
    item_triggers: Vec<Arc<MenuDefinition>>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a menu under its file name, open commands and open item.
    /// Duplicates are first-wins: the already-registered menu keeps its slot
    /// and a collected error points at the rejected one.
    pub fn register_menu(&mut self, menu: Arc<MenuDefinition>, errors: &mut ErrorCollector) {
        let file_key = menu.file_name().as_str().to_lowercase();
        if let Some(registered) = self.menus_by_file.get(&file_key) {
            errors.add(LoadError::menu(
                menu.file_name(),
                LoadErrorKind::DuplicateMenuFile {
                    other: registered.file_name().to_string(),
                },
            ));
            return;
        }
        self.menus_by_file.insert(file_key, Arc::clone(&menu));

        for command in menu.open_commands() {
            let command_key = command.to_lowercase();
            if let Some(other) = self.menus_by_command.get(&command_key) {
                errors.add(LoadError::menu(
                    menu.file_name(),
                    LoadErrorKind::DuplicateOpenCommand {
                        command: command.clone(),
                        other: other.file_name().to_string(),
                    },
                ));
                continue;
            }
            self.menus_by_command.insert(command_key, Arc::clone(&menu));
        }

        if menu.open_item().is_some() {
            self.item_triggers.push(menu);
        }
    }

    pub fn lookup_by_file_name(&self, file_name: &str) -> Option<Arc<MenuDefinition>> {
        self.menus_by_file.get(&file_name.to_lowercase()).cloned()
    }

    pub fn lookup_by_command(&self, command: &str) -> Option<Arc<MenuDefinition>> {
        self.menus_by_command.get(&command.to_lowercase()).cloned()
    }

    /// The first registered menu whose open item matches the held item.
    pub fn lookup_by_item(
        &self,
        material: &Material,
        durability: Option<u16>,
        click: MouseClick,
    ) -> Option<Arc<MenuDefinition>> {
        self.item_triggers
            .iter()
            .find(|menu| {
                menu.open_item()
                    .is_some_and(|trigger| trigger.matches(material, durability, click))
            })
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.menus_by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus_by_file.is_empty()
    }

    /// File names of every registered menu, sorted for stable listings.
    pub fn file_names(&self) -> Vec<MenuFileName> {
        let mut names: Vec<MenuFileName> = self
            .menus_by_file
            .values()
            .map(|menu| menu.file_name().clone())
            .collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }
}
