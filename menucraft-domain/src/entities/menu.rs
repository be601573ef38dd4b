// Menu entity
// The validated, immutable-after-load definition of one menu: a fixed-size
// grid of icons plus menu-level settings and open triggers.

use crate::actions::Action;
use crate::entities::{IconDefinition, ItemSnapshot, MenuOpenItem};
use crate::ports::Viewer;
use crate::services::{PlaceholderRegistry, PlaceholderString};
use crate::value_objects::{MenuFileName, SlotPosition, Ticks, MENU_COLUMNS};

pub const MAX_MENU_ROWS: u8 = 6;

#[derive(Debug)]
pub struct MenuDefinition {
    title: PlaceholderString,
    rows: u8,
    columns: u8,
    // Row-major grid; at most one icon per cell
    icons: Vec<Option<IconDefinition>>,
    open_commands: Vec<String>,
    open_item: Option<MenuOpenItem>,
    open_actions: Vec<Action>,
    refresh_ticks: Option<Ticks>,
    auto_close_ticks: Option<Ticks>,
    auto_reopen: bool,
    file_name: MenuFileName,
}

impl MenuDefinition {
    pub fn new(title: PlaceholderString, rows: u8, file_name: MenuFileName) -> Self {
        let rows = rows.clamp(1, MAX_MENU_ROWS);
        Self {
            title,
            rows,
            columns: MENU_COLUMNS,
            icons: (0..rows as usize * MENU_COLUMNS as usize).map(|_| None).collect(),
            open_commands: Vec::new(),
            open_item: None,
            open_actions: Vec::new(),
            refresh_ticks: None,
            auto_close_ticks: None,
            auto_reopen: false,
            file_name,
        }
    }

    pub fn title(&self) -> &PlaceholderString {
        &self.title
    }

    pub fn row_count(&self) -> u8 {
        self.rows
    }

    pub fn column_count(&self) -> u8 {
        self.columns
    }

    pub fn file_name(&self) -> &MenuFileName {
        &self.file_name
    }

    /// Permission node checked by the host before the menu opens.
    pub fn open_permission(&self) -> String {
        format!("menucraft.open.{}", self.file_name.as_str())
    }

    pub fn in_bounds(&self, position: SlotPosition) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    pub fn icon_at(&self, position: SlotPosition) -> Option<&IconDefinition> {
        if !self.in_bounds(position) {
            return None;
        }
        self.icons[position.slot_index()].as_ref()
    }

    /// Places an icon, returning the icon it displaced (position collisions
    /// are last-write-wins). Out-of-bounds positions are rejected upstream;
    /// here they are simply ignored and the icon dropped.
    pub fn set_icon(
        &mut self,
        position: SlotPosition,
        icon: IconDefinition,
    ) -> Option<IconDefinition> {
        if !self.in_bounds(position) {
            return None;
        }
        self.icons[position.slot_index()].replace(icon)
    }

    pub fn icons(&self) -> impl Iterator<Item = (SlotPosition, &IconDefinition)> {
        self.icons.iter().enumerate().filter_map(|(index, icon)| {
            icon.as_ref()
                .map(|icon| (SlotPosition::from_slot_index(index), icon))
        })
    }

    pub fn open_commands(&self) -> &[String] {
        &self.open_commands
    }

    pub fn set_open_commands(&mut self, commands: Vec<String>) {
        self.open_commands = commands;
    }

    pub fn open_item(&self) -> Option<&MenuOpenItem> {
        self.open_item.as_ref()
    }

    pub fn set_open_item(&mut self, open_item: Option<MenuOpenItem>) {
        self.open_item = open_item;
    }

    pub fn open_actions(&self) -> &[Action] {
        &self.open_actions
    }

    pub fn set_open_actions(&mut self, actions: Vec<Action>) {
        self.open_actions = actions;
    }

    pub fn refresh_ticks(&self) -> Option<Ticks> {
        self.refresh_ticks
    }

    pub fn set_refresh_ticks(&mut self, ticks: Option<Ticks>) {
        self.refresh_ticks = ticks;
    }

    pub fn auto_close_ticks(&self) -> Option<Ticks> {
        self.auto_close_ticks
    }

    pub fn set_auto_close_ticks(&mut self, ticks: Option<Ticks>) {
        self.auto_close_ticks = ticks;
    }

    pub fn auto_reopen(&self) -> bool {
        self.auto_reopen
    }

    pub fn set_auto_reopen(&mut self, auto_reopen: bool) {
        self.auto_reopen = auto_reopen;
    }

    /// Renders every cell for one viewer, in window slot order.
    pub fn render_for(
        &self,
        registry: &PlaceholderRegistry,
        viewer: &dyn Viewer,
    ) -> Vec<Option<ItemSnapshot>> {
        self.icons
            .iter()
            .map(|icon| icon.as_ref().and_then(|icon| icon.render(registry, viewer)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Material;

    fn menu(rows: u8) -> MenuDefinition {
        MenuDefinition::new(
            PlaceholderString::parse("Test"),
            rows,
            MenuFileName("test.yml".to_string()),
        )
    }

    fn icon() -> IconDefinition {
        IconDefinition::new(Material::parse("stone").expect("parse material"))
    }

    #[test]
    fn rows_are_clamped_to_the_valid_range() {
        assert_eq!(menu(0).row_count(), 1);
        assert_eq!(menu(9).row_count(), 6);
        assert_eq!(menu(3).row_count(), 3);
    }

    #[test]
    fn set_icon_reports_the_displaced_icon() {
        let mut subject = menu(2);
        let position = SlotPosition::new(1, 4);
        assert!(subject.set_icon(position, icon()).is_none());
        assert!(subject.set_icon(position, icon()).is_some());
        assert!(subject.icon_at(position).is_some());
    }

    #[test]
    fn out_of_bounds_positions_hold_no_icons() {
        let mut subject = menu(2);
        let outside = SlotPosition::new(5, 0);
        assert!(subject.set_icon(outside, icon()).is_none());
        assert!(subject.icon_at(outside).is_none());
    }

    #[test]
    fn open_permission_includes_the_file_name() {
        assert_eq!(menu(1).open_permission(), "menucraft.open.test.yml");
    }
}
