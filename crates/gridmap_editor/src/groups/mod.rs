//! Group registry with rename/remove cascades
//!
//! Groups are kept in definition order (the order the palette shows and the
//! order "select first remaining" walks) alongside a name index. Every
//! mutation goes through the registry so the two stay in step, and renames
//! and removals are pushed into every map that references the group.

use gridmap_core::{EntityInstance, Group, TileMap};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::observer::{ObserverId, Observers};

/// Build the name -> position index for a group list.
///
/// When names repeat, the first occurrence wins.
pub fn build_index(groups: &[Group]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(groups.len());
    for (i, group) in groups.iter().enumerate() {
        index.entry(group.name.clone()).or_insert(i);
    }
    index
}

/// Sent to selection observers when the active group changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub previous: Option<String>,
    pub current: Option<String>,
}

/// What a [`GroupRegistry::remove`] did
#[derive(Debug, Clone)]
pub struct GroupRemoval {
    pub group: Group,
    /// Cells written empty across all maps
    pub cells_cleared: usize,
    /// Entities deleted across all maps
    pub entities_removed: Vec<EntityInstance>,
    pub selection_changed: bool,
}

/// What a [`GroupRegistry::rename`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRename {
    pub cells_rewritten: usize,
    pub entities_rewritten: usize,
    pub selection_changed: bool,
}

/// Catalog of tile and entity groups plus the active palette selection
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
    selected: Option<String>,
    observers: Observers<SelectionChanged>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a group list, with nothing selected
    pub fn from_groups(groups: Vec<Group>) -> Self {
        let index = build_index(&groups);
        Self {
            groups,
            index,
            selected: None,
            observers: Observers::default(),
        }
    }

    /// Groups in definition order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    /// Edit a group's attributes in place. The name cannot be changed this
    /// way; use [`rename`](Self::rename).
    pub fn update(&mut self, name: &str, edit: impl FnOnce(&mut Group)) -> bool {
        let Some(&i) = self.index.get(name) else {
            return false;
        };
        let group = &mut self.groups[i];
        edit(group);
        group.name = name.to_string();
        true
    }

    /// Append a group. Names are not checked for uniqueness here.
    pub fn add(&mut self, group: Group) {
        self.index
            .entry(group.name.clone())
            .or_insert(self.groups.len());
        self.groups.push(group);
    }

    /// Remove a group and everything that references it.
    ///
    /// Cells painted with the group become empty and its entities are
    /// deleted in every map given. If it was selected, the first remaining
    /// group (or nothing) becomes selected. Returns `None` if no such group.
    pub fn remove<'a>(
        &mut self,
        name: &str,
        maps: impl IntoIterator<Item = &'a mut TileMap>,
    ) -> Option<GroupRemoval> {
        let position = self.index.get(name).copied()?;
        let group = self.groups.remove(position);
        self.rebuild_index();

        let mut cells_cleared = 0;
        let mut entities_removed = Vec::new();
        // A duplicate still owns the name, so its cells stay
        if !self.contains(name) {
            for map in maps {
                for layer in map.layers.iter_mut() {
                    cells_cleared += layer.replace_all(name, None);
                }
                entities_removed.extend(map.remove_entities_of_group(name));
            }
        }

        let selection_changed = if self.selected.as_deref() == Some(name) && !self.contains(name)
        {
            let next = self.groups.first().map(|g| g.name.clone());
            self.set_selection(next);
            true
        } else {
            false
        };

        info!(
            "Removed group '{}' ({} cells cleared, {} entities removed)",
            name,
            cells_cleared,
            entities_removed.len()
        );

        Some(GroupRemoval {
            group,
            cells_cleared,
            entities_removed,
            selection_changed,
        })
    }

    /// Rename a group and rewrite every cell and entity that references it.
    ///
    /// Does nothing and returns `None` when `old` does not exist or `new` is
    /// already taken.
    pub fn rename<'a>(
        &mut self,
        old: &str,
        new: &str,
        maps: impl IntoIterator<Item = &'a mut TileMap>,
    ) -> Option<GroupRename> {
        let position = self.index.get(old).copied()?;
        if self.index.contains_key(new) {
            debug!("Rename of '{}' skipped: '{}' already exists", old, new);
            return None;
        }

        self.groups[position].name = new.to_string();
        self.rebuild_index();

        let mut cells_rewritten = 0;
        let mut entities_rewritten = 0;
        // A duplicate still owns the old name, so its cells stay
        if !self.contains(old) {
            for map in maps {
                for layer in map.layers.iter_mut() {
                    cells_rewritten += layer.replace_all(old, Some(new));
                }
                for entity in map.entities.iter_mut().filter(|e| e.group_name == old) {
                    entity.group_name = new.to_string();
                    entities_rewritten += 1;
                }
            }
        }

        let selection_changed = if self.selected.as_deref() == Some(old) && !self.contains(old)
        {
            self.set_selection(Some(new.to_string()));
            true
        } else {
            false
        };

        info!("Renamed group '{}' to '{}'", old, new);

        Some(GroupRename {
            cells_rewritten,
            entities_rewritten,
            selection_changed,
        })
    }

    /// Currently selected group name
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Change the selection. Unknown names are rejected; `None` deselects.
    pub fn select(&mut self, name: Option<&str>) -> bool {
        if let Some(name) = name {
            if !self.contains(name) {
                return false;
            }
        }
        if self.selected.as_deref() != name {
            self.set_selection(name.map(str::to_string));
        }
        true
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&SelectionChanged) + Send + Sync + 'static,
    ) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Recompute the name index from the group list
    pub fn rebuild_index(&mut self) {
        self.index = build_index(&self.groups);
    }

    /// Whether the name index agrees with the group list
    pub fn is_index_consistent(&self) -> bool {
        self.index == build_index(&self.groups)
    }

    /// Copy of the groups for persistence
    pub fn to_vec(&self) -> Vec<Group> {
        self.groups.clone()
    }

    fn set_selection(&mut self, current: Option<String>) {
        let previous = std::mem::replace(&mut self.selected, current.clone());
        self.observers
            .notify(&SelectionChanged { previous, current });
    }
}
