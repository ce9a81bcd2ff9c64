//! crates/moodmeal_core/src/store/slices/pantry.rs
//!
//! Pantry stock and grocery lists. Every operation here is synchronous; removal and
//! update by an unknown id are silent no-ops.

use crate::domain::{GroceryItem, GroceryList, PantryItem};
use crate::store::lifecycle::AsyncStatus;
use crate::store::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum PantryAction {
    AddPantryItem(PantryItem),
    RemovePantryItem(String),
    UpdatePantryItem(PantryItem),
    AddGroceryList(GroceryList),
    RemoveGroceryList(String),
    UpdateGroceryList(GroceryList),
    UpdateGroceryItem { list_id: String, item: GroceryItem },
    ToggleGroceryItem { list_id: String, item_id: String },
    ClearError,
}

impl PantryAction {
    pub fn kind(&self) -> &'static str {
        match self {
            PantryAction::AddPantryItem(_) => "addPantryItem",
            PantryAction::RemovePantryItem(_) => "removePantryItem",
            PantryAction::UpdatePantryItem(_) => "updatePantryItem",
            PantryAction::AddGroceryList(_) => "addGroceryList",
            PantryAction::RemoveGroceryList(_) => "removeGroceryList",
            PantryAction::UpdateGroceryList(_) => "updateGroceryList",
            PantryAction::UpdateGroceryItem { .. } => "updateGroceryItem",
            PantryAction::ToggleGroceryItem { .. } => "toggleGroceryItem",
            PantryAction::ClearError => "clearError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PantryState {
    pub pantry_items: Vec<PantryItem>,
    pub grocery_lists: Vec<GroceryList>,
    pub status: AsyncStatus,
}

impl PantryState {
    pub fn reduce(&mut self, action: &Action) {
        let Action::Pantry(action) = action else {
            return;
        };

        match action {
            PantryAction::AddPantryItem(item) => self.pantry_items.push(item.clone()),
            PantryAction::RemovePantryItem(id) => self.pantry_items.retain(|item| &item.id != id),
            PantryAction::UpdatePantryItem(item) => {
                if let Some(slot) = self.pantry_items.iter_mut().find(|i| i.id == item.id) {
                    *slot = item.clone();
                }
            }
            PantryAction::AddGroceryList(list) => self.grocery_lists.push(list.clone()),
            PantryAction::RemoveGroceryList(id) => self.grocery_lists.retain(|list| &list.id != id),
            PantryAction::UpdateGroceryList(list) => {
                if let Some(slot) = self.grocery_lists.iter_mut().find(|l| l.id == list.id) {
                    *slot = list.clone();
                }
            }
            PantryAction::UpdateGroceryItem { list_id, item } => {
                if let Some(slot) = self.grocery_item_mut(list_id, &item.id) {
                    *slot = item.clone();
                }
            }
            PantryAction::ToggleGroceryItem { list_id, item_id } => {
                if let Some(slot) = self.grocery_item_mut(list_id, item_id) {
                    slot.is_checked = !slot.is_checked;
                }
            }
            PantryAction::ClearError => self.status.clear_error(),
        }
    }

    fn grocery_item_mut(&mut self, list_id: &str, item_id: &str) -> Option<&mut GroceryItem> {
        self.grocery_lists
            .iter_mut()
            .find(|list| list.id == list_id)?
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
    }
}
