//! Card choice dropdown.

use grc_common::{CardChoice, Result};
use grc_config::messages::keys;
use grc_config::{MessageCatalog, ViewState, ViewStateStore};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CardChoiceOption {
    pub value: CardChoice,
    pub label: String,
}

/// The dropdown entries, categories first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CardChoiceOptions {
    options: Vec<CardChoiceOption>,
}

impl CardChoiceOptions {
    pub fn new(catalog: &MessageCatalog) -> Self {
        let options = CardChoice::all()
            .iter()
            .map(|&value| CardChoiceOption {
                value,
                label: catalog.get(label_key(value)),
            })
            .collect();
        CardChoiceOptions { options }
    }

    pub fn options(&self) -> &[CardChoiceOption] {
        &self.options
    }

    /// Position of a choice in the dropdown, 0 when it is not offered.
    pub fn selected_index(&self, choice: CardChoice) -> usize {
        self.options
            .iter()
            .position(|option| option.value == choice)
            .unwrap_or(0)
    }

    /// Label of the selected entry.
    pub fn selected_label(&self, choice: CardChoice) -> &str {
        self.options
            .get(self.selected_index(choice))
            .map_or("", |option| option.label.as_str())
    }
}

fn label_key(choice: CardChoice) -> &'static str {
    match choice {
        CardChoice::Categories => keys::CARDS_CATEGORIES,
        CardChoice::Standards => keys::CARDS_STANDARDS,
    }
}

/// View state with a new card choice.
pub fn select(state: &ViewState, choice: CardChoice) -> ViewState {
    state.with_card_choice(choice)
}

/// Record a new card choice in the store and return the saved state.
pub fn select_and_save(
    store: &dyn ViewStateStore,
    key: &str,
    choice: CardChoice,
) -> Result<ViewState> {
    let next = select(&store.load(key), choice);
    store.save(key, &next)?;
    Ok(next)
}
