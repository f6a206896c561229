use crate::domain::card::{Card, CardRef, ColumnId};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for a single fixed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub id: ColumnId,
    pub title: String,
}

impl ColumnSpec {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    /// Key of the storage slot holding the board snapshot
    #[serde(default = "BoardConfig::default_storage_key")]
    pub storage_key: String,
    /// Description used when a card is created with a blank one
    #[serde(default = "BoardConfig::default_description")]
    pub default_description: String,
}

impl BoardConfig {
    fn default_storage_key() -> String {
        "taskManagerData".to_string()
    }

    fn default_description() -> String {
        "No description".to_string()
    }

    /// Parses a configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the column layout and storage key are usable
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(BoardError::ConfigError(
                "board must define at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.id.as_str().trim().is_empty() {
                return Err(BoardError::ConfigError(
                    "column id must not be empty".to_string(),
                ));
            }
            if !seen.insert(column.id.as_str()) {
                return Err(BoardError::ConfigError(format!(
                    "duplicate column id: {}",
                    column.id
                )));
            }
        }

        if self.storage_key.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "storage key must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Task Manager".to_string(),
            columns: vec![
                ColumnSpec::new("todo", "To Do"),
                ColumnSpec::new("in-progress", "In Progress"),
                ColumnSpec::new("done", "Done"),
            ],
            storage_key: Self::default_storage_key(),
            default_description: Self::default_description(),
        }
    }
}

/// A column and the cards it owns, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(spec: &ColumnSpec) -> Self {
        Self {
            id: spec.id.clone(),
            title: spec.title.clone(),
            cards: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Where a moved card should land
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the referenced card
    Before(CardRef),
    /// Immediately after the referenced card
    After(CardRef),
    /// At the end of the column
    End(ColumnId),
}

/// Kanban board state
#[derive(Debug, Clone)]
pub struct Board {
    pub config: BoardConfig,
    columns: Vec<Column>,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let columns = config.columns.iter().map(Column::new).collect();
        Self { config, columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| &col.id == id)
    }

    fn require_column(&self, id: &ColumnId) -> Result<&Column> {
        self.column(id)
            .ok_or_else(|| BoardError::ColumnNotFound(id.to_string()))
    }

    fn require_column_mut(&mut self, id: &ColumnId) -> Result<&mut Column> {
        self.column_mut(id)
            .ok_or_else(|| BoardError::ColumnNotFound(id.to_string()))
    }

    pub fn card(&self, card_ref: &CardRef) -> Result<&Card> {
        self.require_column(&card_ref.column)?
            .cards
            .get(card_ref.index)
            .ok_or_else(|| card_not_found(card_ref))
    }

    pub fn card_mut(&mut self, card_ref: &CardRef) -> Result<&mut Card> {
        self.require_column_mut(&card_ref.column)?
            .cards
            .get_mut(card_ref.index)
            .ok_or_else(|| card_not_found(card_ref))
    }

    /// Appends a card to the end of a column and returns its address
    pub fn append_card(&mut self, column: &ColumnId, card: Card) -> Result<CardRef> {
        let col = self.require_column_mut(column)?;
        col.cards.push(card);
        Ok(CardRef::new(column.clone(), col.cards.len() - 1))
    }

    /// Removes a card, shifting later cards in the column up by one
    pub fn remove_card(&mut self, card_ref: &CardRef) -> Result<Card> {
        let col = self.require_column_mut(&card_ref.column)?;
        if card_ref.index >= col.cards.len() {
            return Err(card_not_found(card_ref));
        }
        Ok(col.cards.remove(card_ref.index))
    }

    /// Moves a card to a new placement, possibly in another column.
    ///
    /// The placement is interpreted against the board as it is before the
    /// move. Returns the card's new address.
    pub fn move_card(&mut self, from: &CardRef, to: &Placement) -> Result<CardRef> {
        self.card(from)?;

        let (target_column, mut index) = match to {
            Placement::Before(target) => {
                self.card(target)?;
                (target.column.clone(), target.index)
            }
            Placement::After(target) => {
                self.card(target)?;
                (target.column.clone(), target.index + 1)
            }
            Placement::End(column) => (column.clone(), self.require_column(column)?.len()),
        };

        let card = self.remove_card(from)?;
        if from.column == target_column && from.index < index {
            index -= 1;
        }

        let col = self.require_column_mut(&target_column)?;
        col.cards.insert(index, card);
        Ok(CardRef::new(target_column, index))
    }

    pub fn card_count(&self, column: &ColumnId) -> Option<usize> {
        self.column(column).map(Column::len)
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Iterates all cards, column by column, in display order
    pub fn iter_cards(&self) -> impl Iterator<Item = (CardRef, &Card)> {
        self.columns.iter().flat_map(|col| {
            col.cards
                .iter()
                .enumerate()
                .map(move |(index, card)| (CardRef::new(col.id.clone(), index), card))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

fn card_not_found(card_ref: &CardRef) -> BoardError {
    BoardError::CardNotFound {
        column: card_ref.column.to_string(),
        index: card_ref.index,
    }
}
