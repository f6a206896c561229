//! Board snapshot codec and the storage slot it is written to.
//!
//! A snapshot is the JSON document
//! `{"columns": {"<column id>": [{"heading": "..", "description": ".."}]}}`.
//! There is no version field; any change to this shape breaks stored data.

use crate::{
    domain::{Board, Card, ColumnId},
    error::Result,
    storage::Storage,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Persisted form of one card; missing fields load as placeholder text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default = "CardRecord::placeholder_heading")]
    pub heading: String,
    #[serde(default = "CardRecord::placeholder_description")]
    pub description: String,
}

impl CardRecord {
    fn placeholder_heading() -> String {
        Card::PLACEHOLDER_HEADING.to_string()
    }

    fn placeholder_description() -> String {
        Card::PLACEHOLDER_DESCRIPTION.to_string()
    }
}

impl From<&Card> for CardRecord {
    fn from(card: &Card) -> Self {
        Self {
            heading: card.heading.clone(),
            description: card.description.clone(),
        }
    }
}

impl From<CardRecord> for Card {
    fn from(record: CardRecord) -> Self {
        Card::new(record.heading, record.description)
    }
}

/// Serialized state of a whole board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub columns: BTreeMap<String, Vec<CardRecord>>,
}

/// What applying a snapshot did to the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded_cards: usize,
    /// Snapshot columns with no counterpart on the board, skipped
    pub ignored_columns: Vec<String>,
}

impl Snapshot {
    /// Walks the board and records every column's cards in display order
    pub fn capture(board: &Board) -> Self {
        let columns = board
            .columns()
            .iter()
            .map(|col| {
                let cards = col.cards.iter().map(CardRecord::from).collect();
                (col.id.as_str().to_string(), cards)
            })
            .collect();
        Self { columns }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Appends the recorded cards to matching board columns.
    ///
    /// Columns are applied independently: an unknown column is skipped and
    /// does not prevent the others from loading.
    pub fn apply(self, board: &mut Board) -> LoadReport {
        let mut report = LoadReport::default();

        for (column_id, records) in self.columns {
            match board.column_mut(&ColumnId::new(column_id.as_str())) {
                Some(column) => {
                    report.loaded_cards += records.len();
                    column.cards.extend(records.into_iter().map(Card::from));
                }
                None => {
                    warn!(column = %column_id, "snapshot column not on board, skipping");
                    report.ignored_columns.push(column_id);
                }
            }
        }

        report
    }

    pub fn card_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }
}

/// Result of reading the persisted slot at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet
    Empty,
    Loaded(LoadReport),
    /// Stored data could not be parsed; the board was left untouched
    Malformed,
}

/// Binds a storage backend to the slot holding the board snapshot
pub struct Persistence<S> {
    storage: S,
    key: String,
}

impl<S: Storage> Persistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the full board under the configured key
    pub async fn save(&self, board: &Board) -> Result<()> {
        let snapshot = Snapshot::capture(board);
        let encoded = snapshot.encode()?;
        self.storage.set_item(&self.key, &encoded).await?;
        debug!(key = %self.key, cards = snapshot.card_count(), "board saved");
        Ok(())
    }

    /// Rehydrates the board from the stored snapshot, if any.
    ///
    /// Malformed data is logged and reported, never returned as an error.
    /// Storage failures are still propagated.
    pub async fn load(&self, board: &mut Board) -> Result<LoadOutcome> {
        let Some(data) = self.storage.get_item(&self.key).await? else {
            debug!(key = %self.key, "no saved board");
            return Ok(LoadOutcome::Empty);
        };

        match Snapshot::decode(&data) {
            Ok(snapshot) => {
                let report = snapshot.apply(board);
                debug!(
                    key = %self.key,
                    cards = report.loaded_cards,
                    ignored = report.ignored_columns.len(),
                    "board loaded"
                );
                Ok(LoadOutcome::Loaded(report))
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "error loading saved data");
                Ok(LoadOutcome::Malformed)
            }
        }
    }

    /// Drops the stored snapshot
    pub async fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const KEY: &str = "taskManagerData";

    fn sample_board() -> Board {
        let mut board = Board::default();
        board
            .append_card(&"todo".into(), Card::new("Buy milk", "for breakfast"))
            .unwrap();
        board
            .append_card(&"todo".into(), Card::new("Call Bob", "schedule meeting"))
            .unwrap();
        board
            .append_card(&"done".into(), Card::new("Ship it", ""))
            .unwrap();
        board
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = Snapshot::capture(&sample_board());
        let value: serde_json::Value = serde_json::from_str(&snapshot.encode().unwrap()).unwrap();

        assert_eq!(value["columns"]["todo"][1]["heading"], "Call Bob");
        assert_eq!(value["columns"]["todo"][1]["description"], "schedule meeting");
        assert_eq!(value["columns"]["in-progress"], serde_json::json!([]));
        assert_eq!(value["columns"]["done"][0]["description"], "");
    }

    #[test]
    fn test_apply_skips_unknown_columns() {
        let data = r#"{"columns":{
            "archive":[{"heading":"Old","description":"gone"}],
            "todo":[{"heading":"A","description":"a"},{"heading":"B","description":"b"}]
        }}"#;
        let mut board = Board::default();
        let report = Snapshot::decode(data).unwrap().apply(&mut board);

        assert_eq!(report.loaded_cards, 2);
        assert_eq!(report.ignored_columns, vec!["archive".to_string()]);
        assert_eq!(board.card_count(&"todo".into()), Some(2));
        assert_eq!(board.total_cards(), 2);
    }

    #[test]
    fn test_partial_records_load_with_placeholders() {
        let data = r#"{"columns":{
            "todo":[{"heading":"Legacy"},{"description":"no title"}],
            "done":[{"heading":"Ok","description":"d"}]
        }}"#;
        let mut board = Board::default();
        let report = Snapshot::decode(data).unwrap().apply(&mut board);

        assert_eq!(report.loaded_cards, 3);
        let todo = &board.column(&"todo".into()).unwrap().cards;
        assert_eq!(todo[0], Card::new("Legacy", "Task details..."));
        assert_eq!(todo[1], Card::new("New Task", "no title"));
        assert_eq!(
            board.card(&crate::domain::CardRef::new("done", 0)).unwrap(),
            &Card::new("Ok", "d")
        );
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(Snapshot::decode("not json").is_err());
        assert!(Snapshot::decode(r#"{"columns":{"todo":[{"heading":1}]}}"#).is_err());
        assert!(Snapshot::decode(r#"{"cards":[]}"#).is_err());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        let persistence = Persistence::new(MemoryStorage::new(), KEY);
        let original = sample_board();
        persistence.save(&original).await.unwrap();

        let mut restored = Board::default();
        let outcome = persistence.load(&mut restored).await.unwrap();

        assert!(matches!(outcome, LoadOutcome::Loaded(ref r) if r.loaded_cards == 3));
        for column in original.columns() {
            assert_eq!(restored.column(&column.id).unwrap().cards, column.cards);
        }
    }

    #[tokio::test]
    async fn test_load_accepts_records_missing_fields() {
        let data = r#"{"columns":{"todo":[{"heading":"Legacy"}],"done":[{"heading":"Ok","description":"d"}]}}"#;
        let persistence = Persistence::new(MemoryStorage::with_item(KEY, data), KEY);
        let mut board = Board::default();

        let outcome = persistence.load(&mut board).await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded(ref r) if r.loaded_cards == 2));
        assert_eq!(board.total_cards(), 2);
        assert_eq!(
            board.column(&"todo".into()).unwrap().cards[0].description,
            "Task details..."
        );
    }

    #[tokio::test]
    async fn test_load_without_saved_data() {
        let persistence = Persistence::new(MemoryStorage::new(), KEY);
        let mut board = Board::default();

        assert_eq!(persistence.load(&mut board).await.unwrap(), LoadOutcome::Empty);
        assert_eq!(board.total_cards(), 0);
    }

    #[tokio::test]
    async fn test_load_malformed_leaves_board_empty() {
        let persistence = Persistence::new(MemoryStorage::with_item(KEY, "{\"columns\": ["), KEY);
        let mut board = Board::default();

        assert_eq!(
            persistence.load(&mut board).await.unwrap(),
            LoadOutcome::Malformed
        );
        assert_eq!(board.total_cards(), 0);
    }

    #[tokio::test]
    async fn test_clear_removes_slot() {
        let persistence = Persistence::new(MemoryStorage::new(), KEY);
        persistence.save(&sample_board()).await.unwrap();
        persistence.clear().await.unwrap();

        assert_eq!(persistence.storage().get_item(KEY).await.unwrap(), None);
    }
}
