//! Text filter over the cards on a board.
//!
//! Filtering never touches the board: it only decides which cards are shown
//! and which are highlighted.

use crate::domain::{Board, CardRef};

/// Lower-cases and trims raw search input
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Display state of one card under the current filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardVisibility {
    pub card: CardRef,
    pub hidden: bool,
    pub highlighted: bool,
}

/// Outcome of filtering a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Whether the "clear search" affordance is shown
    pub clear_visible: bool,
    pub cards: Vec<CardVisibility>,
}

impl SearchResult {
    pub fn get(&self, card: &CardRef) -> Option<&CardVisibility> {
        self.cards.iter().find(|v| &v.card == card)
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &CardRef> {
        self.cards.iter().filter(|v| !v.hidden).map(|v| &v.card)
    }
}

/// Holds the raw text of the search input
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    input: String,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, raw: impl Into<String>) {
        self.input = raw.into();
    }

    /// Empties the input
    pub fn clear(&mut self) {
        self.input.clear();
    }

    pub fn is_active(&self) -> bool {
        !normalize_query(&self.input).is_empty()
    }

    pub fn apply(&self, board: &Board) -> SearchResult {
        let query = normalize_query(&self.input);

        if query.is_empty() {
            return SearchResult {
                clear_visible: false,
                cards: board
                    .iter_cards()
                    .map(|(card, _)| CardVisibility {
                        card,
                        hidden: false,
                        highlighted: false,
                    })
                    .collect(),
            };
        }

        SearchResult {
            clear_visible: true,
            cards: board
                .iter_cards()
                .map(|(card_ref, card)| {
                    let matched = card.matches(&query);
                    CardVisibility {
                        card: card_ref,
                        hidden: !matched,
                        highlighted: matched,
                    }
                })
                .collect(),
        }
    }
}
