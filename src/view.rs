//! Render-ready snapshot of the board with the class markers the markup uses.

use crate::{
    domain::{Board, CardRef, ColumnId},
    drag::DragEngine,
    modal::{Modal, ModalKind},
    search::SearchResult,
};
use std::{collections::HashMap, fmt};

pub mod class {
    pub const CARD: &str = "card";
    pub const CARD_HEADING: &str = "card-heading";
    pub const CARD_DESC: &str = "card-desc";
    pub const DELETE: &str = "delete";
    pub const CARD_LIST: &str = "card-list";
    pub const HIDDEN: &str = "hidden";
    pub const HIGHLIGHTED: &str = "highlighted";
    pub const DRAGGING: &str = "dragging";
    pub const DRAG_OVER: &str = "drag-over";
    /// Applied to the clear-search control while a query is active
    pub const VISIBLE: &str = "visible";
}

/// Element holding keyboard focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    None,
    /// Heading field of the open card form
    HeadingInput,
    SearchInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub card: CardRef,
    pub heading: String,
    pub description: String,
    pub classes: Vec<&'static str>,
}

impl CardView {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    pub list_classes: Vec<&'static str>,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: &'static str,
    pub primary_label: &'static str,
    pub heading: String,
    pub description: String,
    /// Heading of the card a delete dialog asks about
    pub preview: Option<String>,
}

impl From<&Modal> for ModalView {
    fn from(modal: &Modal) -> Self {
        let preview = match modal.kind() {
            ModalKind::Delete { preview, .. } => Some(preview.clone()),
            _ => None,
        };
        Self {
            title: modal.title(),
            primary_label: modal.primary_label(),
            heading: modal.form().heading.clone(),
            description: modal.form().description.clone(),
            preview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub name: String,
    pub columns: Vec<ColumnView>,
    pub search_input: String,
    pub clear_search_classes: Vec<&'static str>,
    pub modal: Option<ModalView>,
    pub focus: Focus,
}

/// Inputs a view is computed from
pub struct ViewSource<'a> {
    pub board: &'a Board,
    pub search: &'a SearchResult,
    pub search_input: &'a str,
    pub drag: &'a DragEngine,
    pub modal: Option<&'a Modal>,
    pub focus: Focus,
}

impl BoardView {
    pub fn build(source: ViewSource<'_>) -> Self {
        let dragged = source.drag.subject();
        let visibility: HashMap<_, _> = source
            .search
            .cards
            .iter()
            .map(|vis| (&vis.card, vis))
            .collect();

        let columns = source
            .board
            .columns()
            .iter()
            .map(|col| {
                let mut list_classes = vec![class::CARD_LIST];
                if source.drag.is_drag_over(&col.id) {
                    list_classes.push(class::DRAG_OVER);
                }

                let cards = col
                    .cards
                    .iter()
                    .enumerate()
                    .map(|(index, card)| {
                        let card_ref = CardRef::new(col.id.clone(), index);
                        let mut classes = vec![class::CARD];
                        if let Some(vis) = visibility.get(&card_ref) {
                            if vis.hidden {
                                classes.push(class::HIDDEN);
                            }
                            if vis.highlighted {
                                classes.push(class::HIGHLIGHTED);
                            }
                        }
                        if dragged == Some(&card_ref) {
                            classes.push(class::DRAGGING);
                        }
                        CardView {
                            card: card_ref,
                            heading: card.heading.clone(),
                            description: card.description.clone(),
                            classes,
                        }
                    })
                    .collect();

                ColumnView {
                    id: col.id.clone(),
                    title: col.title.clone(),
                    list_classes,
                    cards,
                }
            })
            .collect();

        let clear_search_classes = if source.search.clear_visible {
            vec![class::VISIBLE]
        } else {
            Vec::new()
        };

        Self {
            name: source.board.config.name.clone(),
            columns,
            search_input: source.search_input.to_string(),
            clear_search_classes,
            modal: source.modal.map(ModalView::from),
            focus: source.focus,
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn card(&self, card: &CardRef) -> Option<&CardView> {
        self.column(&card.column)?.cards.get(card.index)
    }

    pub fn clear_search_visible(&self) -> bool {
        self.clear_search_classes.contains(&class::VISIBLE)
    }
}

/// Plain-text rendering, one column after another; hidden cards are omitted
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        for col in &self.columns {
            writeln!(f, "## {} ({})", col.title, col.cards.len())?;
            for card in col.cards.iter().filter(|c| !c.has_class(class::HIDDEN)) {
                let marker = if card.has_class(class::HIGHLIGHTED) { "*" } else { "-" };
                writeln!(f, "{} {}: {}", marker, card.heading, card.description)?;
            }
        }
        Ok(())
    }
}
