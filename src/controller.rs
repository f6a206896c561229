//! The interactive board: every user flow enters here.
//!
//! Each structural mutation (create, edit, delete, move) is applied to the
//! owned [`Board`] and then saved in full before the call returns.

use crate::{
    domain::{Board, BoardConfig, Card, CardRef, ColumnId},
    drag::{DragEngine, DropPoint},
    error::{BoardError, Result},
    modal::{ClickTarget, DismissReason, FormError, KeyAction, KeyEvent, KeyListeners, Modal, ModalKind},
    persistence::{LoadOutcome, Persistence},
    search::{SearchFilter, SearchResult},
    storage::Storage,
    view::{BoardView, Focus, ViewSource},
};
use tracing::{debug, info};

/// Result of pressing a modal's primary action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(CardRef),
    Updated(CardRef),
    Deleted(Card),
    /// The form was not accepted; the modal stays open and nothing is saved
    Rejected(FormError),
}

/// Result of a key press while a modal may be open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Submitted(SubmitOutcome),
    Dismissed,
    Ignored,
}

pub struct TaskBoard<S> {
    board: Board,
    persistence: Persistence<S>,
    listeners: KeyListeners,
    modal: Option<Modal>,
    drag: DragEngine,
    search: SearchFilter,
    focus: Focus,
    load_outcome: LoadOutcome,
}

impl<S: Storage> TaskBoard<S> {
    /// Builds the board from `config` and rehydrates it from `storage`
    pub async fn start(config: BoardConfig, storage: S) -> Result<Self> {
        config.validate()?;

        let persistence = Persistence::new(storage, config.storage_key.clone());
        let mut board = Board::new(config);
        let load_outcome = persistence.load(&mut board).await?;
        info!(
            board = %board.config.name,
            cards = board.total_cards(),
            "task board started"
        );

        Ok(Self {
            board,
            persistence,
            listeners: KeyListeners::new(),
            modal: None,
            drag: DragEngine::new(),
            search: SearchFilter::new(),
            focus: Focus::None,
            load_outcome,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Escape-key listeners currently attached by open modals
    pub fn active_key_listeners(&self) -> usize {
        self.listeners.active()
    }

    pub fn card(&self, card: &CardRef) -> Result<&Card> {
        self.board.card(card)
    }

    async fn save(&self) -> Result<()> {
        self.persistence.save(&self.board).await
    }

    // Modal flows

    /// A live drag and an open modal both hold positional card refs
    fn ensure_not_dragging(&self) -> Result<()> {
        if self.drag.is_dragging() {
            return Err(BoardError::DragInProgress);
        }
        Ok(())
    }

    fn show(&mut self, modal: Modal) {
        debug!(modal = modal.title(), "modal opened");
        self.modal = Some(modal);
        self.focus = Focus::HeadingInput;
    }

    /// Opens the create form for a column
    pub fn open_create(&mut self, column: impl Into<ColumnId>) -> Result<()> {
        self.ensure_not_dragging()?;
        let column = column.into();
        if self.board.column(&column).is_none() {
            return Err(BoardError::ColumnNotFound(column.to_string()));
        }
        let modal = Modal::create(column, &self.listeners);
        self.show(modal);
        Ok(())
    }

    /// Opens the edit form pre-filled from the card
    pub fn open_edit(&mut self, card: &CardRef) -> Result<()> {
        self.ensure_not_dragging()?;
        let modal = Modal::edit(card.clone(), self.board.card(card)?, &self.listeners);
        self.show(modal);
        Ok(())
    }

    /// Opens the delete confirmation for the card
    pub fn open_delete(&mut self, card: &CardRef) -> Result<()> {
        self.ensure_not_dragging()?;
        let modal = Modal::delete(card.clone(), self.board.card(card)?, &self.listeners);
        self.show(modal);
        Ok(())
    }

    fn modal_mut(&mut self) -> Result<&mut Modal> {
        self.modal.as_mut().ok_or(BoardError::NoActiveModal)
    }

    pub fn set_heading_input(&mut self, text: impl Into<String>) -> Result<()> {
        self.modal_mut()?.form_mut().heading = text.into();
        Ok(())
    }

    pub fn set_description_input(&mut self, text: impl Into<String>) -> Result<()> {
        self.modal_mut()?.form_mut().description = text.into();
        Ok(())
    }

    /// Closes the open modal, releasing its escape listener
    fn close_modal(&mut self) {
        if let Some(modal) = self.modal.take() {
            debug!(modal = modal.title(), "modal closed");
        }
        self.focus = Focus::None;
    }

    fn dismiss(&mut self, reason: DismissReason) -> Result<()> {
        if self.modal.is_none() {
            return Err(BoardError::NoActiveModal);
        }
        debug!(?reason, "modal dismissed");
        self.close_modal();
        Ok(())
    }

    /// Applies the open modal's primary action
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let modal = self.modal.as_ref().ok_or(BoardError::NoActiveModal)?;
        let kind = modal.kind().clone();
        let form = modal.form().clone();

        let outcome = match kind {
            ModalKind::Create { column } => {
                let card = match form.to_new_card(&self.board.config.default_description) {
                    Ok(card) => card,
                    Err(err) => {
                        debug!(error = %err, "create form rejected");
                        return Ok(SubmitOutcome::Rejected(err));
                    }
                };
                SubmitOutcome::Created(self.board.append_card(&column, card)?)
            }
            ModalKind::Edit { card } => {
                *self.board.card_mut(&card)? = form.to_edited_card();
                SubmitOutcome::Updated(card)
            }
            ModalKind::Delete { card, .. } => SubmitOutcome::Deleted(self.board.remove_card(&card)?),
        };

        self.close_modal();
        self.save().await?;
        Ok(outcome)
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.dismiss(DismissReason::Cancel)
    }

    /// A click in the modal layer; only the backdrop closes the modal.
    ///
    /// Returns whether the modal was closed.
    pub fn click_overlay(&mut self, target: ClickTarget) -> Result<bool> {
        match target {
            ClickTarget::Overlay => self.dismiss(DismissReason::OverlayClick).map(|_| true),
            ClickTarget::Dialog if self.modal.is_some() => Ok(false),
            ClickTarget::Dialog => Err(BoardError::NoActiveModal),
        }
    }

    pub async fn handle_key(&mut self, event: KeyEvent) -> Result<KeyOutcome> {
        let Some(modal) = self.modal.as_ref() else {
            return Ok(KeyOutcome::Ignored);
        };

        match modal.key_action(event) {
            KeyAction::Submit => Ok(KeyOutcome::Submitted(self.submit().await?)),
            KeyAction::Dismiss => {
                self.dismiss(DismissReason::Escape)?;
                Ok(KeyOutcome::Dismissed)
            }
            KeyAction::Ignore => Ok(KeyOutcome::Ignored),
        }
    }

    // Drag and drop

    /// Starts dragging a card. Not available while a modal is open.
    pub fn begin_drag(&mut self, card: &CardRef) -> Result<()> {
        if self.modal.is_some() {
            return Err(BoardError::ModalOpen);
        }
        self.board.card(card)?;
        debug!(card = %card, "drag started");
        self.drag.begin(card.clone());
        Ok(())
    }

    pub fn drag_enter(&mut self, column: impl Into<ColumnId>) -> Result<()> {
        let column = column.into();
        if self.board.column(&column).is_none() {
            return Err(BoardError::ColumnNotFound(column.to_string()));
        }
        self.drag.enter(column);
        Ok(())
    }

    pub fn drag_leave(&mut self, column: impl Into<ColumnId>) {
        self.drag.leave(&column.into());
    }

    /// Drops the dragged card and returns where it landed.
    ///
    /// `None` means no drag was in progress and nothing changed.
    pub async fn drop_on(&mut self, point: DropPoint) -> Result<Option<CardRef>> {
        if self.board.column(&point.column).is_none() {
            return Err(BoardError::ColumnNotFound(point.column.to_string()));
        }

        let Some(mv) = self.drag.drop(&point) else {
            return Ok(None);
        };

        let landed = self.board.move_card(&mv.subject, &mv.placement)?;
        debug!(from = %mv.subject, to = %landed, "card moved");
        self.save().await?;
        Ok(Some(landed))
    }

    /// Ends the gesture; returns `true` when it ended without a drop
    pub fn end_drag(&mut self) -> bool {
        let aborted = self.drag.end();
        if aborted {
            debug!("drag aborted");
        }
        aborted
    }

    // Search

    pub fn set_search_query(&mut self, raw: impl Into<String>) {
        self.search.set_input(raw);
    }

    pub fn search_input(&self) -> &str {
        self.search.input()
    }

    pub fn search_result(&self) -> SearchResult {
        self.search.apply(&self.board)
    }

    /// Empties the search and returns focus to the search field
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.focus = Focus::SearchInput;
    }

    pub fn view(&self) -> BoardView {
        let search = self.search_result();
        BoardView::build(ViewSource {
            board: &self.board,
            search: &search,
            search_input: self.search.input(),
            drag: &self.drag,
            modal: self.modal.as_ref(),
            focus: self.focus,
        })
    }
}
