//! Modal dialogs for the create, edit and delete flows.

use crate::domain::{Card, CardRef, ColumnId};
use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Keys the dialogs react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
    Other,
}

/// A key press with its modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn with_ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }

    pub fn escape() -> Self {
        Self::plain(Key::Escape)
    }

    /// The submit accelerator
    pub fn ctrl_enter() -> Self {
        Self::with_ctrl(Key::Enter)
    }
}

/// What a key press means for the open modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Dismiss,
    Ignore,
}

/// Where a click inside the modal layer landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop around the dialog
    Overlay,
    /// Anywhere inside the dialog itself
    Dialog,
}

/// Why a modal closed without its primary action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Cancel,
    OverlayClick,
    Escape,
}

/// Counts document-level key listeners currently attached.
///
/// Each open modal holds one [`EscapeListener`]; the count drops back when
/// the modal is closed by any path.
#[derive(Debug, Clone, Default)]
pub struct KeyListeners {
    active: Arc<AtomicUsize>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> EscapeListener {
        self.active.fetch_add(1, Ordering::SeqCst);
        EscapeListener {
            active: Arc::clone(&self.active),
        }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Registration of an escape-key listener, removed on drop
#[derive(Debug)]
pub struct EscapeListener {
    active: Arc<AtomicUsize>,
}

impl Drop for EscapeListener {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Reasons a card form refuses to submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// The heading is required and was blank after trimming
    EmptyHeading,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHeading => write!(f, "Title is required"),
        }
    }
}

/// Text currently typed into the card form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub heading: String,
    pub description: String,
}

impl CardForm {
    pub fn prefilled(card: &Card) -> Self {
        Self {
            heading: card.heading.clone(),
            description: card.description.clone(),
        }
    }

    /// Builds a new card, trimming both fields.
    ///
    /// A blank description falls back to `default_description`.
    pub fn to_new_card(&self, default_description: &str) -> Result<Card, FormError> {
        let heading = self.heading.trim();
        if heading.is_empty() {
            return Err(FormError::EmptyHeading);
        }

        let description = match self.description.trim() {
            "" => default_description,
            desc => desc,
        };
        Ok(Card::new(heading, description))
    }

    /// Edits keep both fields exactly as typed
    pub fn to_edited_card(&self) -> Card {
        Card::new(self.heading.clone(), self.description.clone())
    }
}

/// Which flow a modal belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKind {
    Create { column: ColumnId },
    Edit { card: CardRef },
    Delete { card: CardRef, preview: String },
}

/// An open dialog over the board
#[derive(Debug)]
pub struct Modal {
    kind: ModalKind,
    form: CardForm,
    _escape: EscapeListener,
}

impl Modal {
    pub fn create(column: ColumnId, listeners: &KeyListeners) -> Self {
        Self {
            kind: ModalKind::Create { column },
            form: CardForm::default(),
            _escape: listeners.acquire(),
        }
    }

    pub fn edit(card_ref: CardRef, card: &Card, listeners: &KeyListeners) -> Self {
        Self {
            kind: ModalKind::Edit { card: card_ref },
            form: CardForm::prefilled(card),
            _escape: listeners.acquire(),
        }
    }

    pub fn delete(card_ref: CardRef, card: &Card, listeners: &KeyListeners) -> Self {
        Self {
            kind: ModalKind::Delete {
                card: card_ref,
                preview: card.heading.clone(),
            },
            form: CardForm::default(),
            _escape: listeners.acquire(),
        }
    }

    pub fn kind(&self) -> &ModalKind {
        &self.kind
    }

    pub fn form(&self) -> &CardForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CardForm {
        &mut self.form
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ModalKind::Create { .. } => "Create New Card",
            ModalKind::Edit { .. } => "Edit Card",
            ModalKind::Delete { .. } => "Delete Card",
        }
    }

    pub fn primary_label(&self) -> &'static str {
        match self.kind {
            ModalKind::Create { .. } => "Create Card",
            ModalKind::Edit { .. } => "Save",
            ModalKind::Delete { .. } => "Delete",
        }
    }

    /// Whether the dialog has a text form (and so the submit accelerator)
    pub fn has_form(&self) -> bool {
        !matches!(self.kind, ModalKind::Delete { .. })
    }

    pub fn key_action(&self, event: KeyEvent) -> KeyAction {
        match event.key {
            Key::Escape => KeyAction::Dismiss,
            Key::Enter if event.ctrl && self.has_form() => KeyAction::Submit,
            _ => KeyAction::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_trims_and_defaults_description() {
        let form = CardForm {
            heading: "  Write report ".to_string(),
            description: "   ".to_string(),
        };
        let card = form.to_new_card("No description").unwrap();

        assert_eq!(card.heading, "Write report");
        assert_eq!(card.description, "No description");
    }

    #[test]
    fn test_new_card_requires_heading() {
        let form = CardForm {
            heading: " \t ".to_string(),
            description: "details".to_string(),
        };
        assert_eq!(form.to_new_card("x"), Err(FormError::EmptyHeading));
    }

    #[test]
    fn test_edited_card_is_verbatim() {
        let form = CardForm {
            heading: "".to_string(),
            description: "  padded  ".to_string(),
        };
        let card = form.to_edited_card();

        assert_eq!(card.heading, "");
        assert_eq!(card.description, "  padded  ");
    }

    #[test]
    fn test_listener_released_on_drop() {
        let listeners = KeyListeners::new();
        let modal = Modal::create("todo".into(), &listeners);
        assert_eq!(listeners.active(), 1);

        drop(modal);
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn test_key_actions() {
        let listeners = KeyListeners::new();
        let card = Card::new("Call Bob", "");
        let edit = Modal::edit(CardRef::new("todo", 0), &card, &listeners);
        let delete = Modal::delete(CardRef::new("todo", 0), &card, &listeners);

        assert_eq!(edit.key_action(KeyEvent::ctrl_enter()), KeyAction::Submit);
        assert_eq!(edit.key_action(KeyEvent::plain(Key::Enter)), KeyAction::Ignore);
        assert_eq!(edit.key_action(KeyEvent::escape()), KeyAction::Dismiss);
        assert_eq!(delete.key_action(KeyEvent::ctrl_enter()), KeyAction::Ignore);
        assert_eq!(delete.key_action(KeyEvent::escape()), KeyAction::Dismiss);
    }

    #[test]
    fn test_edit_is_prefilled_and_delete_previews_heading() {
        let listeners = KeyListeners::new();
        let card = Card::new("Call Bob", "schedule meeting");

        let edit = Modal::edit(CardRef::new("todo", 0), &card, &listeners);
        assert_eq!(edit.form(), &CardForm::prefilled(&card));
        assert_eq!(edit.title(), "Edit Card");

        let delete = Modal::delete(CardRef::new("todo", 0), &card, &listeners);
        assert!(matches!(delete.kind(), ModalKind::Delete { preview, .. } if preview == "Call Bob"));
        assert_eq!(delete.primary_label(), "Delete");
    }
}
