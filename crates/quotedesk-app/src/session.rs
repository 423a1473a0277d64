// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use thiserror::Error;
use time::Date;
use tracing::{debug, info};

use crate::{EditableField, FieldChange, Money, Quote, QuoteId, QuoteRepository};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("quote {0} not found -- reload the quote list and retry")]
    UnknownQuote(QuoteId),
    #[error("quote {0} is not being edited -- begin an edit before changing fields")]
    NotEditing(QuoteId),
}

/// Proposed values for the editable fields. `None` means "no change
/// proposed"; merge decisions are made on presence, never on the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBuffer {
    pub quote_date: Option<Date>,
    pub first_cost: Option<Money>,
    pub retail_price: Option<Money>,
    pub committed_flag: Option<bool>,
}

impl FieldBuffer {
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            quote_date: Some(quote.quote_date),
            first_cost: Some(quote.first_cost()),
            retail_price: Some(quote.retail_price()),
            committed_flag: Some(quote.committed_flag),
        }
    }

    pub fn set(&mut self, change: FieldChange) {
        match change {
            FieldChange::QuoteDate(date) => self.quote_date = Some(date),
            FieldChange::FirstCost(cost) => self.first_cost = Some(cost),
            FieldChange::RetailPrice(price) => self.retail_price = Some(price),
            FieldChange::CommittedFlag(flag) => self.committed_flag = Some(flag),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quote_date.is_none()
            && self.first_cost.is_none()
            && self.retail_price.is_none()
            && self.committed_flag.is_none()
    }

    /// Returns `quote` with every present buffer value applied.
    pub fn apply_to(&self, quote: &Quote) -> Quote {
        let mut updated = quote.clone();
        if let Some(date) = self.quote_date {
            updated.quote_date = date;
        }
        if let Some(cost) = self.first_cost {
            updated.costing.first_cost = cost;
        }
        if let Some(price) = self.retail_price {
            updated.club_costing.retail_price = price;
        }
        if let Some(flag) = self.committed_flag {
            updated.committed_flag = flag;
        }
        updated
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    buffer: FieldBuffer,
    dirty: bool,
}

impl EditSession {
    fn start(quote: &Quote) -> Self {
        Self {
            buffer: FieldBuffer::from_quote(quote),
            dirty: false,
        }
    }

    pub fn buffer(&self) -> &FieldBuffer {
        &self.buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    Started,
    AlreadyEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    NothingToSave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Normal,
    Editing,
    Unsaved,
}

/// What the presentation layer shows for one row: buffered values while
/// editing, committed values otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDisplay {
    pub editing: bool,
    pub dirty: bool,
    pub quote_date: Date,
    pub first_cost: Money,
    pub retail_price: Money,
    pub committed_flag: bool,
}

/// Per-record edit sessions, keyed by quote id and kept apart from the
/// canonical sequence. Any number of records may be editing at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditController {
    sessions: BTreeMap<QuoteId, EditSession>,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, id: &QuoteId) -> Option<&EditSession> {
        self.sessions.get(id)
    }

    pub fn is_editing(&self, id: &QuoteId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn is_dirty(&self, id: &QuoteId) -> bool {
        self.sessions.get(id).is_some_and(EditSession::is_dirty)
    }

    pub fn editing_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn begin_edit<R: QuoteRepository + ?Sized>(
        &mut self,
        repo: &R,
        id: &QuoteId,
    ) -> Result<BeginOutcome, SessionError> {
        if self.sessions.contains_key(id) {
            return Ok(BeginOutcome::AlreadyEditing);
        }
        let quote = repo
            .get(id)
            .ok_or_else(|| SessionError::UnknownQuote(id.clone()))?;
        self.sessions.insert(id.clone(), EditSession::start(quote));
        debug!(quote = %id, "edit session started");
        Ok(BeginOutcome::Started)
    }

    pub fn change_field(&mut self, id: &QuoteId, change: FieldChange) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotEditing(id.clone()))?;
        session.buffer.set(change);
        session.dirty = true;
        debug!(quote = %id, field = change.field().as_str(), "field buffered");
        Ok(())
    }

    /// Merges the buffer into the canonical record and commits the full
    /// sequence. The session is dropped only once the commit succeeded.
    pub fn save<R: QuoteRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        id: &QuoteId,
    ) -> Result<SaveOutcome> {
        let Some(session) = self.sessions.get(id) else {
            return Ok(SaveOutcome::NothingToSave);
        };
        if session.buffer.is_empty() {
            self.sessions.remove(id);
            return Ok(SaveOutcome::NothingToSave);
        }

        let index = repo
            .position(id)
            .ok_or_else(|| SessionError::UnknownQuote(id.clone()))?;
        let mut updated = repo.quotes().to_vec();
        updated[index] = session.buffer.apply_to(&updated[index]);

        repo.commit(updated)
            .with_context(|| format!("save quote {id}; your edits are kept, retry the save"))?;
        self.sessions.remove(id);
        info!(quote = %id, "quote saved");
        Ok(SaveOutcome::Saved)
    }

    /// Drops the session without touching the canonical record. Returns
    /// whether a session existed.
    pub fn cancel(&mut self, id: &QuoteId) -> bool {
        let discarded = self.sessions.remove(id).is_some();
        if discarded {
            debug!(quote = %id, "edit session discarded");
        }
        discarded
    }

    pub fn display(&self, quote: &Quote) -> RowDisplay {
        match self.sessions.get(&quote.id) {
            Some(session) => {
                let buffer = &session.buffer;
                RowDisplay {
                    editing: true,
                    dirty: session.dirty,
                    quote_date: buffer.quote_date.unwrap_or(quote.quote_date),
                    first_cost: buffer.first_cost.unwrap_or(quote.first_cost()),
                    retail_price: buffer.retail_price.unwrap_or(quote.retail_price()),
                    committed_flag: buffer.committed_flag.unwrap_or(quote.committed_flag),
                }
            }
            None => RowDisplay {
                editing: false,
                dirty: false,
                quote_date: quote.quote_date,
                first_cost: quote.first_cost(),
                retail_price: quote.retail_price(),
                committed_flag: quote.committed_flag,
            },
        }
    }

    pub fn row_style(&self, id: &QuoteId) -> RowStyle {
        match self.sessions.get(id) {
            Some(session) if session.dirty => RowStyle::Unsaved,
            Some(_) => RowStyle::Editing,
            None => RowStyle::Normal,
        }
    }

    /// Value of `field` as currently displayed for `quote`.
    pub fn display_field(&self, quote: &Quote, field: EditableField) -> String {
        let row = self.display(quote);
        match field {
            EditableField::QuoteDate => crate::iso_date::format(row.quote_date),
            EditableField::FirstCost => row.first_cost.to_string(),
            EditableField::RetailPrice => row.retail_price.to_string(),
            EditableField::CommittedFlag => crate::yes_no(row.committed_flag).to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BeginOutcome, EditController, FieldBuffer, RowStyle, SaveOutcome, SessionError};
    use crate::test_support::{COMMIT_FAILURE, FakeRepo, date, quote};
    use crate::{EditableField, FieldChange, Money, QuoteId};
    use anyhow::Result;
    use time::Month;

    fn repo() -> FakeRepo {
        FakeRepo::new(vec![quote("Q1", 1_000), quote("Q2", 2_000)])
    }

    #[test]
    fn begin_edit_seeds_buffer_with_committed_values() -> Result<()> {
        let repo = repo();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");

        assert_eq!(controller.begin_edit(&repo, &id)?, BeginOutcome::Started);
        let session = controller.session(&id).expect("session open");
        assert_eq!(session.buffer(), &FieldBuffer::from_quote(&repo.quotes[0]));
        assert!(!session.is_dirty());
        assert_eq!(controller.row_style(&id), RowStyle::Editing);
        Ok(())
    }

    #[test]
    fn begin_edit_twice_keeps_existing_buffer() -> Result<()> {
        let repo = repo();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");

        controller.begin_edit(&repo, &id)?;
        controller.change_field(&id, FieldChange::FirstCost(Money::from_cents(5)))?;
        assert_eq!(
            controller.begin_edit(&repo, &id)?,
            BeginOutcome::AlreadyEditing
        );
        assert_eq!(
            controller.display(&repo.quotes[0]).first_cost,
            Money::from_cents(5)
        );
        Ok(())
    }

    #[test]
    fn begin_edit_unknown_quote_fails() {
        let repo = repo();
        let mut controller = EditController::new();
        let error = controller
            .begin_edit(&repo, &QuoteId::new("nope"))
            .expect_err("unknown id");
        assert_eq!(error, SessionError::UnknownQuote(QuoteId::new("nope")));
    }

    #[test]
    fn change_field_requires_open_session() {
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");
        let error = controller
            .change_field(&id, FieldChange::CommittedFlag(true))
            .expect_err("not editing");
        assert_eq!(error, SessionError::NotEditing(id.clone()));
        assert!(!controller.is_editing(&id));
        assert!(!controller.is_dirty(&id));
    }

    #[test]
    fn cancel_leaves_record_untouched_and_writes_nothing() -> Result<()> {
        let mut repo = repo();
        let before = repo.quotes.clone();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");

        controller.begin_edit(&repo, &id)?;
        controller.change_field(&id, FieldChange::RetailPrice(Money::from_cents(1)))?;
        assert!(controller.cancel(&id));

        assert_eq!(repo.quotes, before);
        assert!(repo.commits.is_empty());
        assert!(!controller.is_editing(&id));
        assert!(!controller.is_dirty(&id));
        assert!(!controller.cancel(&id));
        assert_eq!(controller.save(&mut repo, &id)?, SaveOutcome::NothingToSave);
        assert!(repo.commits.is_empty());
        Ok(())
    }

    #[test]
    fn save_merges_buffer_and_commits_full_sequence() -> Result<()> {
        let mut repo = repo();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");

        controller.begin_edit(&repo, &id)?;
        controller.change_field(&id, FieldChange::FirstCost(Money::from_cents(4_250)))?;
        assert_eq!(controller.row_style(&id), RowStyle::Unsaved);
        assert_eq!(controller.save(&mut repo, &id)?, SaveOutcome::Saved);

        assert_eq!(repo.commits.len(), 1);
        assert_eq!(repo.commits[0].len(), 2);
        let saved = &repo.quotes[0];
        assert_eq!(saved.first_cost(), Money::from_cents(4_250));
        assert_eq!(saved.retail_price(), Money::from_cents(2_499));
        assert_eq!(saved.quote_date, date(2024, Month::March, 1));
        assert_eq!(repo.quotes[1], quote("Q2", 2_000));
        assert!(!controller.is_editing(&id));
        assert!(!controller.is_dirty(&id));
        Ok(())
    }

    #[test]
    fn save_with_only_flag_changed_keeps_other_fields() -> Result<()> {
        let mut repo = repo();
        let before = repo.quotes[1].clone();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q2");

        controller.begin_edit(&repo, &id)?;
        controller.change_field(&id, FieldChange::CommittedFlag(true))?;
        controller.save(&mut repo, &id)?;

        let saved = &repo.quotes[1];
        assert!(saved.committed_flag);
        assert_eq!(saved.quote_date, before.quote_date);
        assert_eq!(saved.first_cost(), before.first_cost());
        assert_eq!(saved.retail_price(), before.retail_price());
        Ok(())
    }

    #[test]
    fn zero_amount_is_saved_not_treated_as_missing() -> Result<()> {
        let mut repo = repo();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");

        controller.begin_edit(&repo, &id)?;
        controller.change_field(&id, FieldChange::FirstCost(Money::ZERO))?;
        controller.change_field(&id, FieldChange::RetailPrice(Money::ZERO))?;
        controller.save(&mut repo, &id)?;

        assert_eq!(repo.quotes[0].first_cost(), Money::ZERO);
        assert_eq!(repo.quotes[0].retail_price(), Money::ZERO);
        Ok(())
    }

    #[test]
    fn failed_commit_keeps_session_and_canonical_state() -> Result<()> {
        let mut repo = repo();
        repo.fail_commit = true;
        let before = repo.quotes.clone();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");

        controller.begin_edit(&repo, &id)?;
        controller.change_field(&id, FieldChange::FirstCost(Money::from_cents(1)))?;
        let error = controller
            .save(&mut repo, &id)
            .expect_err("commit should fail");
        assert!(format!("{error:#}").contains(COMMIT_FAILURE));

        assert_eq!(repo.quotes, before);
        assert!(controller.is_editing(&id));
        assert!(controller.is_dirty(&id));

        repo.fail_commit = false;
        assert_eq!(controller.save(&mut repo, &id)?, SaveOutcome::Saved);
        assert_eq!(repo.quotes[0].first_cost(), Money::from_cents(1));
        Ok(())
    }

    #[test]
    fn sessions_on_different_records_are_independent() -> Result<()> {
        let mut repo = repo();
        let mut controller = EditController::new();
        let first = QuoteId::new("Q1");
        let second = QuoteId::new("Q2");

        controller.begin_edit(&repo, &first)?;
        controller.begin_edit(&repo, &second)?;
        controller.change_field(&first, FieldChange::RetailPrice(Money::from_cents(100)))?;

        assert!(controller.is_dirty(&first));
        assert!(!controller.is_dirty(&second));
        assert_eq!(
            controller.session(&second).map(|session| session.buffer().clone()),
            Some(FieldBuffer::from_quote(&repo.quotes[1]))
        );

        controller.save(&mut repo, &first)?;
        assert!(controller.is_editing(&second));
        assert_eq!(controller.editing_count(), 1);
        Ok(())
    }

    #[test]
    fn display_prefers_buffer_while_editing() -> Result<()> {
        let repo = repo();
        let mut controller = EditController::new();
        let id = QuoteId::new("Q1");
        let quote = &repo.quotes[0];

        assert_eq!(
            controller.display_field(quote, EditableField::FirstCost),
            "$10.00"
        );
        controller.begin_edit(&repo, &id)?;
        controller.change_field(&id, FieldChange::QuoteDate(date(2025, Month::June, 2)))?;
        controller.change_field(&id, FieldChange::CommittedFlag(true))?;

        let row = controller.display(quote);
        assert!(row.editing);
        assert!(row.dirty);
        assert_eq!(row.quote_date, date(2025, Month::June, 2));
        assert_eq!(
            controller.display_field(quote, EditableField::QuoteDate),
            "2025-06-02"
        );
        assert_eq!(
            controller.display_field(quote, EditableField::CommittedFlag),
            "Yes"
        );
        assert!(!quote.committed_flag);
        Ok(())
    }

    #[test]
    fn empty_buffer_save_is_a_no_op() {
        let buffer = FieldBuffer::default();
        assert!(buffer.is_empty());
        let original = quote("Q9", 700);
        assert_eq!(buffer.apply_to(&original), original);
    }
}
