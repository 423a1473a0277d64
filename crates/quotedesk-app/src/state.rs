// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use std::ops::Range;
use tracing::warn;

use crate::{
    BeginOutcome, EditController, EditableField, FieldChange, QuoteId, QuoteRepository,
    SaveOutcome,
};

pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZES[0];
pub const SAVED_STATUS: &str = "quote saved successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pager {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn page_of(&self, index: usize) -> usize {
        index / self.page_size
    }

    /// `"11-20 of 42 quotes"`, or `"0-0 of 0 quotes"` for an empty table.
    pub fn summary(&self, total: usize) -> String {
        let range = self.range(total);
        if range.is_empty() {
            return format!("0-0 of {total} quotes");
        }
        format!("{}-{} of {total} quotes", range.start + 1, range.end)
    }

    fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub pager: Pager,
    pub cursor: usize,
    pub expanded: BTreeSet<QuoteId>,
    pub sessions: EditController,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pager: Pager::default(),
            cursor: 0,
            expanded: BTreeSet::new(),
            sessions: EditController::new(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    BeginEdit(QuoteId),
    ChangeField(QuoteId, FieldChange),
    Save(QuoteId),
    Cancel(QuoteId),
    ToggleExpand(QuoteId),
    NextPage,
    PrevPage,
    GoToPage(usize),
    SetPageSize(usize),
    MoveCursor(isize),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    EditStarted(QuoteId),
    FieldChanged(QuoteId, EditableField),
    QuoteSaved(QuoteId),
    SaveFailed(QuoteId),
    EditCancelled(QuoteId),
    RowExpanded(QuoteId),
    RowCollapsed(QuoteId),
    PageChanged(usize),
    CursorMoved(usize),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pager: Pager::with_page_size(page_size),
            ..Self::default()
        }
    }

    pub fn selected_id<R: QuoteRepository + ?Sized>(&self, repo: &R) -> Option<QuoteId> {
        repo.quotes().get(self.cursor).map(|quote| quote.id.clone())
    }

    pub fn is_expanded(&self, id: &QuoteId) -> bool {
        self.expanded.contains(id)
    }

    pub fn dispatch<R: QuoteRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        command: AppCommand,
    ) -> Vec<AppEvent> {
        let total = repo.quotes().len();
        match command {
            AppCommand::BeginEdit(id) => match self.sessions.begin_edit(&*repo, &id) {
                Ok(BeginOutcome::Started) => vec![
                    AppEvent::EditStarted(id.clone()),
                    self.set_status(format!("editing {id}")),
                ],
                Ok(BeginOutcome::AlreadyEditing) => Vec::new(),
                Err(error) => vec![self.set_status(error.to_string())],
            },
            AppCommand::ChangeField(id, change) => match self.sessions.change_field(&id, change) {
                Ok(()) => vec![AppEvent::FieldChanged(id, change.field())],
                Err(error) => vec![self.set_status(error.to_string())],
            },
            AppCommand::Save(id) => match self.sessions.save(repo, &id) {
                Ok(SaveOutcome::Saved) => {
                    vec![AppEvent::QuoteSaved(id), self.set_status(SAVED_STATUS)]
                }
                Ok(SaveOutcome::NothingToSave) => Vec::new(),
                Err(error) => {
                    warn!(quote = %id, "save failed: {error:#}");
                    vec![
                        AppEvent::SaveFailed(id),
                        self.set_status(format!("{error:#}")),
                    ]
                }
            },
            AppCommand::Cancel(id) => {
                if self.sessions.cancel(&id) {
                    vec![
                        AppEvent::EditCancelled(id.clone()),
                        self.set_status(format!("edit of {id} canceled")),
                    ]
                } else {
                    Vec::new()
                }
            }
            AppCommand::ToggleExpand(id) => {
                if self.expanded.remove(&id) {
                    vec![AppEvent::RowCollapsed(id)]
                } else if repo.get(&id).is_some() {
                    self.expanded.insert(id.clone());
                    vec![AppEvent::RowExpanded(id)]
                } else {
                    Vec::new()
                }
            }
            AppCommand::NextPage => self.go_to_page(self.pager.page + 1, total),
            AppCommand::PrevPage => self.go_to_page(self.pager.page.saturating_sub(1), total),
            AppCommand::GoToPage(page) => self.go_to_page(page, total),
            AppCommand::SetPageSize(size) => {
                if !PAGE_SIZES.contains(&size) {
                    return vec![self.set_status(format!(
                        "page size {size} is not supported; choose one of 10, 20, 50, 100"
                    ))];
                }
                self.pager.page_size = size;
                self.pager.page = self.pager.page_of(self.cursor);
                self.pager.clamp(total);
                vec![
                    AppEvent::PageChanged(self.pager.page),
                    self.set_status(format!("{size} / page")),
                ]
            }
            AppCommand::MoveCursor(delta) => self.move_cursor(delta, total),
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn go_to_page(&mut self, page: usize, total: usize) -> Vec<AppEvent> {
        let last = self.pager.page_count(total) - 1;
        let next = page.min(last);
        if next == self.pager.page {
            return Vec::new();
        }
        self.pager.page = next;
        self.cursor = self.pager.range(total).start;
        vec![AppEvent::PageChanged(next)]
    }

    fn move_cursor(&mut self, delta: isize, total: usize) -> Vec<AppEvent> {
        if total == 0 {
            return Vec::new();
        }
        let last = total - 1;
        let next = self.cursor.saturating_add_signed(delta).min(last);
        if next == self.cursor {
            return Vec::new();
        }
        self.cursor = next;
        let mut events = vec![AppEvent::CursorMoved(next)];
        let page = self.pager.page_of(next);
        if page != self.pager.page {
            self.pager.page = page;
            events.push(AppEvent::PageChanged(page));
        }
        events
    }

    fn set_status(&mut self, message: impl Into<String>) -> AppEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, Pager, SAVED_STATUS};
    use crate::test_support::{COMMIT_FAILURE, FakeRepo};
    use crate::{EditableField, FieldChange, Money, QuoteId};
    use anyhow::Result;

    #[test]
    fn pager_summary_matches_table_footer() {
        let pager = Pager::default();
        assert_eq!(pager.summary(42), "1-10 of 42 quotes");
        assert_eq!(pager.summary(0), "0-0 of 0 quotes");
        assert_eq!(pager.page_count(42), 5);
        assert_eq!(pager.page_count(0), 1);
    }

    #[test]
    fn begin_change_save_round_trip_sets_status() {
        let mut repo = FakeRepo::with_count(3);
        let mut state = AppState::default();
        let id = QuoteId::new("Q1");

        let started = state.dispatch(&mut repo, AppCommand::BeginEdit(id.clone()));
        assert_eq!(started[0], AppEvent::EditStarted(id.clone()));

        let changed = state.dispatch(
            &mut repo,
            AppCommand::ChangeField(id.clone(), FieldChange::FirstCost(Money::from_cents(1_575))),
        );
        assert_eq!(
            changed,
            vec![AppEvent::FieldChanged(id.clone(), EditableField::FirstCost)]
        );

        let saved = state.dispatch(&mut repo, AppCommand::Save(id.clone()));
        assert_eq!(
            saved,
            vec![
                AppEvent::QuoteSaved(id.clone()),
                AppEvent::StatusUpdated(SAVED_STATUS.to_owned()),
            ]
        );
        assert_eq!(repo.commits.len(), 1);
        assert_eq!(repo.quotes[0].first_cost(), Money::from_cents(1_575));
        assert!(!state.sessions.is_editing(&id));
    }

    #[test]
    fn failed_save_reports_and_keeps_session() {
        let mut repo = FakeRepo::with_count(1);
        repo.fail_commit = true;
        let mut state = AppState::default();
        let id = QuoteId::new("Q1");

        state.dispatch(&mut repo, AppCommand::BeginEdit(id.clone()));
        let events = state.dispatch(&mut repo, AppCommand::Save(id.clone()));
        assert_eq!(events[0], AppEvent::SaveFailed(id.clone()));
        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.contains(COMMIT_FAILURE), "got {status}");
        assert!(state.sessions.is_editing(&id));
    }

    #[test]
    fn change_without_edit_reports_status_only() {
        let mut repo = FakeRepo::with_count(1);
        let mut state = AppState::default();
        let events = state.dispatch(
            &mut repo,
            AppCommand::ChangeField(QuoteId::new("Q1"), FieldChange::CommittedFlag(true)),
        );
        assert!(matches!(events.as_slice(), [AppEvent::StatusUpdated(_)]));
        assert!(repo.commits.is_empty());
    }

    #[test]
    fn cancel_without_session_is_silent() {
        let mut repo = FakeRepo::with_count(1);
        let mut state = AppState::default();
        let events = state.dispatch(&mut repo, AppCommand::Cancel(QuoteId::new("Q1")));
        assert!(events.is_empty());
        assert_eq!(state.status_line, None);
    }

    #[test]
    fn toggle_expand_flips_membership() {
        let mut repo = FakeRepo::with_count(2);
        let mut state = AppState::default();
        let id = QuoteId::new("Q2");

        let opened = state.dispatch(&mut repo, AppCommand::ToggleExpand(id.clone()));
        assert_eq!(opened, vec![AppEvent::RowExpanded(id.clone())]);
        assert!(state.is_expanded(&id));

        let closed = state.dispatch(&mut repo, AppCommand::ToggleExpand(id.clone()));
        assert_eq!(closed, vec![AppEvent::RowCollapsed(id.clone())]);
        assert!(!state.is_expanded(&id));

        let unknown = state.dispatch(&mut repo, AppCommand::ToggleExpand(QuoteId::new("Q9")));
        assert!(unknown.is_empty());
    }

    #[test]
    fn paging_clamps_and_moves_cursor() {
        let mut repo = FakeRepo::with_count(25);
        let mut state = AppState::default();

        assert_eq!(
            state.dispatch(&mut repo, AppCommand::NextPage),
            vec![AppEvent::PageChanged(1)]
        );
        assert_eq!(state.cursor, 10);
        assert_eq!(state.pager.summary(25), "11-20 of 25 quotes");

        state.dispatch(&mut repo, AppCommand::GoToPage(99));
        assert_eq!(state.pager.page(), 2);
        assert_eq!(state.pager.summary(25), "21-25 of 25 quotes");
        assert!(state.dispatch(&mut repo, AppCommand::NextPage).is_empty());

        state.dispatch(&mut repo, AppCommand::PrevPage);
        assert_eq!(state.pager.page(), 1);
    }

    #[test]
    fn cursor_crossing_page_boundary_turns_page() {
        let mut repo = FakeRepo::with_count(12);
        let mut state = AppState {
            cursor: 9,
            ..AppState::default()
        };

        let events = state.dispatch(&mut repo, AppCommand::MoveCursor(1));
        assert_eq!(
            events,
            vec![AppEvent::CursorMoved(10), AppEvent::PageChanged(1)]
        );
        assert_eq!(state.selected_id(&repo), Some(QuoteId::new("Q11")));

        state.dispatch(&mut repo, AppCommand::MoveCursor(50));
        assert_eq!(state.cursor, 11);
        state.dispatch(&mut repo, AppCommand::MoveCursor(-50));
        assert_eq!(state.cursor, 0);
        assert_eq!(state.pager.page(), 0);
    }

    #[test]
    fn page_size_change_keeps_cursor_visible() {
        let mut repo = FakeRepo::with_count(60);
        let mut state = AppState {
            cursor: 45,
            ..AppState::default()
        };
        state.dispatch(&mut repo, AppCommand::GoToPage(4));

        state.dispatch(&mut repo, AppCommand::MoveCursor(5));
        state.dispatch(&mut repo, AppCommand::SetPageSize(20));
        assert_eq!(state.pager.page_size(), 20);
        assert!(state.pager.range(60).contains(&state.cursor));

        let rejected = state.dispatch(&mut repo, AppCommand::SetPageSize(7));
        assert!(matches!(rejected.as_slice(), [AppEvent::StatusUpdated(_)]));
        assert_eq!(state.pager.page_size(), 20);
    }

    #[test]
    fn clear_status() {
        let mut repo = FakeRepo::with_count(0);
        let mut state = AppState::default();
        state.dispatch(&mut repo, AppCommand::SetStatus("hello".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("hello"));
        assert_eq!(
            state.dispatch(&mut repo, AppCommand::ClearStatus),
            vec![AppEvent::StatusCleared]
        );
        assert_eq!(state.status_line, None);
    }
}
