// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::{Quote, QuoteId};

/// Owner of the canonical quote sequence.
///
/// `commit` is the only mutation entry point: implementations must persist
/// the whole sequence and replace their in-memory copy only after the write
/// succeeded, so a failed commit leaves `quotes()` unchanged.
pub trait QuoteRepository {
    fn quotes(&self) -> &[Quote];

    fn commit(&mut self, quotes: Vec<Quote>) -> Result<()>;

    fn get(&self, id: &QuoteId) -> Option<&Quote> {
        self.quotes().iter().find(|quote| &quote.id == id)
    }

    fn position(&self, id: &QuoteId) -> Option<usize> {
        self.quotes().iter().position(|quote| &quote.id == id)
    }
}
