// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! In-crate test doubles. `quotedesk-testkit` depends on this crate, so unit
//! tests here cannot use its `MemoryRepository`.

use anyhow::{Result, bail};
use time::{Date, Month};

use crate::{ClubCosting, Costing, FobPort, Money, Quote, QuoteId, QuoteRepository, Supplier};

pub(crate) const COMMIT_FAILURE: &str = "storage is read-only";

#[derive(Debug, Default)]
pub(crate) struct FakeRepo {
    pub(crate) quotes: Vec<Quote>,
    pub(crate) commits: Vec<Vec<Quote>>,
    pub(crate) fail_commit: bool,
}

impl FakeRepo {
    pub(crate) fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            ..Self::default()
        }
    }

    /// `count` quotes with ids `Q1..=Q{count}`, each costing $10.00.
    pub(crate) fn with_count(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|index| quote(&format!("Q{index}"), 1_000))
                .collect(),
        )
    }
}

impl QuoteRepository for FakeRepo {
    fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    fn commit(&mut self, quotes: Vec<Quote>) -> Result<()> {
        if self.fail_commit {
            bail!(COMMIT_FAILURE);
        }
        self.commits.push(quotes.clone());
        self.quotes = quotes;
        Ok(())
    }
}

pub(crate) fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid date")
}

pub(crate) fn quote(id: &str, first_cost_cents: u64) -> Quote {
    Quote {
        id: QuoteId::new(id),
        quote_name: format!("{id} quote"),
        item_name: format!("{id} item"),
        item_description: String::new(),
        quote_date: date(2024, Month::March, 1),
        committed_flag: false,
        supplier: Supplier {
            name: "Harbor Outdoor".to_owned(),
        },
        fob_port: FobPort {
            country_of_origin: "Vietnam".to_owned(),
        },
        costing: Costing {
            first_cost: Money::from_cents(first_cost_cents),
            component_material_costing: Vec::new(),
        },
        club_costing: ClubCosting {
            retail_price: Money::from_cents(2_499),
        },
    }
}
