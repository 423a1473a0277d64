// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use quotedesk_app::{
    ClubCosting, Costing, FobPort, MaterialCosting, Money, Quote, QuoteId, QuoteRepository,
    Supplier,
};
use std::path::PathBuf;
use time::macros::date;
use time::{Date, Duration};

const QUOTE_NAMES: [&str; 8] = [
    "Spring reset",
    "Summer outdoor",
    "Back to school",
    "Holiday gifting",
    "Kitchen refresh",
    "Home office",
    "Fitness push",
    "Pet aisle",
];

const ITEM_NOUNS: [&str; 12] = [
    "Chair",
    "Lamp",
    "Cookware Set",
    "Backpack",
    "Blanket",
    "Storage Bin",
    "Yoga Mat",
    "Desk",
    "Dog Bed",
    "Umbrella",
    "Toolbox",
    "Cooler",
];

const ITEM_ADJECTIVES: [&str; 10] = [
    "Folding",
    "Deluxe",
    "Compact",
    "Heavy-Duty",
    "Stackable",
    "Insulated",
    "Adjustable",
    "Cordless",
    "Weatherproof",
    "Premium",
];

const SUPPLIERS: [&str; 8] = [
    "Harbor Outdoor Co.",
    "Fulton Housewares",
    "Northgate Bags",
    "Keystone Paper",
    "Brightway Lighting",
    "Summit Active",
    "Crestline Furniture",
    "Meadow Pet Goods",
];

const COUNTRIES: [&str; 9] = [
    "China",
    "Vietnam",
    "Mexico",
    "India",
    "Taiwan",
    "Cambodia",
    "Germany",
    "United States",
    "Bangladesh",
];

const MATERIALS: [&str; 12] = [
    "Polyester fabric",
    "Steel frame",
    "Aluminum tube",
    "Resin shell",
    "Cotton fill",
    "Memory foam",
    "Hardwood",
    "Glass",
    "Zippers",
    "Fasteners",
    "Packaging",
    "Printed label",
];

const REFERENCE_DATE: Date = date!(2024 - 01 - 01);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible quotes. Ids are `F1`, `F2`, ... in
/// generation order, so a faker never repeats an id.
#[derive(Debug, Clone)]
pub struct QuoteFaker {
    rng: DeterministicRng,
    next_id: usize,
}

impl QuoteFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn quote(&mut self) -> Quote {
        let id = QuoteId::new(format!("F{}", self.next_id));
        self.next_id += 1;

        let materials: Vec<MaterialCosting> = (0..1 + self.rng.int_n(4))
            .map(|_| self.material())
            .collect();
        let material_total: u64 = materials
            .iter()
            .map(|material| material.cost_per_selling_unit.cents())
            .sum();
        let first_cost = material_total + self.cents_between(100, 5_000);
        let markup_percent = self.cents_between(130, 260);

        Quote {
            id,
            quote_name: self.pick(&QUOTE_NAMES).to_owned(),
            item_name: format!(
                "{} {}",
                self.pick(&ITEM_ADJECTIVES),
                self.pick(&ITEM_NOUNS)
            ),
            item_description: format!("{} from {}", self.pick(&MATERIALS), self.pick(&COUNTRIES)),
            quote_date: REFERENCE_DATE + Duration::days(self.rng.int_n(365) as i64),
            committed_flag: self.rng.bool(),
            supplier: Supplier {
                name: self.pick(&SUPPLIERS).to_owned(),
            },
            fob_port: FobPort {
                country_of_origin: self.pick(&COUNTRIES).to_owned(),
            },
            costing: Costing {
                first_cost: Money::from_cents(first_cost),
                component_material_costing: materials,
            },
            club_costing: ClubCosting {
                retail_price: Money::from_cents(first_cost * markup_percent / 100),
            },
        }
    }

    pub fn quotes(&mut self, count: usize) -> Vec<Quote> {
        (0..count).map(|_| self.quote()).collect()
    }

    pub fn material(&mut self) -> MaterialCosting {
        MaterialCosting {
            material_description: self.pick(&MATERIALS).to_owned(),
            cost_per_selling_unit: Money::from_cents(self.cents_between(25, 4_000)),
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn cents_between(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        min + self.rng.next_u64() % (max - min + 1)
    }
}

/// A minimal quote with predictable values: dated 2024-03-01, retail
/// price $24.99, not committed, no materials.
pub fn fixture_quote(id: &str, first_cost_cents: u64) -> Quote {
    Quote {
        id: QuoteId::new(id),
        quote_name: format!("{id} quote"),
        item_name: format!("{id} item"),
        item_description: format!("{id} description"),
        quote_date: fixture_date(),
        committed_flag: false,
        supplier: Supplier {
            name: "Harbor Outdoor Co.".to_owned(),
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

pub fn fixture_date() -> Date {
    date!(2024 - 03 - 01)
}

/// In-memory repository recording every committed sequence.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    quotes: Vec<Quote>,
    commits: Vec<Vec<Quote>>,
    fail_commit: bool,
}

impl MemoryRepository {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            ..Self::default()
        }
    }

    pub fn set_fail_commit(&mut self, fail: bool) {
        self.fail_commit = fail;
    }

    pub fn commits(&self) -> &[Vec<Quote>] {
        &self.commits
    }

    pub fn last_commit(&self) -> Option<&[Quote]> {
        self.commits.last().map(Vec::as_slice)
    }
}

impl QuoteRepository for MemoryRepository {
    fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    fn commit(&mut self, quotes: Vec<Quote>) -> Result<()> {
        if self.fail_commit {
            bail!("simulated storage failure");
        }
        self.commits.push(quotes.clone());
        self.quotes = quotes;
        Ok(())
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("quotedesk.db");
    Ok((dir, db_path))
}
