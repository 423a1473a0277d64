// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use time::Date;

use crate::ids::QuoteId;

/// Non-negative monetary amount held as whole cents.
///
/// Serialized as a JSON number in dollars (`15.75`), which is how the stored
/// quote documents carry amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Largest amount whose dollar form survives a JSON `f64` round trip to
    /// the exact cent: fifteen significant digits, $9,999,999,999,999.99.
    pub const MAX: Self = Self(999_999_999_999_999);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Converts a dollar amount, rounding to the nearest cent.
    pub fn from_dollars(dollars: f64) -> Option<Self> {
        if !dollars.is_finite() || dollars < 0.0 {
            return None;
        }
        let cents = (dollars * 100.0).round();
        if cents > Self::MAX.0 as f64 {
            return None;
        }
        Some(Self(cents as u64))
    }

    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Self::from_dollars(dollars).ok_or_else(|| {
            de::Error::custom(format!(
                "monetary amount must be a finite non-negative number no larger than {}, got {dollars}",
                Self::MAX
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCosting {
    pub material_description: String,
    pub cost_per_selling_unit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Costing {
    pub first_cost: Money,
    #[serde(default)]
    pub component_material_costing: Vec<MaterialCosting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FobPort {
    pub country_of_origin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubCosting {
    pub retail_price: Money,
}

/// A priced line item. Pure value: edit-session state lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub quote_name: String,
    pub item_name: String,
    pub item_description: String,
    #[serde(with = "iso_date")]
    pub quote_date: Date,
    pub committed_flag: bool,
    pub supplier: Supplier,
    pub fob_port: FobPort,
    pub costing: Costing,
    pub club_costing: ClubCosting,
}

impl Quote {
    pub fn first_cost(&self) -> Money {
        self.costing.first_cost
    }

    pub fn retail_price(&self) -> Money {
        self.club_costing.retail_price
    }

    pub fn materials(&self) -> &[MaterialCosting] {
        &self.costing.component_material_costing
    }
}

/// Fields a user may change while a row is in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditableField {
    QuoteDate,
    FirstCost,
    RetailPrice,
    CommittedFlag,
}

impl EditableField {
    pub const ALL: [Self; 4] = [
        Self::QuoteDate,
        Self::FirstCost,
        Self::RetailPrice,
        Self::CommittedFlag,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuoteDate => "quoteDate",
            Self::FirstCost => "firstCost",
            Self::RetailPrice => "retailPrice",
            Self::CommittedFlag => "committedFlag",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::QuoteDate => "quote date",
            Self::FirstCost => "first cost",
            Self::RetailPrice => "retail price",
            Self::CommittedFlag => "committed",
        }
    }

}

pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// A typed proposed value for one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    QuoteDate(Date),
    FirstCost(Money),
    RetailPrice(Money),
    CommittedFlag(bool),
}

impl FieldChange {
    pub const fn field(self) -> EditableField {
        match self {
            Self::QuoteDate(_) => EditableField::QuoteDate,
            Self::FirstCost(_) => EditableField::FirstCost,
            Self::RetailPrice(_) => EditableField::RetailPrice,
            Self::CommittedFlag(_) => EditableField::CommittedFlag,
        }
    }
}

pub mod iso_date {
    //! `YYYY-MM-DD` dates. Full RFC 3339 timestamps are accepted on read and
    //! truncated to their calendar date.

    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{Date, OffsetDateTime};

    pub fn format(date: Date) -> String {
        date.format(&format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| date.to_string())
    }

    pub fn parse(raw: &str) -> Option<Date> {
        let trimmed = raw.trim();
        if let Ok(date) = Date::parse(trimmed, &format_description!("[year]-[month]-[day]")) {
            return Some(date);
        }
        OffsetDateTime::parse(trimmed, &Rfc3339)
            .ok()
            .map(OffsetDateTime::date)
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid quote date {raw:?}")))
    }
}
