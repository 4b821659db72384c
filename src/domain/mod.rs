use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use serde::{de, Deserialize, Deserializer};

mod month;

pub use month::{ParseYearMonthError, YearMonth};

pub type CustomerId = u64;

/// Amount above which purchases start earning points
const FIRST_TIER_THRESHOLD: u32 = 50;
/// Amount above which every dollar earns double points
const SECOND_TIER_THRESHOLD: u32 = 100;
const SECOND_TIER_RATIO: u32 = 2;

/// Reward points earned by a single purchase
///
/// * No points for the first $50.
/// * 1 point per dollar spent between $50 and $100.
/// * 2 points per dollar spent above $100, on top of the 50 points for the previous band.
///
/// Fractions are dropped from the resulting point value, not from the amount. Amounts at
/// or below $50 (including negative ones) earn nothing.
pub fn reward_points(amount: Decimal) -> u64 {
    let first = Decimal::from(FIRST_TIER_THRESHOLD);
    let second = Decimal::from(SECOND_TIER_THRESHOLD);

    if amount <= first {
        0
    } else if amount <= second {
        floor_points(amount - first)
    } else {
        let band = floor_points(second - first);
        let over = (amount - second)
            .checked_mul(Decimal::from(SECOND_TIER_RATIO))
            .map(floor_points)
            .unwrap_or(u64::MAX);
        band.saturating_add(over)
    }
}

/// Whole points for a non-negative value, saturating on overflow
fn floor_points(value: Decimal) -> u64 {
    value.floor().to_u64().unwrap_or(u64::MAX)
}

/// A single purchase made by a customer
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }

    pub fn points(&self) -> u64 {
        reward_points(self.amount)
    }
}

/// `YYYY-MM-DD` date whose month can be queried back as `YYYY-MM`
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let date = NaiveDate::deserialize(deserializer)?;
    if !YearMonth::SUPPORTED_YEARS.contains(&date.year()) {
        return Err(de::Error::custom(format!(
            "date {date} is outside the supported years 0000 to 9999"
        )));
    }
    Ok(date)
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Customer {
    /// Unique identifier for the `Customer`
    pub id: CustomerId,
    /// Display name
    ///
    /// Not guaranteed to be unique across customers.
    pub name: String,
    /// Purchase history, in the order it was recorded
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        Self {
            id,
            name: name.into(),
            transactions,
        }
    }

    /// Points earned from transactions within `month`
    pub fn points_in(&self, month: YearMonth) -> u64 {
        self.transactions
            .iter()
            .filter(|tx| month.contains(tx.date))
            .map(Transaction::points)
            .fold(0, u64::saturating_add)
    }

    /// Points per calendar month
    ///
    /// Only months with at least one transaction are present.
    pub fn monthly_points(&self) -> BTreeMap<YearMonth, u64> {
        let mut monthly = BTreeMap::new();
        for tx in &self.transactions {
            let points = monthly.entry(YearMonth::from(tx.date)).or_insert(0u64);
            *points = points.saturating_add(tx.points());
        }
        monthly
    }
}
