//! Day-by-day price resolution.
//!
//! Every night of a stay starts from the room's base price. The rules that cover
//! that night are applied in order: a fixed rule replaces the running price, a
//! percentage rule scales it, so percentages compound with whatever ran before.

use crate::domain::entities::{PriceRule, StayInterval};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which rules a price computation considers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleSelection {
    /// Every supplied candidate rule, in supplied order.
    #[default]
    Auto,
    /// Only these rule ids, in this order. Unknown ids are skipped.
    Explicit(Vec<String>),
}

impl RuleSelection {
    /// An empty list means no explicit selection.
    pub fn from_ids(ids: Vec<String>) -> Self {
        let ids: Vec<String> = ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if ids.is_empty() {
            RuleSelection::Auto
        } else {
            RuleSelection::Explicit(ids)
        }
    }

    /// Parse a comma-separated id list, as carried in query strings and sheet cells.
    pub fn parse_csv(value: &str) -> Self {
        Self::from_ids(value.split(',').map(str::to_string).collect())
    }

    pub fn ids(&self) -> &[String] {
        match self {
            RuleSelection::Auto => &[],
            RuleSelection::Explicit(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub nights: i64,
    /// Average over the stay; equals the common nightly price when every night matches.
    pub price_per_night: f64,
    /// Exact sum of the nightly prices.
    pub total_price: f64,
    pub daily_prices: Vec<DailyPrice>,
}

/// Order the candidate rules according to the selection.
fn ordered_rules<'a>(rules: &'a [PriceRule], selection: &RuleSelection) -> Vec<&'a PriceRule> {
    match selection {
        RuleSelection::Auto => rules.iter().collect(),
        RuleSelection::Explicit(ids) => ids
            .iter()
            .filter_map(|id| {
                let found = rules.iter().find(|rule| &rule.id == id);
                if found.is_none() {
                    tracing::debug!("Selected pricing rule {} not among candidates, skipping", id);
                }
                found
            })
            .collect(),
    }
}

/// Stay totals without the per-night breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayPrice {
    pub base_price: f64,
    pub nights: i64,
    pub price_per_night: f64,
    pub total_price: f64,
}

fn stay_nights(stay: &StayInterval) -> DomainResult<i64> {
    let nights = stay.nights();
    if nights <= 0 {
        return Err(DomainError::InvalidInterval(format!(
            "stay from {} to {} has no nights",
            stay.check_in, stay.check_out
        )));
    }
    Ok(nights)
}

fn night_price(base_price: f64, ordered: &[&PriceRule], day: NaiveDate) -> f64 {
    ordered
        .iter()
        .filter(|rule| rule.covers_day(day))
        .fold(base_price, |price, rule| rule.apply(price))
}

/// Resolve the totals of a stay in constant memory.
pub fn resolve_stay_total(
    base_price: f64,
    rules: &[PriceRule],
    selection: &RuleSelection,
    stay: &StayInterval,
) -> DomainResult<StayPrice> {
    let nights = stay_nights(stay)?;
    let ordered = ordered_rules(rules, selection);

    let total_sum: f64 = stay
        .days()
        .map(|day| night_price(base_price, &ordered, day))
        .sum();

    tracing::debug!(
        "Resolved {} nights from base {} with {} rules: total {}",
        nights,
        base_price,
        ordered.len(),
        total_sum
    );

    Ok(StayPrice {
        base_price,
        nights,
        price_per_night: total_sum / nights as f64,
        total_price: total_sum,
    })
}

/// Resolve the price of a stay night by night.
pub fn resolve_stay(
    base_price: f64,
    rules: &[PriceRule],
    selection: &RuleSelection,
    stay: &StayInterval,
) -> DomainResult<PriceBreakdown> {
    let nights = stay_nights(stay)?;
    let ordered = ordered_rules(rules, selection);

    let daily_prices: Vec<DailyPrice> = stay
        .days()
        .map(|day| DailyPrice {
            date: day,
            price: night_price(base_price, &ordered, day),
        })
        .collect();
    let total_sum: f64 = daily_prices.iter().map(|d| d.price).sum();

    Ok(PriceBreakdown {
        base_price,
        nights,
        price_per_night: total_sum / nights as f64,
        total_price: total_sum,
        daily_prices,
    })
}

/// Price lookup without dates: the rules are applied once, in order, to the base price.
pub fn resolve_flat(base_price: f64, rules: &[PriceRule], selection: &RuleSelection) -> f64 {
    ordered_rules(rules, selection)
        .iter()
        .fold(base_price, |price, rule| rule.apply(price))
}
