use crate::domain::entities::{
    parse_date, PriceQuoteRequest, PriceRule, PriceRuleRequest, PriceType, RuleScope,
    StayInterval,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::price_rule_repository::PriceRuleRepository;
use crate::domain::ports::room_repository::RoomRepository;
use crate::domain::services::{applicable_rules, resolve_flat, resolve_stay, DailyPrice, RuleSelection};
use crate::infrastructure::observability;
use serde::Serialize;
use std::sync::Arc;

/// Price of a room under a rule selection, with or without a stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub room_id: String,
    pub base_price: f64,
    pub price_per_night: f64,
    pub nights: Option<i64>,
    pub total_price: Option<f64>,
    pub daily_prices: Vec<DailyPrice>,
    pub applicable_rules: Vec<PriceRule>,
}

#[derive(Clone)]
pub struct PriceRuleService {
    rule_repo: Arc<dyn PriceRuleRepository>,
    room_repo: Arc<dyn RoomRepository>,
}

/// Validate a request into a rule carrying `id`.
fn build_rule(id: String, request: PriceRuleRequest) -> DomainResult<PriceRule> {
    let scope = request.room_id.trim();
    if scope.is_empty() {
        return Err(DomainError::InvalidInput(
            "Room is required (a room id or \"all\")".to_string(),
        ));
    }

    let start_date = parse_date(&request.start_date)?;
    let end_date = parse_date(&request.end_date)?;
    if start_date > end_date {
        return Err(DomainError::InvalidInterval(format!(
            "rule ends {} before it starts {}",
            end_date, start_date
        )));
    }

    let value = request.price_value;
    if !value.is_finite() {
        return Err(DomainError::InvalidInput(
            "Price value must be a number".to_string(),
        ));
    }
    match request.price_type {
        PriceType::Fixed if value < 0.0 => {
            return Err(DomainError::InvalidInput(
                "Fixed price cannot be negative".to_string(),
            ))
        }
        PriceType::Percentage if value <= -100.0 => {
            return Err(DomainError::InvalidInput(
                "Percentage adjustment must be greater than -100".to_string(),
            ))
        }
        _ => {}
    }

    Ok(PriceRule {
        id,
        room_id: RuleScope::from(scope.to_string()),
        start_date,
        end_date,
        price_type: request.price_type,
        price_value: value,
        name: request.name.trim().to_string(),
    })
}

impl PriceRuleService {
    pub fn new(
        rule_repo: Arc<dyn PriceRuleRepository>,
        room_repo: Arc<dyn RoomRepository>,
    ) -> Self {
        Self {
            rule_repo,
            room_repo,
        }
    }

    pub async fn list_rules(&self) -> DomainResult<Vec<PriceRule>> {
        self.rule_repo.list_price_rules().await
    }

    pub async fn get_rule(&self, id: &str) -> DomainResult<PriceRule> {
        self.rule_repo
            .get_price_rule(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Pricing rule {} not found", id)))
    }

    pub async fn create_rule(&self, request: PriceRuleRequest) -> DomainResult<PriceRule> {
        let rule = build_rule(String::new(), request)?;
        let rule = self.rule_repo.create_price_rule(rule).await?;
        tracing::info!(
            "Pricing rule created: id={}, scope={}, {} {}",
            rule.id,
            rule.room_id,
            rule.price_type,
            rule.price_value
        );
        Ok(rule)
    }

    pub async fn update_rule(&self, id: &str, request: PriceRuleRequest) -> DomainResult<PriceRule> {
        let existing = self.get_rule(id).await?;
        let rule = build_rule(existing.id, request)?;
        self.rule_repo.update_price_rule(&rule).await?;
        tracing::info!("Pricing rule updated: id={}", rule.id);
        Ok(rule)
    }

    pub async fn delete_rule(&self, id: &str) -> DomainResult<()> {
        self.get_rule(id).await?;
        self.rule_repo.delete_price_rule(id).await?;
        tracing::info!("Pricing rule deleted: id={}", id);
        Ok(())
    }

    /// Price a room without booking it. Both dates give a per-night breakdown over
    /// the stay; no dates apply the room's rules once to its base price.
    pub async fn quote(&self, request: PriceQuoteRequest) -> DomainResult<PriceQuote> {
        let room = self
            .room_repo
            .get_room(&request.room_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Room {} not found", request.room_id)))?;
        let rules = self.rule_repo.list_price_rules().await?;
        let selection = RuleSelection::from_ids(request.selected_rule_ids);

        let quote = match (request.check_in.as_deref(), request.check_out.as_deref()) {
            (Some(check_in), Some(check_out)) => {
                let stay = StayInterval::parse(check_in, check_out)?;
                let candidates = applicable_rules(&room.id, &rules, &stay);
                let breakdown = resolve_stay(room.base_price, &candidates, &selection, &stay)?;
                PriceQuote {
                    room_id: room.id,
                    base_price: breakdown.base_price,
                    price_per_night: breakdown.price_per_night,
                    nights: Some(breakdown.nights),
                    total_price: Some(breakdown.total_price),
                    daily_prices: breakdown.daily_prices,
                    applicable_rules: candidates,
                }
            }
            (None, None) => {
                let candidates: Vec<PriceRule> = rules
                    .into_iter()
                    .filter(|rule| rule.room_id.includes(&room.id))
                    .collect();
                PriceQuote {
                    price_per_night: resolve_flat(room.base_price, &candidates, &selection),
                    room_id: room.id,
                    base_price: room.base_price,
                    nights: None,
                    total_price: None,
                    daily_prices: Vec::new(),
                    applicable_rules: candidates,
                }
            }
            _ => {
                return Err(DomainError::InvalidInput(
                    "Both check-in and check-out are required for a stay quote".to_string(),
                ))
            }
        };

        observability::record_price_resolution("quote");
        Ok(quote)
    }
}
