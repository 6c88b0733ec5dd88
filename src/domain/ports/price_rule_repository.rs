use crate::domain::entities::PriceRule;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait PriceRuleRepository: Send + Sync {
    async fn list_price_rules(&self) -> DomainResult<Vec<PriceRule>>;

    async fn get_price_rule(&self, id: &str) -> DomainResult<Option<PriceRule>>;

    async fn create_price_rule(&self, rule: PriceRule) -> DomainResult<PriceRule>;

    async fn update_price_rule(&self, rule: &PriceRule) -> DomainResult<()>;

    async fn delete_price_rule(&self, id: &str) -> DomainResult<()>;
}
