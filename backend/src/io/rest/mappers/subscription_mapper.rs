use crate::domain::models::{coerce_amount, Subscription as DomainSubscription};
use shared::Subscription as SharedSubscription;

pub struct SubscriptionMapper;

impl SubscriptionMapper {
    pub fn to_domain(dto: SharedSubscription) -> DomainSubscription {
        DomainSubscription {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            amount: coerce_amount(&dto.amount),
            logo: dto.logo,
        }
    }

    pub fn to_domain_list(dtos: Vec<SharedSubscription>) -> Vec<DomainSubscription> {
        dtos.into_iter().map(Self::to_domain).collect()
    }
}
