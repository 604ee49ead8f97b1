pub mod calendar_mapper;
pub mod subscription_mapper;
pub mod transaction_mapper;
