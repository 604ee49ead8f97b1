//! # Domain Module
//!
//! Business logic of the subscription calendar, independent of the REST
//! layer.
//!
//! - **models**: subscriptions and historical charges
//! - **view_month**: the displayed month and its navigation
//! - **subscription_calendar**: day bucketing of predicted renewals and charges
//! - **calendar**: displayed-month state and calendar grid assembly
//! - **formatting**: money formatting and currency detection
//! - **commands**: internal query types

pub mod calendar;
pub mod commands;
pub mod formatting;
pub mod models;
pub mod subscription_calendar;
pub mod view_month;

pub use calendar::*;
pub use subscription_calendar::{CalendarBuckets, ChargeRecord, DayBucket};
pub use view_month::ViewMonth;
