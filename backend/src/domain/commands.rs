//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod calendar {
    use chrono::NaiveDate;

    use crate::domain::models::{Subscription, Transaction};
    use crate::domain::view_month::ViewMonth;

    /// Input for building the subscription calendar of a month.
    #[derive(Debug, Clone)]
    pub struct SubscriptionCalendarQuery {
        pub subscriptions: Vec<Subscription>,
        pub transactions: Vec<Transaction>,
        /// Month to display; the service's focus month when `None`
        pub view_month: Option<ViewMonth>,
        /// Currency for formatted amounts; the service default when `None`
        pub currency: Option<String>,
        /// Date used to mark the "today" cell
        pub today: NaiveDate,
    }
}
