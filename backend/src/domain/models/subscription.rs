//! Domain model for a tracked subscription.

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    /// Matches the merchant key of the transactions that renew it
    pub id: String,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub logo: String,
}

impl Subscription {
    /// Single uppercase letter shown when the logo image cannot be loaded
    pub fn logo_initial(&self) -> String {
        match self.name.trim_start().chars().next() {
            Some(c) => c.to_uppercase().collect(),
            None => "?".to_string(),
        }
    }
}
