use serde::Deserialize;

/// One entry of `GET /v2/customers/my/billing_history`.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingEntry {
    pub description: String,
    /// DigitalOcean sends amounts as strings ("12.34"); numbers are accepted too
    pub amount: rust_decimal::Decimal,
    /// ISO-8601 date or datetime, e.g. "2024-03-07T08:44:38Z"
    pub date: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BillingHistoryResponse {
    #[serde(default)]
    pub billing_history: Vec<BillingEntry>,
    #[serde(default)]
    pub links: Option<Links>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub pages: Option<Pages>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pages {
    pub next: Option<String>,
}

impl BillingHistoryResponse {
    pub fn next_page(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.pages.as_ref())
            .and_then(|p| p.next.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub account: Account,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub email: Option<String>,
    pub status: Option<String>,
}
