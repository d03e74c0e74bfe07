use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::core::config::ApiConfig;
use crate::core::models::billing::{Account, AccountResponse, BillingEntry, BillingHistoryResponse};
use crate::core::models::cost::{CostLineItem, DailyReport};
use crate::core::providers::fetch::{validate_endpoint, FetchError};

const ACCOUNT_PATH: &str = "/v2/account";
const BILLING_HISTORY_PATH: &str = "/v2/customers/my/billing_history";

pub struct DigitalOceanClient {
    client: reqwest::Client,
    base_url: String,
    origin: reqwest::Url,
    token: String,
    per_page: u32,
    max_pages: u32,
}

impl DigitalOceanClient {
    pub fn new(api: &ApiConfig, token: String) -> Result<Self, FetchError> {
        let base_url = api.base_url.trim_end_matches('/').to_string();
        validate_endpoint(&base_url)?;
        let origin = reqwest::Url::parse(&base_url)
            .map_err(|e| FetchError::InvalidEndpoint(format!("invalid base URL {}: {}", base_url, e)))?;
        if api.max_pages == 0 {
            return Err(FetchError::InvalidConfig(
                "max_pages must be greater than 0".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!("docost/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self {
            client,
            base_url,
            origin,
            token,
            per_page: api.per_page,
            max_pages: api.max_pages,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, endpoint: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    /// Check the token against the account endpoint before pulling billing data.
    pub async fn verify_account(&self) -> Result<Account, FetchError> {
        let url = format!("{}{}", self.base_url, ACCOUNT_PATH);
        let response: AccountResponse = self.get_json(&url, "account").await?;
        tracing::info!(
            email = response.account.email.as_deref().unwrap_or("unknown"),
            status = response.account.status.as_deref().unwrap_or("unknown"),
            "verified DigitalOcean account"
        );
        Ok(response.account)
    }

    /// Fetch billing history pages, newest first, stopping once a page is
    /// entirely older than `since` or the page cap is reached.
    pub async fn billing_history(&self, since: NaiveDate) -> Result<Vec<BillingEntry>, FetchError> {
        let mut url = format!(
            "{}{}?per_page={}",
            self.base_url, BILLING_HISTORY_PATH, self.per_page
        );
        let mut entries = Vec::new();

        for page in 1..=self.max_pages {
            let response: BillingHistoryResponse = self.get_json(&url, "billing_history").await?;
            tracing::debug!(page, count = response.billing_history.len(), "billing history page");

            let next = response.next_page().map(str::to_string);
            // The API lists billing history newest first, so a page that is
            // entirely before `since` means every later page is too.
            let page_is_older = !response.billing_history.is_empty()
                && response
                    .billing_history
                    .iter()
                    .all(|e| entry_date(e).is_some_and(|d| d < since));
            entries.extend(response.billing_history);

            match next {
                Some(_) if page_is_older => break,
                Some(next) if same_origin(&self.origin, &next) => url = next,
                Some(next) => {
                    tracing::warn!(%next, "next page is outside the API base URL, not following");
                    break;
                }
                None => break,
            }
            if page == self.max_pages {
                tracing::warn!(max_pages = self.max_pages, "billing history truncated at page cap");
            }
        }

        Ok(entries)
    }
}

/// True when `link` points at the same scheme, host and port as `origin`
/// and carries no userinfo, so the bearer token stays on the API host.
pub fn same_origin(origin: &reqwest::Url, link: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(link) else {
        return false;
    };
    url.username().is_empty()
        && url.password().is_none()
        && url.scheme() == origin.scheme()
        && url.host_str() == origin.host_str()
        && url.port_or_known_default() == origin.port_or_known_default()
}

/// Calendar date of a billing entry, from the `YYYY-MM-DD` prefix of its ISO-8601 date.
pub fn entry_date(entry: &BillingEntry) -> Option<NaiveDate> {
    let prefix = entry.date.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Line items dated `date`, in API order.
pub fn select_day(entries: &[BillingEntry], date: NaiveDate) -> Vec<CostLineItem> {
    entries
        .iter()
        .filter(|entry| match entry_date(entry) {
            Some(d) => d == date,
            None => {
                tracing::debug!(date = %entry.date, "skipping billing entry with unparseable date");
                false
            }
        })
        .map(|entry| {
            tracing::trace!(
                description = %entry.description,
                kind = entry.entry_type.as_deref().unwrap_or("-"),
                "selected billing entry"
            );
            CostLineItem {
                description: entry.description.clone(),
                amount: entry.amount,
                duration: entry.duration.clone(),
            }
        })
        .collect()
}

/// Verify the token, pull billing history and build the report for `date`.
pub async fn fetch_daily(
    api: &ApiConfig,
    token: String,
    date: NaiveDate,
) -> Result<DailyReport, FetchError> {
    let client = DigitalOceanClient::new(api, token)?;
    client.verify_account().await?;
    let entries = client.billing_history(date).await?;
    let items = select_day(&entries, date);
    tracing::info!(%date, fetched = entries.len(), selected = items.len(), "billing history fetched");
    Ok(DailyReport::new(date, items))
}
