//! Hack The Box API client
//!
//! Fetches a user's basic profile and their country ranking list from the
//! HTB v4 API and assembles the daily ranking metrics. The country call is
//! keyed by country, not by user, so the user's own country has to be
//! learned from the profile first.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::RankingMetrics;
use crate::config::Credentials;

/// Base URL for the Hack The Box v4 API
const HTB_BASE_URL: &str = "https://labs.hackthebox.com/api/v4";

/// Browser-style user agent; the API rejects requests without a
/// recognizable client signature
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) \
    Chrome/138.0.0.0 Safari/537.36";

/// Upper bound on each upstream request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching ranking data
#[derive(Debug, Error)]
pub enum FetchError {
    /// USER_ID or TOKEN was not configured
    #[error("missing USER_ID or TOKEN credentials")]
    MissingCredentials,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Profile endpoint answered with a non-success status
    #[error("profile request returned status {0}")]
    ProfileStatus(StatusCode),

    /// Profile response carried no username or no country code
    #[error("profile response missing username or country code")]
    IncompleteProfile,
}

/// Wire format of the profile endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileResponse {
    profile: Profile,
}

/// The `profile` object; any field may be absent
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Profile {
    name: Option<String>,
    country_code: Option<String>,
    system_owns: Option<u32>,
    user_owns: Option<u32>,
    system_bloods: Option<u32>,
    user_bloods: Option<u32>,
    rank: Option<String>,
    ranking: Option<u32>,
}

/// Wire format of the country rankings endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CountryRankingsResponse {
    data: CountryRankingsData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CountryRankingsData {
    rankings: Vec<CountryMember>,
}

/// One entry of a country leaderboard
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CountryMember {
    name: Option<String>,
    rank: Option<u32>,
}

/// Client for fetching ranking data from the Hack The Box API
///
/// Credentials are optional at construction time: a cache hit never needs
/// them, so their absence only surfaces when a fetch is actually attempted.
#[derive(Debug, Clone)]
pub struct HtbClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer credentials, if configured
    credentials: Option<Credentials>,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl HtbClient {
    /// Creates a client against the production API
    pub fn new(credentials: Option<Credentials>) -> Result<Self, reqwest::Error> {
        Self::with_base_url(credentials, HTB_BASE_URL.to_string())
    }

    /// Creates a client against a custom base URL (for testing)
    pub fn with_base_url(
        credentials: Option<Credentials>,
        base_url: String,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            credentials,
            base_url,
        })
    }

    /// Fetches the user's profile metrics and local country rank
    ///
    /// # Returns
    /// * `Ok(RankingMetrics)` - metrics assembled from the profile, with the
    ///   local rank filled in when the user appears in their country list
    /// * `Err(FetchError)` - missing credentials, transport failure,
    ///   non-success profile status, or a profile without name/country
    pub async fn fetch_rankings(&self) -> Result<RankingMetrics, FetchError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(FetchError::MissingCredentials)?;

        let profile_url = format!(
            "{}/user/profile/basic/{}",
            self.base_url, credentials.user_id
        );
        debug!(url = %profile_url, "fetching user profile");

        let response = self
            .http_client
            .get(&profile_url)
            .bearer_auth(&credentials.token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::ProfileStatus(response.status()));
        }

        let Profile {
            name,
            country_code,
            system_owns,
            user_owns,
            system_bloods,
            user_bloods,
            rank,
            ranking,
        } = response.json::<ProfileResponse>().await?.profile;

        // Without a username and country there is nothing to rank against;
        // partial profile metrics are discarded.
        let (username, country_code) = match (name, country_code) {
            (Some(name), Some(code)) => (name, code),
            _ => return Err(FetchError::IncompleteProfile),
        };

        let mut metrics = RankingMetrics {
            system_owns,
            user_owns,
            system_bloods,
            user_bloods,
            rank,
            global_rank: ranking,
            local_rank: None,
        };

        metrics.local_rank = self
            .fetch_local_rank(credentials, &country_code, &username)
            .await?;

        Ok(metrics)
    }

    /// Looks up the user's position inside their country leaderboard
    ///
    /// A non-success status means no local rank, not a failed fetch. The
    /// list is scanned in order and the first name match wins.
    async fn fetch_local_rank(
        &self,
        credentials: &Credentials,
        country_code: &str,
        username: &str,
    ) -> Result<Option<u32>, FetchError> {
        let url = format!("{}/rankings/country/{}/members", self.base_url, country_code);
        debug!(url = %url, "fetching country rankings");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&credentials.token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "country rankings unavailable, omitting local rank");
            return Ok(None);
        }

        let rankings = response
            .json::<CountryRankingsResponse>()
            .await?
            .data
            .rankings;

        Ok(rankings
            .into_iter()
            .find(|member| member.name.as_deref() == Some(username))
            .and_then(|member| member.rank))
    }
}
