//! # GitHub
//!
//! Looks up the newest commit of the bot's source repository for `botinfo`.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::time::Duration;

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("dotzbot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub short_sha: String,
    /// First line of the commit message.
    pub message: String,
    pub url: String,
}

#[derive(Deserialize)]
struct CommitEntry {
    sha: String,
    html_url: String,
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    message: String,
}

/// Web link to a repository given as `owner/name`.
pub fn repository_url(repo: &str) -> String {
    format!("https://github.com/{repo}")
}

pub async fn fetch_latest_commit(http: &reqwest::Client, repo: &str) -> Result<CommitSummary> {
    let url = format!("{API_BASE}/repos/{repo}/commits?per_page=1");

    let resp = http
        .get(&url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .with_context(|| format!("HTTP request to {url} failed"))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("GitHub returned HTTP {status}");
    }

    let body = resp.text().await.context("Failed to read GitHub response")?;
    parse_latest_commit(&body)
}

/// Parses the body of the `commits` listing and keeps the first entry.
pub fn parse_latest_commit(body: &str) -> Result<CommitSummary> {
    let entries: Vec<CommitEntry> =
        serde_json::from_str(body).context("Failed to parse GitHub commit list")?;
    let Some(latest) = entries.into_iter().next() else {
        bail!("Repository has no commits");
    };

    Ok(CommitSummary {
        short_sha: latest.sha.chars().take(7).collect(),
        message: latest.commit.message.lines().next().unwrap_or_default().to_string(),
        url: latest.html_url,
    })
}
