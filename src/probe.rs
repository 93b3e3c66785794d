//! Backend connectivity probes.
//!
//! The site's dynamic data (stories, participants, impact metrics) lives in
//! a hosted Postgres exposed over REST. `custodian-site check` fires one
//! read probe per table to confirm the deployment credentials can actually
//! see data — the classic failure is a row-level-security policy that lets
//! requests authenticate but returns zero rows.
//!
//! Probes are fully independent: each one reports its own success or
//! failure and a failure never short-circuits the rest. There is no retry
//! and no backoff — this is a smoke test, not a health monitor.
//!
//! Credentials come from `SUPABASE_URL` / `SUPABASE_ANON_KEY` in the
//! environment (a `.env` file is honored via dotenvy in `main`).

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use std::time::Duration;
use thiserror::Error;

/// Tables probed, in report order.
pub const PROBE_TABLES: [&str; 3] = ["stories", "participants", "impact_metrics"];

/// Per-request timeout. Generous for cold serverless backends.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// The backend endpoint and key the probes run against.
#[derive(Debug, Clone)]
pub struct ProbeTarget {
    url: String,
    anon_key: String,
}

impl ProbeTarget {
    /// Create a target. A trailing slash on the URL is trimmed so joined
    /// request paths never double up.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let mut url = url.into();
        if url.ends_with('/') {
            url.pop();
        }
        Self {
            url,
            anon_key: anon_key.into(),
        }
    }

    /// Read the target from `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self, ProbeError> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| ProbeError::MissingEnv("SUPABASE_URL"))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| ProbeError::MissingEnv("SUPABASE_ANON_KEY"))?;
        Ok(Self::new(url, anon_key))
    }
}

/// Outcome of one table probe: rows visible on success, a human-readable
/// message on failure.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub table: &'static str,
    pub outcome: Result<usize, String>,
}

/// Run all probes. Only client construction can fail here — individual
/// probe failures land in their [`ProbeResult`].
pub fn run_probes(target: &ProbeTarget) -> Result<Vec<ProbeResult>, ProbeError> {
    let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
    Ok(PROBE_TABLES
        .iter()
        .map(|&table| ProbeResult {
            table,
            outcome: probe_table(&client, target, table),
        })
        .collect())
}

/// One read probe: fetch a single row and report how many came back (0 or 1).
/// Zero rows with a 200 usually means row-level security is filtering.
fn probe_table(client: &Client, target: &ProbeTarget, table: &str) -> Result<usize, String> {
    let url = format!("{}/rest/v1/{}?select=*&limit=1", target.url, table);
    let response = client
        .get(&url)
        .header("apikey", &target.anon_key)
        .header(AUTHORIZATION, format!("Bearer {}", target.anon_key))
        .send()
        .map_err(|e| e.to_string())?;

    let status = response.status();
    let body = response.text().map_err(|e| e.to_string())?;

    if !status.is_success() {
        return Err(error_message(status.as_u16(), &body));
    }
    rows_visible(&body)
}

/// Extract the human-readable message from a PostgREST error body, falling
/// back to the bare HTTP status.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Count rows in a successful response body (a JSON array).
fn rows_visible(body: &str) -> Result<usize, String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON response: {e}"))?;
    match value.as_array() {
        Some(rows) => Ok(rows.len()),
        None => Err("response is not a JSON array".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_trims_trailing_slash() {
        let target = ProbeTarget::new("https://x.supabase.co/", "key");
        assert_eq!(target.url, "https://x.supabase.co");
    }

    #[test]
    fn probe_tables_are_fixed() {
        assert_eq!(PROBE_TABLES, ["stories", "participants", "impact_metrics"]);
    }

    // =========================================================================
    // Response parsing tests
    // =========================================================================

    #[test]
    fn error_message_prefers_postgrest_message() {
        let body = r#"{"message": "permission denied for table stories", "code": "42501"}"#;
        assert_eq!(
            error_message(401, body),
            "permission denied for table stories"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(error_message(503, "<html>gateway error</html>"), "HTTP 503");
        assert_eq!(error_message(404, r#"{"error": "no message field"}"#), "HTTP 404");
    }

    #[test]
    fn rows_visible_counts_array() {
        assert_eq!(rows_visible("[]").unwrap(), 0);
        assert_eq!(rows_visible(r#"[{"id": 1}]"#).unwrap(), 1);
    }

    #[test]
    fn rows_visible_rejects_non_array() {
        assert!(rows_visible(r#"{"id": 1}"#).is_err());
        assert!(rows_visible("not json").is_err());
    }
}
