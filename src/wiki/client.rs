//! MediaWiki action API client.
//!
//! Covers exactly what publishing needs: login token, bot login, CSRF token
//! and page edit. Login state lives in the client's cookie store, so one
//! client instance carries a session across calls; the blocking client is
//! safe to share across publish workers.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    query: TokenQuery,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    tokens: Tokens,
}

#[derive(Debug, Deserialize)]
struct Tokens {
    #[serde(rename = "logintoken")]
    login_token: Option<String>,
    #[serde(rename = "csrftoken")]
    csrf_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    login: LoginResult,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    result: String,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    edit: Option<EditResult>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct EditResult {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    info: String,
}

pub struct WikiClient {
    http: Client,
    api_url: Url,
}

impl WikiClient {
    /// Build a client against the wiki's script path, e.g.
    /// `https://example.org/w/`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gb4-wiki-gen/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .build()
            .context("failed to create HTTP client")?;
        let api_url = Url::parse(base_url)
            .and_then(|base| base.join("api.php"))
            .with_context(|| format!("invalid wiki base URL: {base_url}"))?;
        Ok(Self { http, api_url })
    }

    /// Fetch a login token.
    pub fn login_token(&self) -> Result<String> {
        let response: TokenResponse = self
            .http
            .get(self.api_url.clone())
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("meta", "tokens"),
                ("type", "login"),
            ])
            .send()
            .context("failed to request login token")?
            .error_for_status()
            .context("login token request rejected")?
            .json()
            .context("failed to parse login token response")?;
        response
            .query
            .tokens
            .login_token
            .context("response carried no login token")
    }

    /// Log in with a bot account. The session cookies land in the client's
    /// cookie store.
    pub fn bot_login(&self, username: &str, password: &str) -> Result<()> {
        let token = self.login_token()?;
        let response: LoginResponse = self
            .http
            .post(self.api_url.clone())
            .form(&[
                ("action", "login"),
                ("format", "json"),
                ("lgtoken", token.as_str()),
                ("lgname", username),
                ("lgpassword", password),
            ])
            .send()
            .context("failed to send login request")?
            .error_for_status()
            .context("login request rejected")?
            .json()
            .context("failed to parse login response")?;
        if response.login.result != "Success" {
            bail!("wiki login failed: {}", response.login.result);
        }
        Ok(())
    }

    /// Fetch a CSRF token for edits. Requires a logged-in session.
    pub fn csrf_token(&self) -> Result<String> {
        let response: TokenResponse = self
            .http
            .get(self.api_url.clone())
            .query(&[("action", "query"), ("format", "json"), ("meta", "tokens")])
            .send()
            .context("failed to request edit token")?
            .error_for_status()
            .context("edit token request rejected")?
            .json()
            .context("failed to parse edit token response")?;
        response
            .query
            .tokens
            .csrf_token
            .context("response carried no edit token")
    }

    /// Create or replace a page.
    pub fn edit(&self, csrf_token: &str, title: &str, text: &str, summary: &str) -> Result<()> {
        let response: EditResponse = self
            .http
            .post(self.api_url.clone())
            .form(&[
                ("action", "edit"),
                ("format", "json"),
                ("token", csrf_token),
                ("title", title),
                ("text", text),
                ("summary", summary),
            ])
            .send()
            .with_context(|| format!("failed to send edit for {title}"))?
            .error_for_status()
            .with_context(|| format!("edit rejected for {title}"))?
            .json()
            .with_context(|| format!("failed to parse edit response for {title}"))?;

        if let Some(error) = response.error {
            bail!("edit failed for {title}: {} ({})", error.info, error.code);
        }
        match response.edit {
            Some(result) if result.result == "Success" => Ok(()),
            Some(result) => bail!("edit failed for {title}: {}", result.result),
            None => bail!("edit response for {title} carried no result"),
        }
    }
}
