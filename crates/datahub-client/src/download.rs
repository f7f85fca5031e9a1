//! Downloads through synthesized form submissions.
//!
//! Downloads are not fetched by the client. Instead the client describes
//! the request a browser would submit (method, action, fields) so the
//! platform can hand it to something that saves files natively.

use serde::Serialize;

use datahub_core::AppError;
use datahub_core::result::AppResult;

/// A form submission: method, action URL, and input fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    /// HTTP method, `GET` for downloads.
    pub method: String,
    /// Target URL without query.
    pub action: String,
    /// Form fields in submission order.
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// A `GET` submission to `action`.
    pub fn get(action: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            action: action.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append the session token field when one is present.
    pub fn with_token(self, token: Option<String>) -> Self {
        match token {
            Some(token) => self.field("token", token),
            None => self,
        }
    }

    /// The URL a `GET` submission navigates to.
    pub fn to_url(&self) -> AppResult<String> {
        let mut url = reqwest::Url::parse(&self.action)
            .map_err(|e| AppError::validation(format!("Invalid download URL: {e}")))?;
        if !self.fields.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.fields {
                pairs.append_pair(name, value);
            }
        }
        Ok(url.to_string())
    }
}
