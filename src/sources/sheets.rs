use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, Result};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Service-account key material, as issued by the Google Cloud console.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

#[derive(Debug, Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Contents of a spreadsheet tab: header row plus data rows, cells as text.
#[derive(Debug, Clone)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Minimal Google Sheets v4 client: JWT-bearer token exchange, then a
/// values read of the first tab.
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    key: ServiceAccountKey,
}

impl SheetsClient {
    pub fn from_credentials(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let key: ServiceAccountKey = serde_json::from_str(&raw)?;

        Ok(Self {
            http: reqwest::blocking::Client::new(),
            key,
        })
    }

    /// Fetch every populated row of the sheet's first tab.
    pub fn fetch_rows(&self, sheet_id: &str) -> Result<SheetTable> {
        let token = self.access_token()?;
        let url = format!("{}/{}/values/A1:Z", SHEETS_API_BASE, sheet_id);

        let range: ValueRange = self
            .http
            .get(url)
            .bearer_auth(&token)
            .send()?
            .error_for_status()?
            .json()?;

        table_from_values(range.values)
    }

    fn access_token(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)?;

        let response: TokenResponse = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.access_token)
    }
}

/// Split an API value table into headers and data rows. The first row names
/// the columns; trailing empty cells are omitted by the API, so rows may be
/// shorter than the header.
fn table_from_values(values: Vec<Vec<serde_json::Value>>) -> Result<SheetTable> {
    let mut rows = values.into_iter();

    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| PipelineError::MissingData("spreadsheet returned no rows".to_string()))?
        .into_iter()
        .map(cell_to_string)
        .collect();

    let rows = rows
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect();

    Ok(SheetTable { headers, rows })
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
