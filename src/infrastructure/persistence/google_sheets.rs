use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::credential_provider::CredentialProvider;
use crate::domain::ports::sheet_store::{Row, Sheet, SheetStore};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Credential provider holding a pre-issued OAuth access token.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn access_token(&self) -> DomainResult<String> {
        if self.token.is_empty() {
            return Err(DomainError::Storage(
                "No access token configured for Google Sheets".to_string(),
            ));
        }
        Ok(self.token.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ValueUpdate<'a> {
    values: [&'a Row; 1],
}

/// Row store backed by a Google spreadsheet with one tab per sheet.
///
/// Data row `i` lives on spreadsheet row `i + 2`; row 1 holds the header.
/// Values are written RAW so cells are stored exactly as encoded.
pub struct GoogleSheetsStore {
    http_client: Client,
    api_base: String,
    spreadsheet_id: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl GoogleSheetsStore {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        api_base: Option<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> DomainResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_base: api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/{}/values/{}", self.api_base, self.spreadsheet_id, range)
    }

    fn row_range(sheet: Sheet, index: usize) -> String {
        let row_number = index + 2;
        format!(
            "{}!A{}:{}{}",
            sheet.name(),
            row_number,
            sheet.last_column(),
            row_number
        )
    }

    async fn send(&self, request: RequestBuilder) -> DomainResult<Response> {
        let token = self.credentials.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(500).collect();
        tracing::warn!("Sheets API returned {}: {}", status, body);
        Err(DomainError::Storage(format!(
            "Sheets API returned {}: {}",
            status.as_u16(),
            body
        )))
    }

    async fn read_range(&self, range: &str) -> DomainResult<Vec<Row>> {
        let response = self
            .send(self.http_client.get(self.values_url(range)))
            .await?;
        let range: ValueRange = response.json().await?;
        Ok(range.values)
    }

    async fn write_range(&self, range: &str, row: &Row) -> DomainResult<()> {
        self.send(
            self.http_client
                .put(self.values_url(range))
                .query(&[("valueInputOption", "RAW")])
                .json(&ValueUpdate { values: [row] }),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn get_rows(&self, sheet: Sheet) -> DomainResult<Vec<Row>> {
        let range = format!("{}!A2:{}", sheet.name(), sheet.last_column());
        self.read_range(&range).await
    }

    async fn append_row(&self, sheet: Sheet, row: Row) -> DomainResult<()> {
        let range = format!("{}!A:{}", sheet.name(), sheet.last_column());
        self.send(
            self.http_client
                .post(format!("{}:append", self.values_url(&range)))
                .query(&[
                    ("valueInputOption", "RAW"),
                    ("insertDataOption", "INSERT_ROWS"),
                ])
                .json(&ValueUpdate { values: [&row] }),
        )
        .await?;

        tracing::debug!("Appended row to sheet {}", sheet);
        Ok(())
    }

    async fn update_row(&self, sheet: Sheet, index: usize, row: Row) -> DomainResult<()> {
        self.write_range(&Self::row_range(sheet, index), &row).await
    }

    async fn clear_row(&self, sheet: Sheet, index: usize) -> DomainResult<()> {
        let range = Self::row_range(sheet, index);
        self.send(
            self.http_client
                .post(format!("{}:clear", self.values_url(&range)))
                .json(&serde_json::json!({})),
        )
        .await?;
        Ok(())
    }

    async fn ensure_header(&self, sheet: Sheet) -> DomainResult<()> {
        let range = format!("{}!A1:{}1", sheet.name(), sheet.last_column());
        let existing = self.read_range(&range).await?;
        let width = existing.first().map(|header| header.len()).unwrap_or(0);
        if width >= sheet.width() {
            return Ok(());
        }

        let header: Row = sheet.header().iter().map(|h| h.to_string()).collect();
        self.write_range(&range, &header).await?;
        tracing::info!("Header written for sheet {}", sheet);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_ranges_skip_header() {
        assert_eq!(GoogleSheetsStore::row_range(Sheet::Rooms, 0), "rooms!A2:F2");
        assert_eq!(
            GoogleSheetsStore::row_range(Sheet::Bookings, 4),
            "bookings!A6:M6"
        );
    }

    #[test]
    fn test_missing_values_decode_as_empty() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"rooms!A2:F"}"#).unwrap();
        assert!(range.values.is_empty());
    }

    #[tokio::test]
    async fn test_empty_static_token_is_rejected() {
        let provider = StaticTokenProvider::new("");
        assert!(matches!(
            provider.access_token().await,
            Err(DomainError::Storage(_))
        ));
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let store = GoogleSheetsStore::new(
            "sheet-id",
            Some("http://localhost:9000/".to_string()),
            Arc::new(StaticTokenProvider::new("t")),
        )
        .unwrap();
        assert_eq!(
            store.values_url("rooms!A2:F"),
            "http://localhost:9000/sheet-id/values/rooms!A2:F"
        );
    }
}
