use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::sheet_store::{Row, Sheet, SheetStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SheetData {
    header: Option<Row>,
    rows: Vec<Row>,
}

/// Process-local row store for tests and demo runs.
#[derive(Debug, Default)]
pub struct InMemorySheetStore {
    sheets: RwLock<HashMap<Sheet, SheetData>>,
}

impl InMemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header row of a sheet, if one was written.
    pub async fn header(&self, sheet: Sheet) -> Option<Row> {
        self.sheets
            .read()
            .await
            .get(&sheet)
            .and_then(|data| data.header.clone())
    }
}

fn missing_row(sheet: Sheet, index: usize) -> DomainError {
    DomainError::NotFound(format!("{} row {} does not exist", sheet, index))
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
    async fn get_rows(&self, sheet: Sheet) -> DomainResult<Vec<Row>> {
        Ok(self
            .sheets
            .read()
            .await
            .get(&sheet)
            .map(|data| data.rows.clone())
            .unwrap_or_default())
    }

    async fn append_row(&self, sheet: Sheet, row: Row) -> DomainResult<()> {
        self.sheets
            .write()
            .await
            .entry(sheet)
            .or_default()
            .rows
            .push(row);
        Ok(())
    }

    async fn update_row(&self, sheet: Sheet, index: usize, row: Row) -> DomainResult<()> {
        let mut sheets = self.sheets.write().await;
        let slot = sheets
            .get_mut(&sheet)
            .and_then(|data| data.rows.get_mut(index))
            .ok_or_else(|| missing_row(sheet, index))?;
        *slot = row;
        Ok(())
    }

    async fn clear_row(&self, sheet: Sheet, index: usize) -> DomainResult<()> {
        let mut sheets = self.sheets.write().await;
        let slot = sheets
            .get_mut(&sheet)
            .and_then(|data| data.rows.get_mut(index))
            .ok_or_else(|| missing_row(sheet, index))?;
        slot.clear();
        Ok(())
    }

    async fn ensure_header(&self, sheet: Sheet) -> DomainResult<()> {
        let mut sheets = self.sheets.write().await;
        let data = sheets.entry(sheet).or_default();
        let complete = data
            .header
            .as_ref()
            .map_or(false, |header| header.len() >= sheet.width());
        if !complete {
            data.header = Some(sheet.header().iter().map(|h| h.to_string()).collect());
        }
        Ok(())
    }
}
