use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::sheet_store::{Row, Sheet, SheetStore};
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::Row as _;

const HEADER_INDEX: i64 = 0;

fn encode(row: &Row) -> DomainResult<String> {
    Ok(serde_json::to_string(row)?)
}

fn decode(cells: &str) -> DomainResult<Row> {
    Ok(serde_json::from_str(cells)?)
}

/// Data row `index` is stored one below the header.
fn stored_index(index: usize) -> DomainResult<i64> {
    i64::try_from(index)
        .ok()
        .and_then(|i| i.checked_add(1))
        .ok_or_else(|| DomainError::InvalidInput(format!("row index out of range: {}", index)))
}

#[async_trait]
impl SheetStore for Database {
    async fn get_rows(&self, sheet: Sheet) -> DomainResult<Vec<Row>> {
        let rows = sqlx::query(
            "SELECT cells FROM sheet_rows
             WHERE sheet = ? AND row_index > ?
             ORDER BY row_index ASC",
        )
        .bind(sheet.name())
        .bind(HEADER_INDEX)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let cells: String = row.try_get("cells")?;
                decode(&cells)
            })
            .collect()
    }

    async fn append_row(&self, sheet: Sheet, row: Row) -> DomainResult<()> {
        let cells = encode(&row)?;

        // Position is allocated in the same statement so concurrent appends never collide
        sqlx::query(
            "INSERT INTO sheet_rows (sheet, row_index, cells)
             SELECT ?, COALESCE(MAX(row_index), 0) + 1, ?
             FROM sheet_rows WHERE sheet = ?",
        )
        .bind(sheet.name())
        .bind(&cells)
        .bind(sheet.name())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Appended row to {}", sheet);
        Ok(())
    }

    async fn update_row(&self, sheet: Sheet, index: usize, row: Row) -> DomainResult<()> {
        let cells = encode(&row)?;
        let result = sqlx::query(
            "UPDATE sheet_rows SET cells = ?
             WHERE sheet = ? AND row_index = ?",
        )
        .bind(&cells)
        .bind(sheet.name())
        .bind(stored_index(index)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "{} row {} does not exist",
                sheet, index
            )));
        }
        Ok(())
    }

    async fn clear_row(&self, sheet: Sheet, index: usize) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE sheet_rows SET cells = '[]'
             WHERE sheet = ? AND row_index = ?",
        )
        .bind(sheet.name())
        .bind(stored_index(index)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "{} row {} does not exist",
                sheet, index
            )));
        }
        Ok(())
    }

    async fn ensure_header(&self, sheet: Sheet) -> DomainResult<()> {
        let existing = sqlx::query(
            "SELECT cells FROM sheet_rows
             WHERE sheet = ? AND row_index = ?",
        )
        .bind(sheet.name())
        .bind(HEADER_INDEX)
        .fetch_optional(&self.pool)
        .await?;

        let current_width = match existing {
            Some(row) => {
                let cells: String = row.try_get("cells")?;
                Some(decode(&cells)?.len())
            }
            None => None,
        };

        if current_width.map_or(false, |width| width >= sheet.width()) {
            return Ok(());
        }

        let header: Row = sheet.header().iter().map(|h| h.to_string()).collect();
        let cells = encode(&header)?;
        if current_width.is_some() {
            sqlx::query(
                "UPDATE sheet_rows SET cells = ?
                 WHERE sheet = ? AND row_index = ?",
            )
            .bind(&cells)
            .bind(sheet.name())
            .bind(HEADER_INDEX)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query("INSERT INTO sheet_rows (sheet, row_index, cells) VALUES (?, ?, ?)")
                .bind(sheet.name())
                .bind(HEADER_INDEX)
                .bind(&cells)
                .execute(&self.pool)
                .await?;
        }

        tracing::info!("Header written for sheet {}", sheet);
        Ok(())
    }
}
