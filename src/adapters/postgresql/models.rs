//! PostgreSQL row models
//!
//! Column layout of `maplayer.bundle` and `maplayer.layer` and the mapping
//! into domain types.

use crate::domain::ids::{BundleId, LayerId, OrganizationId};
use crate::domain::{Bundle, BundleError, Layer, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio_postgres::Row;
use uuid::Uuid;

/// Columns selected for a bundle
pub const BUNDLE_COLUMNS: &str =
    "id, organization_id, name, layer_id, create_date, update_date, delete_date, complete_date";

/// Columns selected for a layer
pub const LAYER_COLUMNS: &str = "id, table_name, name, markup";

/// A row of `maplayer.bundle`
#[derive(Debug, Clone)]
pub struct BundleRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub layer_id: Uuid,
    pub create_date: DateTime<Utc>,
    pub update_date: Option<DateTime<Utc>>,
    pub delete_date: Option<DateTime<Utc>>,
    pub complete_date: Option<DateTime<Utc>>,
}

impl TryFrom<&Row> for BundleRow {
    type Error = BundleError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get(row, "id")?,
            organization_id: get(row, "organization_id")?,
            name: get(row, "name")?,
            layer_id: get(row, "layer_id")?,
            create_date: get(row, "create_date")?,
            update_date: get(row, "update_date")?,
            delete_date: get(row, "delete_date")?,
            complete_date: get(row, "complete_date")?,
        })
    }
}

impl From<BundleRow> for Bundle {
    fn from(row: BundleRow) -> Self {
        Bundle {
            id: BundleId::from_uuid(row.id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            name: row.name,
            layer_id: LayerId::from_uuid(row.layer_id),
            create_date: row.create_date,
            update_date: row.update_date,
            delete_date: row.delete_date,
            complete_date: row.complete_date,
        }
    }
}

/// A row of `maplayer.layer`
#[derive(Debug, Clone)]
pub struct LayerRow {
    pub id: Uuid,
    pub table_name: String,
    pub name: String,
    pub markup: Option<Value>,
}

impl TryFrom<&Row> for LayerRow {
    type Error = BundleError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get(row, "id")?,
            table_name: get(row, "table_name")?,
            name: get(row, "name")?,
            markup: get(row, "markup")?,
        })
    }
}

impl From<LayerRow> for Layer {
    fn from(row: LayerRow) -> Self {
        Layer {
            id: LayerId::from_uuid(row.id),
            table_name: row.table_name,
            name: row.name,
            markup: row.markup.unwrap_or(Value::Null),
        }
    }
}

fn get<'a, T>(row: &'a Row, column: &str) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(column)
        .map_err(|e| BundleError::Database(format!("Failed to read column '{column}': {e}")))
}
