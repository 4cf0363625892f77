//! Tabular adapter: polars `DataFrame` → records

use crate::data::value::{Row, Value};
use crate::error::{NumlError, Result};
use polars::prelude::*;

/// Materialize every row of `df` into a [`Row`] keyed by column name.
/// Numeric columns become `Number`, boolean `Bool`, string `Text`; nulls are `Missing`.
pub fn rows_from_frame(df: &DataFrame) -> Result<Vec<Row>> {
    let mut rows: Vec<Row> = vec![Row::with_capacity(df.width()); df.height()];

    for series in df.get_columns() {
        let name = series.name().to_string();
        let values = column_values(series)?;
        for (row, value) in rows.iter_mut().zip(values) {
            row.insert(name.clone(), value);
        }
    }

    Ok(rows)
}

fn column_values(series: &Series) -> Result<Vec<Value>> {
    match series.dtype() {
        DataType::Boolean => Ok(series
            .bool()?
            .into_iter()
            .map(|v| v.map(Value::Bool).unwrap_or(Value::Missing))
            .collect()),
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| Value::Text(s.to_string())).unwrap_or(Value::Missing))
            .collect()),
        dtype if dtype.is_numeric() => {
            let series_f64 = series.cast(&DataType::Float64)?;
            let values = series_f64
                .f64()?
                .into_iter()
                .map(|v| v.map(Value::Number).unwrap_or(Value::Missing))
                .collect();
            Ok(values)
        }
        other => Err(NumlError::DataError(format!(
            "column '{}' has unsupported type {}",
            series.name(),
            other
        ))),
    }
}
