//! polars `DataFrame` to [`Table`] conversion.

use polars::prelude::*;
use roadval_model::{Record, Table, Value};

use crate::error::Result;

/// Maps one polars cell to a typed [`Value`].
pub fn value_from_any(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::text(s),
        AnyValue::StringOwned(s) => Value::text(s.as_str()),
        AnyValue::Int8(v) => Value::Number(f64::from(v)),
        AnyValue::Int16(v) => Value::Number(f64::from(v)),
        AnyValue::Int32(v) => Value::Number(f64::from(v)),
        AnyValue::Int64(v) => Value::Number(v as f64),
        AnyValue::UInt8(v) => Value::Number(f64::from(v)),
        AnyValue::UInt16(v) => Value::Number(f64::from(v)),
        AnyValue::UInt32(v) => Value::Number(f64::from(v)),
        AnyValue::UInt64(v) => Value::Number(v as f64),
        AnyValue::Float32(v) => Value::Number(f64::from(v)),
        AnyValue::Float64(v) => Value::Number(v),
        other => Value::Text(other.to_string()),
    }
}

/// Converts a frame into a [`Table`], keeping column order and row order.
pub fn table_from_dataframe(name: &str, df: &DataFrame) -> Result<Table> {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    let mut table = Table::new(name, columns)?;

    let height = df.height();
    let mut records: Vec<Record> = vec![Record::new(); height];
    for column in df.get_columns() {
        let column_name = column.name().to_string();
        for (idx, record) in records.iter_mut().enumerate() {
            let value = value_from_any(column.get(idx)?);
            record.set(column_name.clone(), value);
        }
    }
    for record in records {
        table.push(record);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn converts_strings_and_nulls() {
        let df = test_df(vec![
            ("Link_No", vec![Some("110512345678"), None]),
            ("Link_Name", vec![Some("Jalan A"), Some("Jalan B")]),
        ]);
        let table = table_from_dataframe("Link", &df).unwrap();

        assert_eq!(table.columns, vec!["Link_No", "Link_Name"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("Link_No"), &Value::Null);
        assert_eq!(table.rows[1].get("Link_Name"), &Value::text("Jalan B"));
    }

    #[test]
    fn converts_numeric_columns() {
        let df = DataFrame::new(vec![
            Series::new("ChainageFrom".into(), &[0i64, 500]).into(),
            Series::new("Roughness".into(), &[true, false]).into(),
        ])
        .unwrap();
        let table = table_from_dataframe("RoadCondition", &df).unwrap();
        assert_eq!(table.rows[1].get("ChainageFrom"), &Value::Number(500.0));
        assert_eq!(table.rows[0].get("Roughness"), &Value::Bool(true));
    }

    #[test]
    fn any_value_fallback_is_text() {
        assert_eq!(value_from_any(AnyValue::Float64(2.5)), Value::Number(2.5));
        assert_eq!(value_from_any(AnyValue::Null), Value::Null);
    }
}
