//! # Attribute Schema
//!
//! The six DBF columns the viewer relies on, resolved once per file so that
//! record decoding never guesses at names. DBF column names are matched
//! case-insensitively because producers disagree on casing (`Tipo` vs `TIPO`).

use shapefile::dbase::{FieldValue, Record};
use visor_core::LoadError;

/// Registry identifier column.
pub const ID_COLUMN: &str = "ID_ANT";
/// Territory name column.
pub const NAME_COLUMN: &str = "NOMBRE";
/// Community type column.
pub const TYPE_COLUMN: &str = "Tipo";
/// Department column (DBF names are capped at 10 characters).
pub const DEPARTMENT_COLUMN: &str = "DEPARTAMEN";
/// Municipality column.
pub const MUNICIPALITY_COLUMN: &str = "MUNICIPIO";
/// Total area (hectares) column.
pub const AREA_COLUMN: &str = "AREA_TOTAL";

/// Every column a territory archive must provide, in export order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    ID_COLUMN,
    NAME_COLUMN,
    TYPE_COLUMN,
    DEPARTMENT_COLUMN,
    MUNICIPALITY_COLUMN,
    AREA_COLUMN,
];

/// Actual DBF column names for the required columns of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: String,
    pub name: String,
    pub community_type: String,
    pub department: String,
    pub municipality: String,
    pub area: String,
}

impl ColumnMap {
    /// Resolve the required columns against the names in a DBF header.
    ///
    /// # Errors
    ///
    /// [`LoadError::Schema`] listing every required column that is absent.
    pub fn resolve<'a, I>(field_names: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: Vec<&str> = field_names.into_iter().collect();
        let find = |wanted: &str| {
            available
                .iter()
                .find(|name| name.trim().eq_ignore_ascii_case(wanted))
                .map(|name| name.to_string())
        };

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| find(col).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::Schema(format!(
                "attribute table is missing column(s) {}; found {}",
                missing.join(", "),
                available.join(", ")
            )));
        }

        let get = |col: &str| find(col).unwrap_or_else(|| col.to_string());
        Ok(Self {
            id: get(ID_COLUMN),
            name: get(NAME_COLUMN),
            community_type: get(TYPE_COLUMN),
            department: get(DEPARTMENT_COLUMN),
            municipality: get(MUNICIPALITY_COLUMN),
            area: get(AREA_COLUMN),
        })
    }
}

/// Read a column as text. Numbers are accepted (ids are often numeric).
///
/// Returns `None` for null or blank values.
pub fn text_value(record: &Record, column: &str) -> Option<String> {
    let text = match record.get(column)? {
        FieldValue::Character(Some(s)) => s.trim().to_string(),
        FieldValue::Memo(s) => s.trim().to_string(),
        FieldValue::Numeric(Some(n)) => format_number(*n),
        FieldValue::Float(Some(n)) => format_number(f64::from(*n)),
        FieldValue::Double(n) => format_number(*n),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Logical(Some(b)) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Read a column as a number. Text is parsed, accepting a decimal comma.
///
/// Returns `None` for null, blank, or unparsable values.
pub fn number_value(record: &Record, column: &str) -> Option<f64> {
    let value = match record.get(column)? {
        FieldValue::Numeric(Some(n)) => *n,
        FieldValue::Float(Some(n)) => f64::from(*n),
        FieldValue::Double(n) => *n,
        FieldValue::Currency(n) => *n,
        FieldValue::Integer(n) => f64::from(*n),
        FieldValue::Character(Some(s)) => s.trim().replace(',', ".").parse().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Render a number without a trailing `.0` when it is integral.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
