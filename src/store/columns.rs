//! Column sets of the `employees` table

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    EmployeeId,
    FirstName,
    LastName,
    Age,
    Rating,
    JsonContactInfo,
    BjsonContactInfo,
    Address,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::EmployeeId => "employee_id",
            Column::FirstName => "first_name",
            Column::LastName => "last_name",
            Column::Age => "age",
            Column::Rating => "rating",
            Column::JsonContactInfo => "json_contact_info",
            Column::BjsonContactInfo => "bjson_contact_info",
            Column::Address => "address",
        }
    }

    /// Cast applied to a bound parameter. Text values need one to land in
    /// `json`, `jsonb` and `geometry` columns.
    pub fn param_cast(self) -> &'static str {
        match self {
            Column::JsonContactInfo => "::json",
            Column::BjsonContactInfo => "::jsonb",
            Column::Address => "::geometry",
            _ => "",
        }
    }

    /// Left-hand side of an equality predicate. `json` has no `=` operator.
    pub fn compare_expr(self) -> &'static str {
        match self {
            Column::JsonContactInfo => "json_contact_info::jsonb",
            other => other.name(),
        }
    }

    /// Cast on the right-hand side of an equality predicate.
    pub fn compare_cast(self) -> &'static str {
        match self {
            Column::JsonContactInfo => "::jsonb",
            other => other.param_cast(),
        }
    }
}

/// Subset of columns one benchmark query touches. Every set leads with
/// `employee_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSet {
    Full,
    Text,
    Integer,
    Float,
    Json,
    Bjson,
    Geometry,
}

const FULL: &[Column] = &[
    Column::EmployeeId,
    Column::FirstName,
    Column::LastName,
    Column::Age,
    Column::Rating,
    Column::JsonContactInfo,
    Column::BjsonContactInfo,
    Column::Address,
];

impl ColumnSet {
    /// Suite order
    pub const ALL: [ColumnSet; 7] = [
        ColumnSet::Full,
        ColumnSet::Text,
        ColumnSet::Integer,
        ColumnSet::Float,
        ColumnSet::Json,
        ColumnSet::Bjson,
        ColumnSet::Geometry,
    ];

    pub fn columns(self) -> &'static [Column] {
        match self {
            ColumnSet::Full => FULL,
            ColumnSet::Text => &[Column::EmployeeId, Column::FirstName, Column::LastName],
            ColumnSet::Integer => &[Column::EmployeeId, Column::Age],
            ColumnSet::Float => &[Column::EmployeeId, Column::Rating],
            ColumnSet::Json => &[Column::EmployeeId, Column::JsonContactInfo],
            ColumnSet::Bjson => &[Column::EmployeeId, Column::BjsonContactInfo],
            ColumnSet::Geometry => &[Column::EmployeeId, Column::Address],
        }
    }

    /// Columns an update may rewrite: everything except the id.
    pub fn payload_columns(self) -> &'static [Column] {
        &self.columns()[1..]
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnSet::Full => "full",
            ColumnSet::Text => "text",
            ColumnSet::Integer => "integer",
            ColumnSet::Float => "float",
            ColumnSet::Json => "json",
            ColumnSet::Bjson => "bjson",
            ColumnSet::Geometry => "geometry",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColumnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColumnSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnSet::ALL
            .into_iter()
            .find(|set| set.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown column set: {}", s))
    }
}
