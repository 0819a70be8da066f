//! SQL text for each column set
//!
//! Built once per set and reused, so sqlx's per-connection statement cache
//! prepares each statement a single time.

use super::columns::{Column, ColumnSet};

pub const EMPLOYEES_TABLE: &str = "employees";

pub const TRUNCATE_EMPLOYEES: &str = "TRUNCATE TABLE employees";

pub const COUNT_EMPLOYEES: &str = "SELECT COUNT(*) FROM employees";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub insert: String,
    pub select: String,
    pub update: String,
    pub delete: String,
}

impl Statements {
    pub fn for_set(set: ColumnSet) -> Self {
        Self {
            insert: insert_sql(set),
            select: select_sql(set),
            update: update_sql(set),
            delete: delete_sql(set),
        }
    }
}

fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `col = $n` predicates joined with AND, numbered from `first`.
fn where_clause(columns: &[Column], first: usize) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}{}", c.compare_expr(), first + i, c.compare_cast()))
        .collect::<Vec<_>>()
        .join(" AND ")
}

pub fn insert_sql(set: ColumnSet) -> String {
    let columns = set.columns();
    let values = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("${}{}", i + 1, c.param_cast()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        EMPLOYEES_TABLE,
        column_list(columns),
        values
    )
}

pub fn select_sql(set: ColumnSet) -> String {
    let columns = set.columns();
    format!(
        "SELECT {} FROM {} WHERE {}",
        column_list(columns),
        EMPLOYEES_TABLE,
        where_clause(columns, 1)
    )
}

/// SET binds the payload columns first, WHERE binds the full set after them.
pub fn update_sql(set: ColumnSet) -> String {
    let payload = set.payload_columns();
    let assignments = payload
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}{}", c.name(), i + 1, c.param_cast()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {}",
        EMPLOYEES_TABLE,
        assignments,
        where_clause(set.columns(), payload.len() + 1)
    )
}

pub fn delete_sql(set: ColumnSet) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        EMPLOYEES_TABLE,
        where_clause(set.columns(), 1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_insert_has_eight_positional_params() {
        assert_eq!(
            insert_sql(ColumnSet::Full),
            "INSERT INTO employees (employee_id, first_name, last_name, age, rating, \
             json_contact_info, bjson_contact_info, address) \
             VALUES ($1, $2, $3, $4, $5, $6::json, $7::jsonb, $8::geometry)"
        );
    }

    #[test]
    fn test_integer_insert() {
        assert_eq!(
            insert_sql(ColumnSet::Integer),
            "INSERT INTO employees (employee_id, age) VALUES ($1, $2)"
        );
    }

    #[test]
    fn test_json_select_compares_as_jsonb() {
        assert_eq!(
            select_sql(ColumnSet::Json),
            "SELECT employee_id, json_contact_info FROM employees \
             WHERE employee_id = $1 AND json_contact_info::jsonb = $2::jsonb"
        );
    }

    #[test]
    fn test_text_update_numbering() {
        assert_eq!(
            update_sql(ColumnSet::Text),
            "UPDATE employees SET first_name = $1, last_name = $2 \
             WHERE employee_id = $3 AND first_name = $4 AND last_name = $5"
        );
    }

    #[test]
    fn test_full_update_uses_fifteen_params() {
        let sql = update_sql(ColumnSet::Full);
        assert!(sql.contains("address = $7::geometry WHERE"));
        assert!(sql.ends_with("address = $15::geometry"));
        assert!(!sql.contains("$16"));
    }

    #[test]
    fn test_geometry_delete() {
        assert_eq!(
            delete_sql(ColumnSet::Geometry),
            "DELETE FROM employees WHERE employee_id = $1 AND address = $2::geometry"
        );
    }
}
