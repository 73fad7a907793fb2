//! Composable WHERE-clause predicates.
//!
//! Filter value objects are lowered into a list of [`Predicate`]s, which a
//! [`Conditions`] value renders into SQL text plus positional parameters.

use crate::models::filter::{ScreenshotFilter, ShiftFilter};
use rusqlite::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(&'static str, Value),
    Gte(&'static str, i64),
    Lte(&'static str, i64),
    /// `col <= v OR col IS NULL`
    LteOrNull(&'static str, i64),
    NotNull(&'static str),
    IsNull(&'static str),
    /// Keyset position for `ORDER BY ts DESC, id ASC`: rows strictly after
    /// `(timestamp, id)` in that order.
    After {
        ts_col: &'static str,
        id_col: &'static str,
        timestamp: i64,
        id: String,
    },
}

impl Predicate {
    pub fn eq_text(col: &'static str, v: impl Into<String>) -> Self {
        Predicate::Eq(col, Value::Text(v.into()))
    }

    fn render(&self, sql: &mut Vec<String>, params: &mut Vec<Value>) {
        match self {
            Predicate::Eq(col, v) => {
                sql.push(format!("{col} = ?"));
                params.push(v.clone());
            }
            Predicate::Gte(col, v) => {
                sql.push(format!("{col} >= ?"));
                params.push(Value::Integer(*v));
            }
            Predicate::Lte(col, v) => {
                sql.push(format!("{col} <= ?"));
                params.push(Value::Integer(*v));
            }
            Predicate::LteOrNull(col, v) => {
                sql.push(format!("({col} <= ? OR {col} IS NULL)"));
                params.push(Value::Integer(*v));
            }
            Predicate::NotNull(col) => sql.push(format!("{col} IS NOT NULL")),
            Predicate::IsNull(col) => sql.push(format!("{col} IS NULL")),
            Predicate::After {
                ts_col,
                id_col,
                timestamp,
                id,
            } => {
                sql.push(format!(
                    "({ts_col} < ? OR ({ts_col} = ? AND {id_col} > ?))"
                ));
                params.push(Value::Integer(*timestamp));
                params.push(Value::Integer(*timestamp));
                params.push(Value::Text(id.clone()));
            }
        }
    }
}

/// Conjunction of predicates.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    predicates: Vec<Predicate>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, p: Predicate) -> Self {
        self.predicates.push(p);
        self
    }

    /// Adds an equality predicate only when a value is present.
    pub fn and_eq_opt(self, col: &'static str, v: Option<&String>) -> Self {
        match v {
            Some(v) => self.and(Predicate::eq_text(col, v.clone())),
            None => self,
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// `WHERE ...` (or an empty string) and the matching parameter list.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = Vec::new();
        let mut params = Vec::new();

        for p in &self.predicates {
            p.render(&mut sql, &mut params);
        }

        if sql.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", sql.join(" AND ")), params)
        }
    }
}

impl From<&ShiftFilter> for Conditions {
    fn from(f: &ShiftFilter) -> Self {
        let mut c = Conditions::new()
            .and(Predicate::eq_text("organization_id", f.organization_id.clone()))
            .and_eq_opt("employee_id", f.employee_id.as_ref())
            .and_eq_opt("team_id", f.team_id.as_ref())
            .and_eq_opt("project_id", f.project_id.as_ref())
            .and_eq_opt("task_id", f.task_id.as_ref())
            .and_eq_opt("id", f.shift_id.as_ref());

        if let Some(start) = f.start_time {
            c = c.and(Predicate::Gte("start_ms", start));
        }
        if let Some(end) = f.end_time {
            c = c.and(Predicate::LteOrNull("end_ms", end));
        }
        if f.completed_only {
            c = c.and(Predicate::NotNull("end_ms"));
        }
        c
    }
}

impl From<&ScreenshotFilter> for Conditions {
    fn from(f: &ScreenshotFilter) -> Self {
        Conditions::new()
            .and(Predicate::eq_text("organization_id", f.organization_id.clone()))
            .and(Predicate::Gte("timestamp", f.start_time))
            .and(Predicate::Lte("timestamp", f.end_time))
            .and_eq_opt("employee_id", f.employee_id.as_ref())
            .and_eq_opt("team_id", f.team_id.as_ref())
            .and_eq_opt("project_id", f.project_id.as_ref())
            .and_eq_opt("task_id", f.task_id.as_ref())
            .and_eq_opt("shift_id", f.shift_id.as_ref())
    }
}
