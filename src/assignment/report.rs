//! Human-readable assignment reports.
//!
//! Kept apart from the solvers: they return data, this renders it.

use super::matrix::CostMatrix;
use super::permutation::Permutation;
use std::fmt;

/// One task's line in a report.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportRow {
    pub task: usize,
    pub worker: usize,
    pub cost: f64,
}

/// Per-task breakdown of an assignment plus its total cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentReport {
    pub rows: Vec<ReportRow>,
    pub total: f64,
}

impl AssignmentReport {
    /// Builds the report for `permutation` against `matrix`.
    ///
    /// # Panics
    /// Panics if the sizes differ.
    pub fn new(permutation: &Permutation, matrix: &CostMatrix) -> Self {
        assert_eq!(
            permutation.len(),
            matrix.size(),
            "permutation and matrix sizes differ"
        );
        let rows: Vec<ReportRow> = permutation
            .as_slice()
            .iter()
            .enumerate()
            .map(|(task, &worker)| ReportRow {
                task,
                worker,
                cost: matrix[(task, worker)],
            })
            .collect();
        let total = rows.iter().map(|r| r.cost).sum();
        Self { rows, total }
    }
}

/// Tasks and workers are numbered from 1.
impl fmt::Display for AssignmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(
                f,
                "Task {} is assigned to Worker {} (cost {})",
                row.task + 1,
                row.worker + 1,
                row.cost
            )?;
        }
        write!(f, "Total cost: {}", self.total)
    }
}
