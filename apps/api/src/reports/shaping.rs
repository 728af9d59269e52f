//! Reshapes GROUP BY rows into the JSON the dashboard cards and tables
//! render. Rates and rounding are computed here, in code, so the SQL stays a
//! plain aggregate.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::applications::status::ApplicationStatus;

/// Raw per-branch aggregate from the students/applications/jobs join.
#[derive(Debug, Clone, FromRow)]
pub struct BranchAggregateRow {
    pub branch: String,
    pub students: i64,
    pub applications: i64,
    pub selected: i64,
    pub placed_students: i64,
    pub avg_package: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BranchReport {
    pub branch: String,
    pub students: i64,
    pub applications: i64,
    pub selected: i64,
    pub placed_students: i64,
    /// Placed students as a percentage of the branch, one decimal.
    pub placement_rate_pct: f64,
    pub avg_package: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CompanyAggregateRow {
    pub company: String,
    pub jobs: i64,
    pub applications: i64,
    pub selected: i64,
    pub avg_package: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanyReport {
    pub company: String,
    pub jobs: i64,
    pub applications: i64,
    pub selected: i64,
    pub avg_package: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}

/// Application counts with every status present, zero-filled.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub applied: i64,
    pub shortlisted: i64,
    pub interview: i64,
    pub selected: i64,
    pub rejected: i64,
    pub total: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct StudentSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub branch: String,
    pub applications: i64,
    pub offers: i64,
    pub best_package: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentPlacementReport {
    pub id: Uuid,
    pub name: String,
    pub branch: String,
    pub applications: i64,
    pub offers: i64,
    pub placed: bool,
    pub best_package: Option<f64>,
}

pub fn shape_branch_report(rows: Vec<BranchAggregateRow>) -> Vec<BranchReport> {
    rows.into_iter()
        .map(|row| {
            let placement_rate_pct = if row.students > 0 {
                round1(row.placed_students as f64 / row.students as f64 * 100.0)
            } else {
                0.0
            };
            BranchReport {
                branch: row.branch,
                students: row.students,
                applications: row.applications,
                selected: row.selected,
                placed_students: row.placed_students,
                placement_rate_pct,
                avg_package: row.avg_package.map(round2),
            }
        })
        .collect()
}

pub fn shape_company_report(rows: Vec<CompanyAggregateRow>) -> Vec<CompanyReport> {
    rows.into_iter()
        .map(|row| CompanyReport {
            company: row.company,
            jobs: row.jobs,
            applications: row.applications,
            selected: row.selected,
            avg_package: row.avg_package.map(round2),
        })
        .collect()
}

pub fn shape_status_breakdown(rows: &[StatusCountRow]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for row in rows {
        match ApplicationStatus::parse(&row.status) {
            Some(ApplicationStatus::Applied) => breakdown.applied += row.count,
            Some(ApplicationStatus::Shortlisted) => breakdown.shortlisted += row.count,
            Some(ApplicationStatus::Interview) => breakdown.interview += row.count,
            Some(ApplicationStatus::Selected) => breakdown.selected += row.count,
            Some(ApplicationStatus::Rejected) => breakdown.rejected += row.count,
            None => {}
        }
        breakdown.total += row.count;
    }
    breakdown
}

pub fn shape_student_report(rows: Vec<StudentSummaryRow>) -> Vec<StudentPlacementReport> {
    rows.into_iter()
        .map(|row| StudentPlacementReport {
            id: row.id,
            name: row.name,
            branch: row.branch,
            applications: row.applications,
            offers: row.offers,
            placed: row.offers > 0,
            best_package: row.best_package.map(round2),
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_report_computes_rate_and_rounds() {
        let rows = vec![BranchAggregateRow {
            branch: "CSE".to_string(),
            students: 3,
            applications: 7,
            selected: 2,
            placed_students: 2,
            avg_package: Some(6.12345),
        }];
        let report = shape_branch_report(rows);
        assert_eq!(report[0].placement_rate_pct, 66.7);
        assert_eq!(report[0].avg_package, Some(6.12));
    }

    #[test]
    fn test_branch_report_handles_zero_students() {
        let rows = vec![BranchAggregateRow {
            branch: "ECE".to_string(),
            students: 0,
            applications: 0,
            selected: 0,
            placed_students: 0,
            avg_package: None,
        }];
        let report = shape_branch_report(rows);
        assert_eq!(report[0].placement_rate_pct, 0.0);
        assert_eq!(report[0].avg_package, None);
    }

    #[test]
    fn test_status_breakdown_zero_fills_missing_statuses() {
        let rows = vec![
            StatusCountRow {
                status: "applied".to_string(),
                count: 4,
            },
            StatusCountRow {
                status: "selected".to_string(),
                count: 1,
            },
        ];
        let breakdown = shape_status_breakdown(&rows);
        assert_eq!(breakdown.applied, 4);
        assert_eq!(breakdown.selected, 1);
        assert_eq!(breakdown.shortlisted, 0);
        assert_eq!(breakdown.interview, 0);
        assert_eq!(breakdown.rejected, 0);
        assert_eq!(breakdown.total, 5);
    }

    #[test]
    fn test_status_breakdown_empty_input() {
        assert_eq!(shape_status_breakdown(&[]), StatusBreakdown::default());
    }

    #[test]
    fn test_student_report_placed_flag() {
        let placed_id = Uuid::new_v4();
        let unplaced_id = Uuid::new_v4();
        let rows = vec![
            StudentSummaryRow {
                id: placed_id,
                name: "Asha Rao".to_string(),
                branch: "CSE".to_string(),
                applications: 3,
                offers: 1,
                best_package: Some(8.599),
            },
            StudentSummaryRow {
                id: unplaced_id,
                name: "Vikram Shah".to_string(),
                branch: "ME".to_string(),
                applications: 2,
                offers: 0,
                best_package: None,
            },
        ];
        let report = shape_student_report(rows);
        assert!(report[0].placed);
        assert_eq!(report[0].best_package, Some(8.6));
        assert!(!report[1].placed);
        assert_eq!(report[1].best_package, None);
    }

    #[test]
    fn test_company_report_rounds_average() {
        let rows = vec![CompanyAggregateRow {
            company: "Nimbus Systems".to_string(),
            jobs: 2,
            applications: 9,
            selected: 3,
            avg_package: Some(5.6789),
        }];
        let report = shape_company_report(rows);
        assert_eq!(report[0].avg_package, Some(5.68));
    }

    #[test]
    fn test_empty_reports_stay_empty() {
        assert!(shape_branch_report(Vec::new()).is_empty());
        assert!(shape_company_report(Vec::new()).is_empty());
        assert!(shape_student_report(Vec::new()).is_empty());
    }
}
