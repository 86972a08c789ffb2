//! Input validation for simulation workloads.
//!
//! Checks a workload before it is replayed against a scheduler. Detects:
//! - Duplicate pids
//! - Negative arrival times
//! - Non-positive running times
//!
//! All problems are collected rather than stopping at the first one.

use std::collections::HashSet;

use crate::models::JobSpec;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same pid.
    DuplicatePid,
    /// A job arrives before t=0.
    NegativeArrival,
    /// A job needs zero or negative CPU time.
    NonPositiveRunningTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a workload.
///
/// Checks:
/// 1. No duplicate pids
/// 2. Every arrival is at t >= 0
/// 3. Every running time is > 0
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(jobs: &[JobSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for job in jobs {
        if !pids.insert(job.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", job.pid),
            ));
        }

        if job.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Job {} arrives at negative time {}", job.pid, job.arrival),
            ));
        }

        if job.running_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveRunningTime,
                format!(
                    "Job {} has non-positive running time {}",
                    job.pid, job.running_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_jobs() -> Vec<JobSpec> {
        vec![
            JobSpec::new(0, 0, 5),
            JobSpec::new(1, 2, 3).with_priority(1),
            JobSpec::new(2, 2, 8).with_priority(4),
        ]
    }

    #[test]
    fn test_valid_workload() {
        assert!(validate_workload(&sample_jobs()).is_ok());
        assert!(validate_workload(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let mut jobs = sample_jobs();
        jobs.push(JobSpec::new(1, 9, 1));

        let errors = validate_workload(&jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicatePid);
        assert!(errors[0].message.contains('1'));
    }

    #[test]
    fn test_negative_arrival() {
        let errors = validate_workload(&[JobSpec::new(0, -1, 5)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_non_positive_running_time() {
        let errors =
            validate_workload(&[JobSpec::new(0, 0, 0), JobSpec::new(1, 0, -4)]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::NonPositiveRunningTime));
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![JobSpec::new(3, -2, 0), JobSpec::new(3, 0, 1)];
        let errors = validate_workload(&jobs).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
