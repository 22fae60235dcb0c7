//! The performance review record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use tenure_core::{EmployeeId, Entity, ReviewId};

use crate::workflow::Stage;

/// A performance review for one employee.
///
/// # Invariants
/// - The subject employee is fixed at creation.
/// - `stage` only changes through [`PerformanceReview::apply_transition`].
/// - New reviews always start at [`Stage::Pending`], whatever the caller
///   asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceReview {
    pub id: ReviewId,
    pub employee_id: EmployeeId,
    /// Colleague collecting feedback, when one is named.
    pub reviewer_id: Option<EmployeeId>,
    /// Manager responsible for the final verdict, when one is named.
    pub manager_id: Option<EmployeeId>,
    pub stage: Stage,
    pub feedback: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PerformanceReview {
    pub fn new(
        id: ReviewId,
        employee_id: EmployeeId,
        reviewer_id: Option<EmployeeId>,
        manager_id: Option<EmployeeId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            employee_id,
            reviewer_id,
            manager_id,
            stage: Stage::Pending,
            feedback: None,
            scheduled_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Commit an accepted transition: move the stage and fold in whatever
    /// side effects were supplied. Absent effects leave earlier values.
    pub fn apply_transition(
        &mut self,
        target: Stage,
        effects: TransitionEffects,
        now: DateTime<Utc>,
    ) {
        self.stage = target;
        if let Some(feedback) = effects.feedback {
            self.feedback = Some(feedback);
        }
        if let Some(scheduled_date) = effects.scheduled_date {
            self.scheduled_date = Some(scheduled_date);
        }
        self.updated_at = now;
    }
}

impl Entity for PerformanceReview {
    type Id = ReviewId;

    fn id(&self) -> ReviewId {
        self.id
    }
}

/// Optional payload riding along with a stage transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEffects {
    pub feedback: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviews_start_pending() {
        let review = PerformanceReview::new(
            ReviewId::new(),
            EmployeeId::new(),
            None,
            None,
            Utc::now(),
        );
        assert_eq!(review.stage, Stage::Pending);
        assert_eq!(review.feedback, None);
        assert_eq!(review.scheduled_date, None);
    }

    #[test]
    fn transition_preserves_earlier_side_effects() {
        let created = Utc::now();
        let mut review =
            PerformanceReview::new(ReviewId::new(), EmployeeId::new(), None, None, created);

        let scheduled_for = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        review.apply_transition(
            Stage::Scheduled,
            TransitionEffects {
                feedback: None,
                scheduled_date: Some(scheduled_for),
            },
            Utc::now(),
        );
        review.apply_transition(
            Stage::Feedback,
            TransitionEffects {
                feedback: Some("Solid quarter.".into()),
                scheduled_date: None,
            },
            Utc::now(),
        );

        assert_eq!(review.stage, Stage::Feedback);
        assert_eq!(review.scheduled_date, Some(scheduled_for));
        assert_eq!(review.feedback.as_deref(), Some("Solid quarter."));
        assert_eq!(review.created_at, created);
        assert!(review.updated_at >= created);
    }
}
