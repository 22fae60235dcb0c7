//! Review workflow: stages, legal hops, and the transition gate.
//!
//! The gate follows the same contract as the resource policy engine:
//!
//! - No IO
//! - No panics
//! - Denials are values with a reason

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tenure_auth::{
    APPROVAL_GATE, Actor, Decision, SCHEDULING_GATE, same_company,
};
use tenure_core::CompanyId;

use crate::PerformanceReview;

// ─────────────────────────────────────────────────────────────────────────────
// Stages
// ─────────────────────────────────────────────────────────────────────────────

/// Stage of a performance review.
///
/// The pipeline runs `Pending → Scheduled → Feedback → UnderApproval`, then
/// splits into `Approved` (terminal) or `Rejected`. A rejected review may
/// re-enter `Feedback` for another round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Pending,
    Scheduled,
    Feedback,
    UnderApproval,
    Approved,
    Rejected,
}

/// Stage string that names no known stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stage '{0}'")]
pub struct UnknownStage(pub String);

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Pending,
        Stage::Scheduled,
        Stage::Feedback,
        Stage::UnderApproval,
        Stage::Approved,
        Stage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pending => "PENDING",
            Stage::Scheduled => "SCHEDULED",
            Stage::Feedback => "FEEDBACK",
            Stage::UnderApproval => "UNDER_APPROVAL",
            Stage::Approved => "APPROVED",
            Stage::Rejected => "REJECTED",
        }
    }

    /// Whether a hop from `self` to `target` follows the pipeline.
    ///
    /// `Pending` is where reviews are born; nothing hops into it.
    pub fn can_advance_to(self, target: Stage) -> bool {
        matches!(
            (self, target),
            (Stage::Pending, Stage::Scheduled)
                | (Stage::Scheduled, Stage::Feedback)
                | (Stage::Feedback, Stage::UnderApproval)
                | (Stage::UnderApproval, Stage::Approved)
                | (Stage::UnderApproval, Stage::Rejected)
                | (Stage::Rejected, Stage::Feedback)
        )
    }

    /// Approved reviews never move again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Approved)
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Stage::Pending),
            "SCHEDULED" => Ok(Stage::Scheduled),
            "FEEDBACK" => Ok(Stage::Feedback),
            "UNDER_APPROVAL" => Ok(Stage::UnderApproval),
            "APPROVED" => Ok(Stage::Approved),
            "REJECTED" => Ok(Stage::Rejected),
            other => Err(UnknownStage(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// The transition gate
// ─────────────────────────────────────────────────────────────────────────────

/// Decide whether `actor` may move `review` to `target_stage`.
///
/// `subject_company` is the company of the review's subject employee; the
/// gate never looks it up itself. The target arrives as the raw wire string
/// so an unknown name yields its own denial rather than a parse error.
///
/// Role rules per target:
/// - `SCHEDULED`: manager, HR, or admin
/// - `FEEDBACK`: the subject, the named reviewer, or manager/HR/admin
/// - `UNDER_APPROVAL`: same set as `FEEDBACK`
/// - `APPROVED` / `REJECTED`: manager or admin
///
/// Stage adjacency is deliberately not checked here; pair this with
/// [`Stage::can_advance_to`].
pub fn can_transition(
    actor: &Actor,
    review: &PerformanceReview,
    subject_company: CompanyId,
    target_stage: &str,
) -> Decision {
    if !(actor.is_superadmin() || same_company(actor, subject_company)) {
        return Decision::denied("Not same company.");
    }

    let Ok(target) = target_stage.parse::<Stage>() else {
        return Decision::denied("Unknown target stage.");
    };

    let participant = is_participant(actor, review);
    match target {
        Stage::Scheduled => {
            if SCHEDULING_GATE.permits(actor) {
                Decision::allowed()
            } else {
                Decision::denied("Only manager/HR/admin can schedule.")
            }
        }
        Stage::Feedback => {
            if SCHEDULING_GATE.permits(actor) || participant {
                Decision::allowed()
            } else {
                Decision::denied("Only employee/reviewer/manager/HR/admin can provide feedback.")
            }
        }
        Stage::UnderApproval => {
            if SCHEDULING_GATE.permits(actor) || participant {
                Decision::allowed()
            } else {
                Decision::denied("Not allowed to submit for approval.")
            }
        }
        Stage::Approved | Stage::Rejected => {
            if APPROVAL_GATE.permits(actor) {
                Decision::allowed()
            } else {
                Decision::denied("Only manager or admin can approve/reject.")
            }
        }
        // A transition target, unlike a stored stage, is never PENDING.
        Stage::Pending => Decision::denied("Unknown target stage."),
    }
}

/// The subject employee or the named reviewer.
fn is_participant(actor: &Actor, review: &PerformanceReview) -> bool {
    match actor.employee_id() {
        Some(id) => id == review.employee_id || review.reviewer_id == Some(id),
        None => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tenure_auth::{EmployeeLink, Role};
    use tenure_core::{EmployeeId, ReviewId, UserId};

    use super::*;

    fn actor_in(role: Role, company: CompanyId) -> Actor {
        Actor {
            user_id: UserId::new(),
            email: format!("{}@initech.test", role.as_str()),
            role,
            is_active: true,
            is_superuser: false,
            profile: Some(EmployeeLink {
                employee_id: EmployeeId::new(),
                company_id: company,
                department_id: None,
            }),
        }
    }

    fn review_for(subject: EmployeeId) -> PerformanceReview {
        PerformanceReview::new(ReviewId::new(), subject, None, None, Utc::now())
    }

    #[test]
    fn pipeline_edges_are_exact() {
        use Stage::*;
        let legal = [
            (Pending, Scheduled),
            (Scheduled, Feedback),
            (Feedback, UnderApproval),
            (UnderApproval, Approved),
            (UnderApproval, Rejected),
            (Rejected, Feedback),
        ];
        for from in Stage::ALL {
            for to in Stage::ALL {
                assert_eq!(
                    from.can_advance_to(to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn approved_is_the_only_terminal_stage() {
        for stage in Stage::ALL {
            assert_eq!(stage.is_terminal(), stage == Stage::Approved);
            if stage.is_terminal() {
                for to in Stage::ALL {
                    assert!(!stage.can_advance_to(to));
                }
            }
        }
    }

    #[test]
    fn stage_wire_names_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
        assert!("DRAFT".parse::<Stage>().is_err());
        // Wire names are exact; no case folding.
        assert!("approved".parse::<Stage>().is_err());
    }

    #[test]
    fn cross_company_actor_is_stopped_before_anything_else() {
        let manager = actor_in(Role::Manager, CompanyId::new());
        let review = review_for(EmployeeId::new());
        let other_company = CompanyId::new();

        for target in ["SCHEDULED", "APPROVED", "NO_SUCH_STAGE"] {
            let decision = can_transition(&manager, &review, other_company, target);
            assert!(!decision.allow);
            assert_eq!(decision.reason.as_deref(), Some("Not same company."));
        }
    }

    #[test]
    fn unknown_target_is_its_own_denial() {
        let company = CompanyId::new();
        let admin = actor_in(Role::CompanyAdmin, company);
        let review = review_for(EmployeeId::new());

        for target in ["DONE", "pending", ""] {
            let decision = can_transition(&admin, &review, company, target);
            assert!(!decision.allow);
            assert_eq!(decision.reason.as_deref(), Some("Unknown target stage."));
        }
    }

    #[test]
    fn superadmin_still_gets_unknown_stage_denial() {
        let boss = actor_in(Role::Superadmin, CompanyId::new());
        let review = review_for(EmployeeId::new());
        let decision = can_transition(&boss, &review, CompanyId::new(), "SIDEWAYS");
        assert!(!decision.allow);
        assert_eq!(decision.reason.as_deref(), Some("Unknown target stage."));
    }

    #[test]
    fn pending_is_never_a_valid_target() {
        let company = CompanyId::new();
        let admin = actor_in(Role::CompanyAdmin, company);
        let review = review_for(EmployeeId::new());
        let decision = can_transition(&admin, &review, company, "PENDING");
        assert!(!decision.allow);
        assert_eq!(decision.reason.as_deref(), Some("Unknown target stage."));
    }

    #[test]
    fn scheduling_is_gated_to_manager_hr_admin() {
        let company = CompanyId::new();
        let review = review_for(EmployeeId::new());

        for role in [Role::Manager, Role::Hr, Role::CompanyAdmin] {
            let actor = actor_in(role, company);
            assert!(can_transition(&actor, &review, company, "SCHEDULED").is_allowed());
        }
        for role in [Role::Employee, Role::Viewer] {
            let actor = actor_in(role, company);
            let decision = can_transition(&actor, &review, company, "SCHEDULED");
            assert!(!decision.allow);
            assert_eq!(
                decision.reason.as_deref(),
                Some("Only manager/HR/admin can schedule.")
            );
        }
    }

    #[test]
    fn subject_can_move_their_review_into_feedback() {
        let company = CompanyId::new();
        let mut subject = actor_in(Role::Employee, company);
        let review = review_for(subject.profile.unwrap().employee_id);

        assert!(can_transition(&subject, &review, company, "FEEDBACK").is_allowed());
        assert!(can_transition(&subject, &review, company, "UNDER_APPROVAL").is_allowed());

        // The same employee loses access once the review is someone else's.
        let someone_elses = review_for(EmployeeId::new());
        let decision = can_transition(&subject, &someone_elses, company, "FEEDBACK");
        assert!(!decision.allow);
        assert_eq!(
            decision.reason.as_deref(),
            Some("Only employee/reviewer/manager/HR/admin can provide feedback.")
        );

        // And entirely when the profile link is gone.
        subject.profile = None;
        let decision = can_transition(&subject, &review, company, "FEEDBACK");
        assert_eq!(decision.reason.as_deref(), Some("Not same company."));
    }

    #[test]
    fn named_reviewer_can_collect_feedback() {
        let company = CompanyId::new();
        let reviewer = actor_in(Role::Employee, company);
        let mut review = review_for(EmployeeId::new());
        review.reviewer_id = reviewer.employee_id();

        assert!(can_transition(&reviewer, &review, company, "FEEDBACK").is_allowed());
        assert!(can_transition(&reviewer, &review, company, "UNDER_APPROVAL").is_allowed());
        // Participation does not extend to verdicts.
        let decision = can_transition(&reviewer, &review, company, "APPROVED");
        assert!(!decision.allow);
        assert_eq!(
            decision.reason.as_deref(),
            Some("Only manager or admin can approve/reject.")
        );
    }

    #[test]
    fn verdicts_are_gated_to_manager_and_admin() {
        let company = CompanyId::new();
        let review = review_for(EmployeeId::new());

        for role in [Role::Manager, Role::CompanyAdmin] {
            let actor = actor_in(role, company);
            assert!(can_transition(&actor, &review, company, "APPROVED").is_allowed());
            assert!(can_transition(&actor, &review, company, "REJECTED").is_allowed());
        }
        let hr = actor_in(Role::Hr, company);
        let decision = can_transition(&hr, &review, company, "APPROVED");
        assert!(!decision.allow);
        assert_eq!(
            decision.reason.as_deref(),
            Some("Only manager or admin can approve/reject.")
        );
    }

    #[test]
    fn superadmin_passes_every_role_gate() {
        let boss = actor_in(Role::Superadmin, CompanyId::new());
        let review = review_for(EmployeeId::new());
        let company = CompanyId::new();

        for target in ["SCHEDULED", "FEEDBACK", "UNDER_APPROVAL", "APPROVED", "REJECTED"] {
            assert!(
                can_transition(&boss, &review, company, target).is_allowed(),
                "superadmin denied {target}"
            );
        }
    }

    #[test]
    fn gate_ignores_adjacency_by_contract() {
        // A manager may be allowed APPROVED from a PENDING review here; the
        // pipeline check is the caller's second gate.
        let company = CompanyId::new();
        let manager = actor_in(Role::Manager, company);
        let review = review_for(EmployeeId::new());
        assert_eq!(review.stage, Stage::Pending);
        assert!(can_transition(&manager, &review, company, "APPROVED").is_allowed());
        assert!(!review.stage.can_advance_to(Stage::Approved));
    }
}

#[cfg(test)]
mod proptest_tests {
    use chrono::Utc;
    use proptest::prelude::*;
    use tenure_auth::{EmployeeLink, Role};
    use tenure_core::{EmployeeId, ReviewId, UserId};

    use super::*;

    fn company_role() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::CompanyAdmin),
            Just(Role::Hr),
            Just(Role::Manager),
            Just(Role::Employee),
            Just(Role::Viewer),
        ]
    }

    fn target_string() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("PENDING".to_string()),
            Just("SCHEDULED".to_string()),
            Just("FEEDBACK".to_string()),
            Just("UNDER_APPROVAL".to_string()),
            Just("APPROVED".to_string()),
            Just("REJECTED".to_string()),
            "[A-Z_]{1,16}",
        ]
    }

    fn actor_in(role: Role, company: CompanyId) -> Actor {
        Actor {
            user_id: UserId::new(),
            email: format!("{}@prop.test", role.as_str()),
            role,
            is_active: true,
            is_superuser: false,
            profile: Some(EmployeeLink {
                employee_id: EmployeeId::new(),
                company_id: company,
                department_id: None,
            }),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Cross-company actors are always denied with the same reason,
        /// whatever the role or target string.
        #[test]
        fn tenant_mismatch_dominates(role in company_role(), target in target_string()) {
            let actor = actor_in(role, CompanyId::new());
            let review = PerformanceReview::new(
                ReviewId::new(), EmployeeId::new(), None, None, Utc::now(),
            );
            let decision = can_transition(&actor, &review, CompanyId::new(), &target);
            prop_assert!(!decision.allow);
            prop_assert_eq!(decision.reason.as_deref(), Some("Not same company."));
        }

        /// The gate is total: every outcome is allow or deny-with-reason.
        #[test]
        fn gate_is_total(role in company_role(), target in target_string()) {
            let company = CompanyId::new();
            let actor = actor_in(role, company);
            let review = PerformanceReview::new(
                ReviewId::new(), EmployeeId::new(), None, None, Utc::now(),
            );
            let decision = can_transition(&actor, &review, company, &target);
            prop_assert_eq!(decision.reason.is_none(), decision.allow);
        }

        /// Nothing ever advances out of APPROVED.
        #[test]
        fn approved_never_advances(target in prop::sample::select(Stage::ALL.to_vec())) {
            prop_assert!(!Stage::Approved.can_advance_to(target));
        }

        /// Each stage has at most two outgoing edges and PENDING none in.
        #[test]
        fn pipeline_shape_holds(from in prop::sample::select(Stage::ALL.to_vec())) {
            let out = Stage::ALL.iter().filter(|to| from.can_advance_to(**to)).count();
            prop_assert!(out <= 2);
            prop_assert!(!from.can_advance_to(Stage::Pending));
        }
    }
}
