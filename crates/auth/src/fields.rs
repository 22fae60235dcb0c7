//! Field-set restriction for self-service profile updates.

use thiserror::Error;

/// Fields an employee may change on their own profile.
pub const SELF_UPDATE_FIELDS: [&str; 2] = ["address", "phone_number"];

/// A submitted field fell outside the self-service allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Employees can only update address and phone_number.")]
pub struct SelfUpdateViolation {
    /// First offending field, for logs.
    pub field: String,
}

/// Check submitted field names against the self-service allow-list.
///
/// All-or-nothing: a single disallowed field rejects the whole update.
/// An empty submission passes.
pub fn validate_self_update<'a, I>(submitted: I) -> Result<(), SelfUpdateViolation>
where
    I: IntoIterator<Item = &'a str>,
{
    for field in submitted {
        if !SELF_UPDATE_FIELDS.contains(&field) {
            return Err(SelfUpdateViolation {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    const CANDIDATE_FIELDS: [&str; 8] = [
        "address",
        "phone_number",
        "name",
        "email",
        "designation",
        "department_id",
        "hired_on",
        "slug",
    ];

    proptest! {
        /// A submission passes exactly when every field is on the
        /// allow-list, whatever the order or repetition.
        #[test]
        fn subsets_pass_iff_every_field_is_allowed(
            picks in proptest::collection::vec(0usize..CANDIDATE_FIELDS.len(), 0..8),
        ) {
            let submitted: Vec<&str> = picks.iter().map(|&i| CANDIDATE_FIELDS[i]).collect();
            let all_allowed = submitted.iter().all(|f| SELF_UPDATE_FIELDS.contains(f));
            let outcome = validate_self_update(submitted.iter().copied());
            prop_assert_eq!(outcome.is_ok(), all_allowed);
        }

        /// The violation names the first offender in submission order.
        #[test]
        fn violation_reports_the_first_offender(
            prefix in proptest::collection::vec(
                prop_oneof![Just("address"), Just("phone_number")],
                0..4,
            ),
            offender_idx in 2usize..CANDIDATE_FIELDS.len(),
        ) {
            let offender = CANDIDATE_FIELDS[offender_idx];
            let mut submitted = prefix;
            submitted.push(offender);
            submitted.push("email");
            let err = validate_self_update(submitted.iter().copied()).unwrap_err();
            prop_assert_eq!(err.field, offender);
        }
    }
}
