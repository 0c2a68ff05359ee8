//! Normalized filter criteria for list queries.
//!
//! Request parameters arrive independently optional; normalization turns
//! each one into a [`Constraint`] where absence means "do not filter on
//! this field at all" — never "field must be absent on the record". Each
//! criteria type then evaluates as one conjunctive predicate handed to the
//! store in a single paged call, so there is exactly one query shape and
//! only the clauses present vary.

use crate::entities::{Routine, Score};
use crate::identity::{RecordId, Timestamp};
use crate::scope::AccessScope;

/// Per-field constraint with "absent = unconstrained" semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Constraint<T> {
    /// Contributes no clause: any record value (or no value) matches.
    #[default]
    Unconstrained,
    /// Record value must equal this value.
    EqualTo(T),
}

impl<T: PartialEq> Constraint<T> {
    /// Normalize an optional request parameter.
    pub fn from_param(param: Option<T>) -> Self {
        match param {
            Some(value) => Constraint::EqualTo(value),
            None => Constraint::Unconstrained,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Constraint::Unconstrained)
    }

    /// Whether a required record field satisfies this constraint.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Constraint::Unconstrained => true,
            Constraint::EqualTo(wanted) => wanted == value,
        }
    }

    /// Whether an optional record field satisfies this constraint. An
    /// unconstrained field admits records with or without a value; an
    /// equality constraint requires the value to be present and equal.
    pub fn accepts_opt(&self, value: Option<&T>) -> bool {
        match self {
            Constraint::Unconstrained => true,
            Constraint::EqualTo(wanted) => value == Some(wanted),
        }
    }
}

/// Timestamp window over score records. Both bounds are inclusive at
/// minute granularity: a score stamped exactly at the `to` bound matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    Unconstrained,
    From(Timestamp),
    To(Timestamp),
    Between(Timestamp, Timestamp),
}

impl DateWindow {
    /// Normalize the optional `from`/`to` request parameters.
    pub fn from_params(from: Option<Timestamp>, to: Option<Timestamp>) -> Self {
        match (from, to) {
            (None, None) => DateWindow::Unconstrained,
            (Some(from), None) => DateWindow::From(from),
            (None, Some(to)) => DateWindow::To(to),
            (Some(from), Some(to)) => DateWindow::Between(from, to),
        }
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        match self {
            DateWindow::Unconstrained => true,
            DateWindow::From(from) => at >= *from,
            DateWindow::To(to) => at <= *to,
            DateWindow::Between(from, to) => at >= *from && at <= *to,
        }
    }
}

/// Conjunctive filter over score records.
#[derive(Debug, Clone, Default)]
pub struct ScoreCriteria {
    pub routine_id: Constraint<RecordId>,
    pub user_id: Constraint<RecordId>,
    pub dates: DateWindow,
    pub cushion_limit: Constraint<i32>,
    pub colours: Constraint<String>,
    pub num_balls: Constraint<i32>,
    pub looped: Constraint<bool>,
}

impl ScoreCriteria {
    /// Force the user-id clause to the scope's owner. Caller-supplied
    /// user-id parameters cannot widen visibility past an owned scope;
    /// an unrestricted scope leaves whatever clause is already present.
    pub fn scoped(mut self, scope: &AccessScope) -> Self {
        if let AccessScope::OwnedBy(owner) = scope {
            self.user_id = Constraint::EqualTo(owner.clone());
        }
        self
    }

    /// The single predicate shape: every present clause must hold.
    pub fn matches(&self, score: &Score) -> bool {
        self.routine_id.accepts(&score.routine_id)
            && self.user_id.accepts(&score.user_id)
            && self.dates.contains(score.date_time)
            && self.cushion_limit.accepts_opt(score.cushion_limit.as_ref())
            && self.colours.accepts_opt(score.colours.as_ref())
            && self.num_balls.accepts_opt(score.num_balls.as_ref())
            && self.looped.accepts(&score.looped)
    }
}

/// Filter over routine records. The tag clause uses any-overlap semantics:
/// a routine matches when it carries at least one of the requested tags.
#[derive(Debug, Clone, Default)]
pub struct RoutineCriteria {
    pub tags: Option<Vec<String>>,
}

impl RoutineCriteria {
    pub fn any_tags(tags: Vec<String>) -> Self {
        Self { tags: Some(tags) }
    }

    pub fn matches(&self, routine: &Routine) -> bool {
        match &self.tags {
            None => true,
            Some(wanted) => wanted.iter().any(|tag| routine.tags.contains(tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::Balls;

    fn minute(d: u32, h: u32, m: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn score(user_id: &str) -> Score {
        Score {
            id: "s1".to_string(),
            value: 30,
            routine_id: "r1".to_string(),
            user_id: user_id.to_string(),
            date_time: minute(25, 19, 4),
            cushion_limit: None,
            colours: None,
            num_balls: None,
            looped: false,
        }
    }

    fn routine_tagged(tags: &[&str]) -> Routine {
        Routine {
            id: "r1".to_string(),
            title: "t".to_string(),
            description: Vec::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            cushion_limits: None,
            colours: None,
            balls: Some(Balls {
                options: vec![15],
                unit: "reds".to_string(),
            }),
            images: None,
            can_loop: false,
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = ScoreCriteria::default();
        assert!(criteria.matches(&score("u1")));
        assert!(criteria.matches(&Score {
            cushion_limit: Some(3),
            colours: Some("all".to_string()),
            looped: true,
            ..score("u2")
        }));
    }

    #[test]
    fn test_equality_on_optional_field_requires_presence() {
        let criteria = ScoreCriteria {
            cushion_limit: Constraint::EqualTo(3),
            ..ScoreCriteria::default()
        };
        assert!(!criteria.matches(&score("u1")));
        assert!(criteria.matches(&Score {
            cushion_limit: Some(3),
            ..score("u1")
        }));
        assert!(!criteria.matches(&Score {
            cushion_limit: Some(5),
            ..score("u1")
        }));
    }

    #[test]
    fn test_scoped_forces_owner_over_requested_user_id() {
        let criteria = ScoreCriteria {
            user_id: Constraint::EqualTo("u2".to_string()),
            ..ScoreCriteria::default()
        }
        .scoped(&AccessScope::OwnedBy("u1".to_string()));

        assert!(criteria.matches(&score("u1")));
        assert!(!criteria.matches(&score("u2")));
    }

    #[test]
    fn test_unrestricted_scope_keeps_requested_user_id() {
        let criteria = ScoreCriteria {
            user_id: Constraint::EqualTo("u2".to_string()),
            ..ScoreCriteria::default()
        }
        .scoped(&AccessScope::Unrestricted);

        assert!(criteria.matches(&score("u2")));
        assert!(!criteria.matches(&score("u1")));
    }

    #[test]
    fn test_to_bound_is_inclusive() {
        let to = minute(25, 19, 4);
        assert!(DateWindow::To(to).contains(to));
        assert!(DateWindow::Between(minute(1, 0, 0), to).contains(to));
        assert!(!DateWindow::To(to).contains(minute(25, 19, 5)));
    }

    #[test]
    fn test_from_bound_is_inclusive() {
        let from = minute(25, 19, 4);
        assert!(DateWindow::From(from).contains(from));
        assert!(!DateWindow::From(from).contains(minute(25, 19, 3)));
    }

    #[test]
    fn test_date_window_applies_to_score_match() {
        let criteria = ScoreCriteria {
            dates: DateWindow::from_params(Some(minute(20, 0, 0)), Some(minute(25, 19, 4))),
            ..ScoreCriteria::default()
        };
        assert!(criteria.matches(&score("u1")));

        let outside = ScoreCriteria {
            dates: DateWindow::from_params(None, Some(minute(25, 19, 3))),
            ..ScoreCriteria::default()
        };
        assert!(!outside.matches(&score("u1")));
    }

    #[test]
    fn test_tag_filter_is_any_overlap() {
        let criteria =
            RoutineCriteria::any_tags(vec!["beginner".to_string(), "advanced".to_string()]);
        assert!(criteria.matches(&routine_tagged(&["beginner"])));
        assert!(criteria.matches(&routine_tagged(&["advanced", "long-potting"])));
        assert!(!criteria.matches(&routine_tagged(&["intermediate"])));
    }

    #[test]
    fn test_absent_tag_filter_matches_all_routines() {
        let criteria = RoutineCriteria::default();
        assert!(criteria.matches(&routine_tagged(&[])));
        assert!(criteria.matches(&routine_tagged(&["anything"])));
    }
}

#[cfg(test)]
mod prop_tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;

    fn arb_score() -> impl Strategy<Value = Score> {
        (
            0..200i32,
            prop::option::of(0..8i32),
            prop::option::of(prop::sample::select(vec!["all", "blue only", "pink and black"])),
            prop::option::of(1..16i32),
            any::<bool>(),
            0..10_000i64,
        )
            .prop_map(|(value, cushion_limit, colours, num_balls, looped, minutes)| Score {
                id: "s".to_string(),
                value,
                routine_id: "r1".to_string(),
                user_id: "u1".to_string(),
                date_time: NaiveDate::from_ymd_opt(2025, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + chrono::Duration::minutes(minutes),
                cushion_limit,
                colours: colours.map(|c| c.to_string()),
                num_balls,
                looped,
            })
    }

    proptest! {
        /// Omission transparency: with no constraints set, the match result
        /// never depends on which optional fields a record carries.
        #[test]
        fn prop_unconstrained_criteria_match_any_record(score in arb_score()) {
            prop_assert!(ScoreCriteria::default().matches(&score));
        }

        /// A single equality clause only ever inspects its own field:
        /// toggling the other optional fields never changes the outcome.
        #[test]
        fn prop_clauses_are_independent(score in arb_score(), limit in 0..8i32) {
            let criteria = ScoreCriteria {
                cushion_limit: Constraint::EqualTo(limit),
                ..ScoreCriteria::default()
            };
            let stripped = Score {
                colours: None,
                num_balls: None,
                looped: false,
                ..score.clone()
            };
            prop_assert_eq!(criteria.matches(&score), criteria.matches(&stripped));
        }
    }
}
