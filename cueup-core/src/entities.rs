//! Core record structures.

use serde::{Deserialize, Serialize};

use crate::identity::{datetime_format, RecordId, Timestamp};

/// Registered account. The email address is unique across all users; the
/// store's unique index enforces the invariant at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2id PHC string. Never exposed on the wire; API responses use
    /// a dedicated type without this field.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Ball-count options for a routine, e.g. reds 3..15 for a line-up.
///
/// The unit says which balls vary: some routines vary the number of REDS
/// ("The Line Up"), others the total number of BALLS ("Long pots along the
/// blue spot"), so the unit label travels with the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Balls {
    pub options: Vec<i32>,
    pub unit: String,
}

/// Published practice routine. Immutable after creation; its allow-lists
/// bound which optional attributes a submitted score may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: RecordId,
    pub title: String,
    /// Description paragraphs.
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Permitted cushion-contact limits. Absent list means a score may not
    /// set a cushion limit at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cushion_limits: Option<Vec<i32>>,
    /// Permitted colour-ball configurations, e.g. "all", "blue only".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colours: Option<Vec<String>>,
    /// Permitted ball-count options with their unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balls: Option<Balls>,
    /// Illustration links for the routine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Whether looped (repeat-until-miss) attempts are allowed.
    #[serde(default)]
    pub can_loop: bool,
}

impl Routine {
    /// Whether a score may claim this cushion limit. An absent allow-list
    /// permits nothing.
    pub fn permits_cushion_limit(&self, limit: i32) -> bool {
        self.cushion_limits
            .as_ref()
            .is_some_and(|allowed| allowed.contains(&limit))
    }

    /// Whether a score may claim this colour configuration.
    pub fn permits_colours(&self, colours: &str) -> bool {
        self.colours
            .as_deref()
            .is_some_and(|allowed| allowed.iter().any(|c| c == colours))
    }

    /// Whether a score may claim this ball count.
    pub fn permits_num_balls(&self, count: i32) -> bool {
        self.balls
            .as_ref()
            .is_some_and(|balls| balls.options.contains(&count))
    }

    /// Whether a score may be recorded as a looped attempt.
    pub fn permits_loop(&self) -> bool {
        self.can_loop
    }
}

/// A recorded attempt at a routine. Optional attributes are only valid when
/// the parent routine's allow-lists admit them; the score-create pipeline
/// rejects anything else before insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: RecordId,
    pub value: i32,
    pub routine_id: RecordId,
    pub user_id: RecordId,
    /// Minute-precision timestamp, `dd/MM/yyyy HH:mm` on the wire.
    #[serde(with = "datetime_format")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "25/03/2025 19:04"))]
    pub date_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cushion_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_balls: Option<i32>,
    /// Whether the attempt looped the routine.
    #[serde(rename = "loop", default)]
    pub looped: bool,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn routine() -> Routine {
        Routine {
            id: "r1".to_string(),
            title: "The Line Up".to_string(),
            description: vec!["Pot all reds then the colours.".to_string()],
            tags: vec!["break-building".to_string()],
            cushion_limits: Some(vec![0, 3, 5, 7]),
            colours: Some(vec!["all".to_string(), "blue only".to_string()]),
            balls: Some(Balls {
                options: vec![3, 6, 10, 15],
                unit: "reds".to_string(),
            }),
            images: None,
            can_loop: true,
        }
    }

    #[test]
    fn test_cushion_limit_allow_list_membership() {
        let routine = routine();
        assert!(routine.permits_cushion_limit(3));
        assert!(!routine.permits_cushion_limit(4));
    }

    #[test]
    fn test_absent_allow_list_permits_nothing() {
        let bare = Routine {
            cushion_limits: None,
            colours: None,
            balls: None,
            can_loop: false,
            ..routine()
        };
        assert!(!bare.permits_cushion_limit(0));
        assert!(!bare.permits_colours("all"));
        assert!(!bare.permits_num_balls(3));
        assert!(!bare.permits_loop());
    }

    #[test]
    fn test_score_wire_names() {
        let score = Score {
            id: "s1".to_string(),
            value: 42,
            routine_id: "r1".to_string(),
            user_id: "u1".to_string(),
            date_time: NaiveDate::from_ymd_opt(2025, 3, 25)
                .unwrap()
                .and_hms_opt(19, 4, 0)
                .unwrap(),
            cushion_limit: Some(3),
            colours: None,
            num_balls: None,
            looped: true,
        };

        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["routineId"], "r1");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["dateTime"], "25/03/2025 19:04");
        assert_eq!(json["cushionLimit"], 3);
        assert_eq!(json["loop"], true);
        // Unset optionals are omitted entirely, not sent as null.
        assert!(json.get("colours").is_none());
        assert!(json.get("numBalls").is_none());
    }

    #[test]
    fn test_user_password_hash_never_serialized() {
        let user = User {
            id: "u1".to_string(),
            first_name: "Ronnie".to_string(),
            last_name: "O'Sullivan".to_string(),
            email: "ronnie@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            is_admin: false,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }
}
