//! Cueup Core - Domain Types
//!
//! Data types and query primitives shared by every cueup crate: the three
//! record types (users, routines, scores), the normalized filter criteria
//! used to build store queries, access scopes, and the pagination envelope.
//! No I/O happens here; the API crate owns transport and persistence.

pub mod criteria;
pub mod entities;
pub mod enums;
pub mod identity;
pub mod page;
pub mod scope;

pub use criteria::{Constraint, DateWindow, RoutineCriteria, ScoreCriteria};
pub use entities::{Balls, Routine, Score, User};
pub use enums::{ParseRoleError, Role};
pub use identity::{
    datetime_format, datetime_format_opt, new_record_id, now_to_minute, truncate_to_minute,
    RecordId, Timestamp, DATE_TIME_FORMAT,
};
pub use page::{PagedResult, Pageable};
pub use scope::AccessScope;
