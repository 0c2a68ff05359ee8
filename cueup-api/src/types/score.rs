//! Score-related API types.

use serde::{Deserialize, Serialize};

use cueup_core::{
    datetime_format_opt, Constraint, DateWindow, PagedResult, Pageable, RecordId, Score,
    ScoreCriteria, Timestamp,
};

/// Request to record a score against a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreRequest {
    pub value: i32,
    pub routine_id: RecordId,
    pub user_id: RecordId,
    /// Optional; defaults to "now" at minute precision when absent.
    #[serde(with = "datetime_format_opt", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "25/03/2025 19:04"))]
    pub date_time: Option<Timestamp>,
    #[serde(default)]
    pub cushion_limit: Option<i32>,
    #[serde(default)]
    pub colours: Option<String>,
    #[serde(default)]
    pub num_balls: Option<i32>,
    #[serde(rename = "loop", default)]
    pub looped: bool,
}

/// Filter and paging parameters for score listings. Every filter is
/// independently optional; an absent parameter contributes no clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListScoresParams {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(with = "datetime_format_opt", default)]
    pub from: Option<Timestamp>,
    #[serde(with = "datetime_format_opt", default)]
    pub to: Option<Timestamp>,
    #[serde(default)]
    pub routine_id: Option<RecordId>,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub cushion_limit: Option<i32>,
    #[serde(default)]
    pub colours: Option<String>,
    #[serde(default)]
    pub num_balls: Option<i32>,
    #[serde(rename = "loop", default)]
    pub looped: Option<bool>,
}

fn default_page_size() -> u32 {
    Pageable::DEFAULT_PAGE_SIZE
}

impl ListScoresParams {
    pub fn pageable(&self) -> Pageable {
        Pageable::new(self.page_number, self.page_size)
    }

    /// Normalize the raw parameters into score criteria. The caller's
    /// access scope is applied afterwards via [`ScoreCriteria::scoped`].
    pub fn criteria(&self) -> ScoreCriteria {
        ScoreCriteria {
            routine_id: Constraint::from_param(self.routine_id.clone()),
            user_id: Constraint::from_param(self.user_id.clone()),
            dates: DateWindow::from_params(self.from, self.to),
            cushion_limit: Constraint::from_param(self.cushion_limit),
            colours: Constraint::from_param(self.colours.clone()),
            num_balls: Constraint::from_param(self.num_balls),
            looped: Constraint::from_param(self.looped),
        }
    }
}

/// One page of scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScoreListResponse {
    pub scores: Vec<Score>,
    pub page_size: u32,
    pub page_number: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl From<PagedResult<Score>> for ScoreListResponse {
    fn from(page: PagedResult<Score>) -> Self {
        Self {
            scores: page.items,
            page_size: page.page_size,
            page_number: page.page_number,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}
