//! Routine-related API types.

use serde::{Deserialize, Serialize};

use cueup_core::{Balls, PagedResult, Pageable, Routine, RoutineCriteria};

/// Request to publish a new routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateRoutineRequest {
    pub title: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cushion_limits: Option<Vec<i32>>,
    #[serde(default)]
    pub colours: Option<Vec<String>>,
    #[serde(default)]
    pub balls: Option<Balls>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub can_loop: bool,
}

impl CreateRoutineRequest {
    /// Materialize the routine record with its assigned id.
    pub fn into_routine(self, id: String) -> Routine {
        Routine {
            id,
            title: self.title,
            description: self.description,
            tags: self.tags,
            cushion_limits: self.cushion_limits,
            colours: self.colours,
            balls: self.balls,
            images: self.images,
            can_loop: self.can_loop,
        }
    }
}

/// Paging and filter parameters for the routine listing. Tags arrive as a
/// single comma-separated parameter (`?tags=beginner,advanced`) and match
/// with OR semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRoutinesParams {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub tags: Option<String>,
}

fn default_page_size() -> u32 {
    Pageable::DEFAULT_PAGE_SIZE
}

impl ListRoutinesParams {
    pub fn pageable(&self) -> Pageable {
        Pageable::new(self.page_number, self.page_size)
    }

    /// Normalize the optional tags parameter into routine criteria.
    pub fn criteria(&self) -> RoutineCriteria {
        match &self.tags {
            None => RoutineCriteria::default(),
            Some(raw) => RoutineCriteria::any_tags(
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}

/// One page of routines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RoutineListResponse {
    pub routines: Vec<Routine>,
    pub page_size: u32,
    pub page_number: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl From<PagedResult<Routine>> for RoutineListResponse {
    fn from(page: PagedResult<Routine>) -> Self {
        Self {
            routines: page.items,
            page_size: page.page_size,
            page_number: page.page_number,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}
