use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::repository::ListFilter;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Only return items scheduled after the current time
    #[serde(default)]
    pub upcoming: bool,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            upcoming: false,
        }
    }
}

impl ListParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err("page_size must be between 1 and 100".to_string());
        }
        Ok(())
    }

    /// Row offset of the requested page, computed in `i64` so any `u32` page fits
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).max(0) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn to_filter(&self, now: DateTime<Utc>) -> ListFilter {
        ListFilter {
            after: self.upcoming.then_some(now),
            offset: self.offset(),
            limit: self.limit(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from_page() {
        let params = ListParams {
            page: 3,
            page_size: 20,
            upcoming: false,
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_last_page_offset_does_not_overflow() {
        let params = ListParams {
            page: u32::MAX,
            page_size: 100,
            upcoming: false,
        };
        assert!(params.validate().is_ok());

        let filter = params.to_filter(Utc::now());
        assert_eq!(filter.offset, (i64::from(u32::MAX) - 1) * 100);
        assert_eq!(filter.limit, 100);
    }

    #[test]
    fn test_page_size_bounds() {
        let params = ListParams {
            page_size: 101,
            ..ListParams::default()
        };
        assert!(params.validate().is_err());

        let params = ListParams {
            page: 0,
            ..ListParams::default()
        };
        assert!(params.validate().is_err());
        assert!(ListParams::default().validate().is_ok());
    }

    #[test]
    fn test_upcoming_sets_lower_bound() {
        let now = Utc::now();
        let params = ListParams {
            upcoming: true,
            ..ListParams::default()
        };
        assert_eq!(params.to_filter(now).after, Some(now));
        assert_eq!(ListParams::default().to_filter(now).after, None);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 50, 101).total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 50, 0).total_pages, 0);
    }
}
