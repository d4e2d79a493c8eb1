use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub take: Option<i64>,
    pub skip: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub take: i64,
    pub skip: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            take: DEFAULT_PAGE_SIZE,
            skip: 0,
        }
    }
}

impl PageQuery {
    pub fn validate(&self) -> Result<Page> {
        let take = self.take.unwrap_or(DEFAULT_PAGE_SIZE);
        let skip = self.skip.unwrap_or(0);

        if !(1..=MAX_PAGE_SIZE).contains(&take) {
            return Err(AppError::Validation(format!(
                "take must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if skip < 0 {
            return Err(AppError::Validation("skip must not be negative".to_string()));
        }

        Ok(Page { take, skip })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageQuery::default().validate().unwrap();
        assert_eq!(page, Page { take: 10, skip: 0 });
    }

    #[test]
    fn test_rejects_out_of_range() {
        let query = PageQuery { take: Some(0), skip: None };
        assert!(query.validate().is_err());

        let query = PageQuery { take: Some(101), skip: None };
        assert!(query.validate().is_err());

        let query = PageQuery { take: None, skip: Some(-1) };
        assert!(query.validate().is_err());
    }
}
