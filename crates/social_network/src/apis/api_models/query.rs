use serde::Deserialize;
use utoipa::IntoParams;

use crate::utils::errors::app_error::AppError;

#[derive(Debug, Deserialize, IntoParams, Default)]
pub struct PageQuery {
    /// Page number (starts at 1)
    #[param(value_type = Option<i64>, default = 1)]
    pub page: Option<String>,
}

impl PageQuery {
    /// The requested page, or 1 when none was given.
    pub fn page(&self) -> Result<i64, AppError> {
        match self.page.as_deref() {
            None => Ok(1),
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::Validation(format!("Page must be a whole number, got {:?}", raw))
            }),
        }
    }
}
