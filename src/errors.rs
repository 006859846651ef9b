use crate::export::ExportError;
use crate::ledger::LedgerError;
use axum::http::StatusCode;
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownItem(_) => Self::not_found(err.to_string()),
            LedgerError::EmptyName | LedgerError::InvalidAmount | LedgerError::AmountTooLarge => {
                Self::bad_request(err.to_string())
            }
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        let status = match err {
            ExportError::MissingTarget => StatusCode::NOT_FOUND,
            ExportError::RasterizerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ExportError::Rasterize(ref source) => {
                error!("error capturing image: {source}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ExportError::InvalidSelector(_) => {
                error!("cannot locate receipt: {err}");
                return Self::internal(err);
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::RasterizeError;
    use crate::ledger::ItemId;

    #[test]
    fn ledger_errors_map_to_client_statuses() {
        assert_eq!(AppError::from(LedgerError::EmptyName).status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(LedgerError::InvalidAmount).status, StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(LedgerError::UnknownItem(ItemId::new())).status,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn export_errors_keep_user_facing_message() {
        let err = AppError::from(ExportError::RasterizerUnavailable);
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.message.starts_with("Download library not loaded"));

        let err = AppError::from(ExportError::Rasterize(RasterizeError::NotPng));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to download receipt. Please try again.");
    }

    #[test]
    fn bad_selector_is_a_server_error() {
        let err = AppError::from(ExportError::InvalidSelector("[[[".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "invalid receipt selector \"[[[\"");

        let err = AppError::from(ExportError::MissingTarget);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Receipt not found");
    }

    #[test]
    fn oversized_amount_is_a_client_error() {
        let err = AppError::from(LedgerError::AmountTooLarge);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Amount is too large.");
    }
}
