// Dialog errors

use thiserror::Error;
use vouch_validation::ValidationError;

#[derive(Error, Debug)]
pub enum DialogError {
    #[error("Page index {index} is out of bounds for {page_count} pages")]
    PageOutOfBounds { index: usize, page_count: usize },

    #[error("Gate validation failed: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, DialogError>;
