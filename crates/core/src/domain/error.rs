// Domain Error Types

use super::work_item::ItemId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No such menu item: {0}")]
    UnknownItem(ItemId),

    #[error("Invalid menu entry at line {line}: {reason}")]
    InvalidMenu { line: usize, reason: String },

    #[error("Duplicate menu item id: {0}")]
    DuplicateItem(ItemId),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
