//! Shared view pieces.

pub mod cells;
pub mod modal;

pub use cells::{QrCodeCell, ShopLogoCell};
pub use modal::StatusModal;
