pub mod event;
pub mod qr_code;

pub use event::EventId;
pub use qr_code::{NewQrCode, QrCodeRecord, StoredQrCode, INVALID_QR_DATA};
