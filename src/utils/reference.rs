//! Generated human-readable account and invoice numbers
//!
//! Numbers look like `ACC-1A2B3C4D` / `INV-9F8E7D6C`: a fixed prefix plus
//! the first four bytes of a fresh random UUID, uppercase hex. Formatting
//! is a pure function over the bytes; the random source is a trait so
//! tests can pin the output.

use uuid::Uuid;

/// Prefix for billing account numbers
pub const ACCOUNT_PREFIX: &str = "ACC";
/// Prefix for invoice numbers
pub const INVOICE_PREFIX: &str = "INV";

/// Source of the random bytes behind a generated number
pub trait ReferenceSource: Send + Sync {
    fn next_bytes(&self) -> [u8; 4];
}

/// Default source: the leading bytes of a fresh v4 UUID
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidReferenceSource;

impl ReferenceSource for UuidReferenceSource {
    fn next_bytes(&self) -> [u8; 4] {
        let uuid = Uuid::new_v4();
        let bytes = uuid.as_bytes();
        [bytes[0], bytes[1], bytes[2], bytes[3]]
    }
}

/// Format a reference number from a prefix and raw bytes
pub fn format_reference(prefix: &str, bytes: [u8; 4]) -> String {
    format!("{}-{}", prefix, hex::encode_upper(bytes))
}

/// Fresh account number (`ACC-XXXXXXXX`)
pub fn account_number(source: &dyn ReferenceSource) -> String {
    format_reference(ACCOUNT_PREFIX, source.next_bytes())
}

/// Fresh invoice number (`INV-XXXXXXXX`)
pub fn invoice_number(source: &dyn ReferenceSource) -> String {
    format_reference(INVOICE_PREFIX, source.next_bytes())
}
