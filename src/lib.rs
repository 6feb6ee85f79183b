pub mod builder;
mod common;

pub use builder::{QRBuilder, QR};
pub use common::codec::{Mode, ALPHANUMERIC_CHARSET};
pub use common::error::*;
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Metadata, Version};
