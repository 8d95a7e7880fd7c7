//! Value objects - immutable domain primitives

mod message_id;
mod message_type;
mod sort_order;

pub use message_id::{MessageId, MessageIdGenerator, MessageIdParseError};
pub use message_type::MessageType;
pub use sort_order::{SortOrder, SortOrderParseError};
