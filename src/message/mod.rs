// Message module - inbound operations, outbound transfers and their wire codec

mod codec;
mod model;

pub use codec::{CodecError, MessageCodec};
pub use model::{op_codes, InboundMessage, Operation, OutboundKind, OutboundMessage, Payload};
