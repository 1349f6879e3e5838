mod codec;
mod convert;
mod schema;

pub use codec::AvroCodec;
pub use schema::GATEWAY_PAYLOAD_SCHEMA;
