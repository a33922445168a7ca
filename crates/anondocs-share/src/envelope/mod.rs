//! Share envelopes: `TAG ":" PAYLOAD` strings carrying a snapshot.

pub mod decoder;
pub mod encoder;
pub mod tag;
pub mod transport;

pub use decoder::EnvelopeDecoder;
pub use encoder::EnvelopeEncoder;
pub use tag::EnvelopeTag;
