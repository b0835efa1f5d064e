//! Turning a record into text: the line encoder shared by every core, and the
//! printf-style resolver behind the `*f` logging variants.

mod encoder;
mod template;

pub use encoder::{Encoder, Encoding, TIME_FORMAT, short_caller};
pub use template::resolve;
