//! Data model of the request decoder.
//!
//! These are the values the decoder hands to its caller, plus the error taxonomy.
//!
//! - **Messages** (`message`): what the decoder emits
//!   - [`Message`]: either a request head or a body fragment
//!   - [`ContentFragment`]: body bytes with the end-of-body flag
//!   - [`FramingMode`]: how the body is delimited
//!
//! - **Request heads** (`request`):
//!   - [`RequestHead`]: method, target, version and header fields
//!
//! - **Header fields** (`header`):
//!   - [`HeaderList`]: ordered multimap with case-insensitive lookup
//!
//! - **Errors** (`error`):
//!   - [`ParseError`]: every way decoding can fail
//!   - [`ErrorKind`]: the failure kind without details

mod message;
pub use message::ContentFragment;
pub use message::FramingMode;
pub use message::Message;

mod request;
pub use request::RequestHead;

mod header;
pub use header::HeaderList;

mod error;
pub use error::ErrorKind;
pub use error::ParseError;
