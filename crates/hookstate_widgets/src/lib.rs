//! hookstate widgets
//!
//! Leaf components built on the core hook runtime:
//!
//! - [`form`]: controlled multi-field form state with update-by-key, reset,
//!   and submit
//! - [`input`]: a single controlled text input
//! - [`counter`]: one integer kept in sync with an optional display target
//! - [`display`]: the host's addressable text targets

pub mod counter;
pub mod display;
pub mod error;
pub mod form;
pub mod input;

pub use counter::{Counter, DisplayBinding, SharedCounter};
pub use display::{DisplayNode, DisplayTree, SharedDisplay};
pub use error::FormError;
pub use form::{FieldStateMap, FormState};
pub use input::InputState;
