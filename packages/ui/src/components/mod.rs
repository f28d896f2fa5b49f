//! Small form primitives shared by every page.

mod alert;
mod button;
mod input;

pub use alert::{Alert, AlertKind};
pub use button::{Button, ButtonVariant};
pub use input::{Input, Label};
