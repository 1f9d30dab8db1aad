//! Input events and key bindings.
//!
//! [`input`] defines crossterm-decoupled event types delivered by the host
//! shell; [`binding`] maps key chords onto navigation actions.

pub mod binding;
pub mod input;

pub use binding::{NavAction, NavBindingRegistry};
pub use input::{from_crossterm, InputEvent, Key, KeyEvent, Modifiers, WheelEvent};
