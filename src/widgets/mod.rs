//! Built-in widget variants: Label, TextInput, NumberInput, Checkbox, RadioButton, Button.
//!
//! Each variant is the payload of one [`WidgetKind`](crate::widget::WidgetKind)
//! case. The matching `Widget::<variant>` constructors live beside them.

pub mod button;
pub mod checkbox;
pub mod input;
pub mod label;
pub mod radio;

pub use button::{Button, Callback};
pub use checkbox::Checkbox;
pub use input::{NumberBinding, NumberInput, TextInput};
pub use label::Label;
pub use radio::RadioButton;
