//! Plain-text transcripts of recorded frames.
//!
//! One line per [`DrawCommand`], e.g.
//!
//! ```text
//! begin "Contact" 400x300
//! label "Name"
//! same_line
//! text #name "Ada" w=200
//! button #ok "OK" 80x0
//! end
//! ```

use std::fmt;

use crate::layout::Available;
use crate::widget::Widget;

use super::headless::{DrawCommand, HeadlessBackend};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Lay out `widget` in a `width` x `height` area, render it headlessly and
/// return the transcript.
///
/// # Examples
///
/// ```ignore
/// let out = render_to_string(&mut form, 400.0, 300.0);
/// assert!(out.contains("label \"Name\""));
/// ```
pub fn render_to_string(widget: &mut Widget, width: f32, height: f32) -> String {
    widget.update_layout(Available::definite(width, height));
    let mut ui = HeadlessBackend::new(width, height);
    widget.render(&mut ui);
    transcript(ui.commands())
}

/// Format commands one per line, without a trailing newline.
pub fn transcript(commands: &[DrawCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole numbers print without a fraction, others with one decimal.
struct Num(f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

fn width_suffix(f: &mut fmt::Formatter<'_>, width: Option<f32>) -> fmt::Result {
    match width {
        Some(w) => write!(f, " w={}", Num(w)),
        None => Ok(()),
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::BeginPanel {
                title,
                size,
                forced,
            } => {
                write!(f, "begin {title:?} {}x{}", Num(size.width), Num(size.height))?;
                if *forced {
                    f.write_str(" forced")?;
                }
                Ok(())
            }
            DrawCommand::EndPanel => f.write_str("end"),
            DrawCommand::SameLine => f.write_str("same_line"),
            DrawCommand::Label { text } => write!(f, "label {text:?}"),
            DrawCommand::TextField { id, value, width } => {
                write!(f, "text #{id} {value:?}")?;
                width_suffix(f, *width)
            }
            DrawCommand::FloatField { id, value, width } => {
                write!(f, "float #{id} {value}")?;
                width_suffix(f, *width)
            }
            DrawCommand::IntField { id, value, width } => {
                write!(f, "int #{id} {value}")?;
                width_suffix(f, *width)
            }
            DrawCommand::Checkbox { id, text, checked } => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                write!(f, "checkbox #{id} {text:?} {mark}")
            }
            DrawCommand::Radio { id, text, selected } => {
                let mark = if *selected { "(o)" } else { "( )" };
                write!(f, "radio #{id} {text:?} {mark}")
            }
            DrawCommand::Button { id, text, size } => {
                write!(f, "button #{id} {text:?} {}x{}", Num(size.width), Num(size.height))
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
