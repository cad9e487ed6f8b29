//! Shared value types for the line editor: keys, styles and styled text.

/// Key and mouse event types.
pub mod key;
/// Colors, modifiers and SGR encoding.
pub mod style;
/// Styled text spans.
pub mod styled;

pub use key::{Key, KeyCode, KeyParseError, Modifiers, MouseButton, MouseEvent, ScrollDirection};
pub use style::{Color, Modifier, Style, StyleParseError};
pub use styled::{Span, StyledText};
