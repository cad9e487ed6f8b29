//! Terminal frame model for the line editor.
//!
//! A [`Buffer`] is a grid of styled cells of a fixed width plus a cursor
//! position (the dot). Buffers are produced by [`BufferBuilder`], which owns
//! the wrapping rules, and by [`Renderer`]s, which turn a piece of UI (a mode
//! line, a list, the notes) into a buffer for a given width.

pub mod buffer;
pub mod render;

pub use buffer::{Buffer, BufferBuilder, Cell, Pos, buffers_height};
pub use render::{
	LinesRenderer, ModeLineRenderer, Renderer, StringRenderer, StyledLinesRenderer, VerticalScrollbar, render,
};
