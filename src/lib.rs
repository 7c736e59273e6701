//! An ordered map on top of a probabilistic skip list, with a line oriented
//! text store.
//!
//! The list is single threaded: mutation takes `&mut self`, so the borrow
//! checker keeps cursors and references from outliving a change to the
//! structure.

pub use crate::compare::*;
pub use crate::error::{PersistError, Result};
pub use crate::iter::*;
pub use crate::level::*;
pub use crate::options::*;
pub use crate::skiplist::*;

mod compare;
mod error;
mod iter;
mod level;
mod node;
mod options;
mod persist;
mod skiplist;
