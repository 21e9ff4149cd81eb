//! Core heap types shared by every collector.
//!
//! This crate provides the vocabulary the memory manager is written in:
//! object identifiers, the handles that name objects, the generation an
//! object lives in, and the error type raised by the mutator API.
//!
//! # Overview
//!
//! - [`ObjectId`] - Monotonic, never-reused object identifier
//! - [`Handle`] - Copyable, non-owning reference to one object record
//! - [`Generation`] - Young or old partition membership
//! - [`HeapError`] - Errors raised by heap operations
//!
//! # Examples
//!
//! ```
//! use core_types::{Generation, Handle, HeapError, ObjectId};
//!
//! let handle = Handle::new(ObjectId::new(7));
//! assert_eq!(handle.id().get(), 7);
//! assert_eq!(handle.to_string(), "#7");
//!
//! let error = HeapError::InvalidTarget(handle.id());
//! assert!(error.to_string().contains("#7"));
//!
//! assert!(Generation::Young < Generation::Old);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod generation;
mod handle;

pub use error::{HeapError, HeapResult};
pub use generation::Generation;
pub use handle::{Handle, ObjectId};
