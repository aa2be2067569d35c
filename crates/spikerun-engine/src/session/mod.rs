//! Session startup.
//!
//! A session is the one place input gets wired and the frame loop gets
//! started, in that order, over a simulation that already exists.

mod lifecycle;

pub use lifecycle::{Session, SessionBuilder};
