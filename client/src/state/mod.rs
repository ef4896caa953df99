//! Client-side chat state.
//!
//! DESIGN
//! ======
//! `chat` holds the plain data (messages, history, counter, transcript);
//! `session` owns one of each and implements the `Idle`/`Sending`/`Blocked`
//! transitions. Nothing here performs I/O.

pub mod chat;
pub mod session;
