//! Entity to model mappers
//!
//! - `From<EventModel> for Event`: event rows always map cleanly
//! - `TryFrom<UserModel> for User`: the role column and profile document
//!   are decoded and can fail on corrupt rows

mod event;
mod user;
