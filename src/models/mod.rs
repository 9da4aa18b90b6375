// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod comment;
pub mod favorite;
pub mod matches;
pub mod reminder;
pub mod user;

pub use comment::Comment;
pub use favorite::Favorite;
pub use matches::{Gender, League, Match, MatchStatus};
pub use reminder::{MatchSnapshot, Reminder};
pub use user::DirectoryUser;
