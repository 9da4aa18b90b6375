// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod dispatch;
pub mod email;
pub mod matches;
pub mod weather;
pub mod youtube;

pub use dispatch::{DispatchOutcome, DispatchReport, ReminderDispatcher};
pub use email::ResendClient;
pub use matches::MatchCatalog;
pub use weather::CwaClient;
pub use youtube::YoutubeClient;
