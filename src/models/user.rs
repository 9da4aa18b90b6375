// SPDX-License-Identifier: MIT

//! User directory model.

use serde::{Deserialize, Serialize};

/// A user as returned by the GoTrue admin listing.
///
/// Email may be None for users who signed up through a provider
/// that doesn't share it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Auth user id (UUID string)
    pub id: String,
    pub email: Option<String>,
}
