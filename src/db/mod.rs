// SPDX-License-Identifier: MIT

//! Database layer (Supabase).

pub mod supabase;

pub use supabase::SupabaseDb;

/// Table names as constants.
pub mod tables {
    pub const TPVL_MATCHES: &str = "tpvl_matches";
    pub const TPVL_TEAMS: &str = "tpvl_teams";
    pub const TVL_MATCHES: &str = "tvl_matches";
    pub const FAVORITES: &str = "favorites";
    pub const EMAIL_REMINDERS: &str = "email_reminders";
    /// Comments keyed by namespaced match id (`post_id`)
    pub const COMMENTS: &str = "comments";
}
