//! Household permission and approval model.
//!
//! Pure decisions over caller-supplied member snapshots: role permissions
//! with per-member overrides, approval and spending-limit checks, and
//! signed, time-boxed invitation tokens.

pub mod error;
pub mod invite;
pub mod permissions;
pub mod roles;

pub use error::{HouseholdError, Result};
pub use invite::{InviteService, IssuedInvite, DEFAULT_VALIDITY_DAYS};
pub use roles::{RoleDefinition, RolePermissionTable};
