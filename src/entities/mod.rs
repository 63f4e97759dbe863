// Entity Models - suppliers and users
//
// Each entity has:
// - Stable identity (UUID) that never changes
// - A registry that owns the in-memory collection; persistence is the
//   caller's job via store::LocalStore

pub mod supplier;
pub mod user;

pub use supplier::{HideGrade, RegistryError, SupplierRecord, SupplierRegistry, ValidationError};
pub use user::{AuthError, Session, User, UserDirectory};
