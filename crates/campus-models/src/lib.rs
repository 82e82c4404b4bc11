//! # Campus Models
//!
//! Domain models, request DTOs and [`Table`](campus_db::Table) descriptors.
//!
//! - [`auth`]: login / bootstrap registration payloads and token responses
//! - [`schools`]: tenants
//! - [`users`]: school members and platform super-admins
//! - [`classes`]: classes within a school
//! - [`subjects`]: subjects within a school, optionally tied to a class
//!
//! Each entity module exposes a `const` descriptor (`SCHOOLS`, `USERS`, ...)
//! listing the columns that may be read, filtered and sorted through the
//! query composer. The row struct of each entity matches its descriptor.

pub mod auth;
pub mod classes;
pub mod schools;
pub mod subjects;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginRequest, RegisterSuperAdminRequest};
pub use classes::{CLASSES, Class, CreateClassDto, UpdateClassDto};
pub use schools::{CreateSchoolDto, SCHOOLS, School, UpdateSchoolDto};
pub use subjects::{CreateSubjectDto, SUBJECTS, Subject, UpdateSubjectDto};
pub use users::{CreateMemberDto, USERS, User};
