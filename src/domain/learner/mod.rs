//! Learner module - users, guidance sessions, assessments, and progress.
//!
//! Entities reference each other by identifier only. Partial updates are
//! expressed as patch structs merged by a pure `apply` function.

mod assessment;
mod offering;
mod progress;
mod session;
mod user;

pub use assessment::RiskAssessment;
pub use offering::Offering;
pub use progress::{ProgressPatch, UserProgress, FIRST_MODULE_BADGE};
pub use session::{NewSession, Session, SessionPatch};
pub use user::{NewUser, User, UserPatch};
