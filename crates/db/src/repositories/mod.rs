//! Repositories, one per table. All methods are static and take the pool.

mod note_repo;
mod review_repo;
mod session_repo;
mod user_repo;

pub use note_repo::NoteRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
