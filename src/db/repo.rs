mod memory;
mod post;
mod post_db;
mod profile;
mod profile_db;

pub use memory::{Fixture, MemoryStore};
pub use post::PostRepo;
pub use post_db::PostRepository;
pub use profile::ProfileRepo;
pub use profile_db::ProfileRepository;
