mod error;
mod post;
mod profile;

pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use profile::ProfileService;
