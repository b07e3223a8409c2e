// Git module: committing the formatted message into a local repository

mod commit;
mod repository;
mod utils;

pub use commit::CommitResult;
pub use repository::GitRepo;
pub use utils::is_inside_work_tree;
