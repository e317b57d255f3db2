pub mod api;
pub mod links;

pub use links::DEFAULT_PAGE_SIZE;
