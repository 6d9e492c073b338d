//! Persistence layer: repositories and the transactional unit of work
//!
//! Repositories are generic over the SeaORM connection they run on, so the
//! same query code serves both a plain connection and a transaction handed
//! out by [`UnitOfWork`].

pub mod authors;
pub mod books;
pub mod unit_of_work;

pub use authors::AuthorRepository;
pub use books::{BookFilter, BookRepository, NewBook};
pub use unit_of_work::UnitOfWork;
