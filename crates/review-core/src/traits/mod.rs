//! Ports implemented by the persistence layer

mod repositories;
mod unit_of_work;

pub use repositories::{
    ModeratorRepository, Page, Paginated, ReactionRepository, RepoResult, RestaurantQuery,
    RestaurantRepository, RestaurantSort, ReviewQuery, ReviewRepository, ReviewSort,
};
pub use unit_of_work::{Transaction, UnitOfWork};
