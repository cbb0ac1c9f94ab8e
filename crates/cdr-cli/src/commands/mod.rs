pub mod audit;
pub mod dispatch;
pub mod fiches;
pub mod key;
pub mod portfolio;
pub mod schema;
pub mod shared;
pub mod wizard;
