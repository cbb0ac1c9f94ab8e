mod fiches;
mod key;
mod portfolio;

pub use fiches::{FichesCommands, FichesShowArgs};
pub use key::{KeyCommands, KeySetArgs};
pub use portfolio::{PortfolioClearArgs, PortfolioCommands, PortfolioEntryArgs, PortfolioRadarArgs};
