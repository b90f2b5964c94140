mod model;
mod repository;

pub use model::{AssetDB, NewAssetDB, NewPortfolioDB, PortfolioDB};
pub use repository::PortfolioRepository;
