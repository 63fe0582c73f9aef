mod offer;
mod seller;

pub use offer::Offer;
pub use seller::Seller;
