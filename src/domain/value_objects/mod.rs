mod identifier;
mod offer_field;
mod offer_id;
mod seller_type;

pub use identifier::Identifier;
pub use offer_field::OfferField;
pub use offer_id::OfferId;
pub use seller_type::SellerType;
