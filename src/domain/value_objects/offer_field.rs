use serde::{Deserialize, Serialize};

use super::Identifier;

/// Columns of the offer table the collection filters and sorts on.
///
/// The identifier column is not listed here because its name comes from
/// entity metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferField {
    ProductId,
    SellerId,
    StartDate,
    EndDate,
}

impl OfferField {
    pub const ALL: [OfferField; 4] = [
        OfferField::ProductId,
        OfferField::SellerId,
        OfferField::StartDate,
        OfferField::EndDate,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            OfferField::ProductId => "product_id",
            OfferField::SellerId => "seller_id",
            OfferField::StartDate => "start_date",
            OfferField::EndDate => "end_date",
        }
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::from_static(self.column_name())
    }
}

impl std::fmt::Display for OfferField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl std::str::FromStr for OfferField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OfferField::ALL
            .into_iter()
            .find(|field| field.column_name() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid offer field: {}", s))
    }
}
