use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::offer_collection::ATTRIBUTE_SET_ID_FIELD;
use crate::application::ports::{
    ClassificationError, EntityMetadata, FetchError, FetchStrategy, SellerClassification,
};
use crate::application::query::{
    BindValue, ColumnRef, CompareOp, Condition, OfferSelect, SortDirection,
};
use crate::domain::entities::{Offer, Seller};
use crate::domain::value_objects::{OfferField, SellerType};

/// Offer and seller rows held in memory.
///
/// Evaluates an [`OfferSelect`] the way PostgreSQL would: comparisons against
/// NULL are false, the seller join is an inner join, ascending order puts
/// NULLs last.
pub struct InMemoryOfferStore {
    seller_metadata: EntityMetadata,
    offers: RwLock<Vec<Offer>>,
    sellers: RwLock<Vec<Seller>>,
    attribute_sets: RwLock<HashMap<String, i64>>,
}

impl InMemoryOfferStore {
    pub fn new(seller_metadata: EntityMetadata) -> Self {
        Self {
            seller_metadata,
            offers: RwLock::new(Vec::new()),
            sellers: RwLock::new(Vec::new()),
            attribute_sets: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_offers(self, offers: impl IntoIterator<Item = Offer>) -> Self {
        self.offers.write().extend(offers);
        self
    }

    pub fn with_seller(self, seller: Seller) -> Self {
        self.insert_seller(seller);
        self
    }

    pub fn with_attribute_set(self, label: impl Into<String>, attribute_set_id: i64) -> Self {
        self.attribute_sets
            .write()
            .insert(label.into(), attribute_set_id);
        self
    }

    /// Insert or replace a seller by id
    pub fn insert_seller(&self, seller: Seller) {
        let mut sellers = self.sellers.write();
        sellers.retain(|existing| existing.id() != seller.id());
        sellers.push(seller);
    }

    /// Offers matching the select's joins and conditions, in storage order
    fn matching(&self, select: &OfferSelect) -> Result<Vec<(Offer, Option<Seller>)>, FetchError> {
        for join in select.joins() {
            if &join.table != self.seller_metadata.entity_table() {
                return Err(FetchError::Unsupported(format!(
                    "join against unknown table {}",
                    join.table
                )));
            }
        }

        let offers = self.offers.read();
        let sellers = self.sellers.read();
        let mut matched = Vec::new();

        for offer in offers.iter() {
            let seller = match select.joins().first() {
                None => None,
                Some(join) => {
                    let mut joined = None;
                    for seller in sellers.iter() {
                        let row = RowView::new(self, select, offer, Some(seller));
                        let left = row.cell(&join.left)?;
                        if left.is_some() && left == row.cell(&join.right)? {
                            joined = Some(*seller);
                            break;
                        }
                    }
                    match joined {
                        Some(seller) => Some(seller),
                        None => continue,
                    }
                }
            };

            let row = RowView::new(self, select, offer, seller.as_ref());
            let mut keep = true;
            for condition in select.conditions() {
                if !evaluate(condition, &row)? {
                    keep = false;
                    break;
                }
            }

            if keep {
                matched.push((offer.clone(), seller));
            }
        }

        Ok(matched)
    }
}

#[async_trait]
impl FetchStrategy for InMemoryOfferStore {
    async fn fetch_all(&self, select: &OfferSelect) -> Result<Vec<Offer>, FetchError> {
        let matched = self.matching(select)?;

        let mut keyed = Vec::with_capacity(matched.len());
        for (offer, seller) in matched {
            let row = RowView::new(self, select, &offer, seller.as_ref());
            let keys = select
                .orderings()
                .iter()
                .map(|ordering| row.cell(&ordering.column))
                .collect::<Result<Vec<_>, _>>()?;
            keyed.push((keys, offer));
        }

        keyed.sort_by(|(left, _), (right, _)| {
            select
                .orderings()
                .iter()
                .zip(left.iter().zip(right.iter()))
                .map(|(ordering, (a, b))| compare_sort_keys(a, b, ordering.direction))
                .find(|ordering| *ordering != CmpOrdering::Equal)
                .unwrap_or(CmpOrdering::Equal)
        });

        let offset = select.offset().unwrap_or(0).max(0) as usize;
        let limit = select.limit().map_or(usize::MAX, |limit| limit.max(0) as usize);

        Ok(keyed
            .into_iter()
            .map(|(_, offer)| offer)
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn fetch_count(&self, select: &OfferSelect) -> Result<i64, FetchError> {
        Ok(self.matching(select)?.len() as i64)
    }
}

#[async_trait]
impl SellerClassification for InMemoryOfferStore {
    async fn attribute_set_id_by_name(
        &self,
        seller_type: &SellerType,
    ) -> Result<Option<i64>, ClassificationError> {
        Ok(self.attribute_sets.read().get(seller_type.as_str()).copied())
    }
}

/// One offer, optionally joined with its seller, seen through column refs
struct RowView<'a> {
    store: &'a InMemoryOfferStore,
    select: &'a OfferSelect,
    offer: &'a Offer,
    seller: Option<&'a Seller>,
}

impl<'a> RowView<'a> {
    fn new(
        store: &'a InMemoryOfferStore,
        select: &'a OfferSelect,
        offer: &'a Offer,
        seller: Option<&'a Seller>,
    ) -> Self {
        Self {
            store,
            select,
            offer,
            seller,
        }
    }

    fn cell(&self, column: &ColumnRef) -> Result<Option<BindValue>, FetchError> {
        if &column.table == self.select.alias() {
            return self.offer_cell(column);
        }

        if &column.table == self.store.seller_metadata.entity_table() {
            if let Some(seller) = self.seller {
                let name = column.column.as_str();
                if name == self.store.seller_metadata.identifier_field().as_str() {
                    return Ok(Some(BindValue::Int(seller.id())));
                }
                if name == ATTRIBUTE_SET_ID_FIELD {
                    return Ok(Some(BindValue::Int(seller.attribute_set_id())));
                }
            }
        }

        Err(FetchError::Unsupported(format!("unknown column {}", column)))
    }

    fn offer_cell(&self, column: &ColumnRef) -> Result<Option<BindValue>, FetchError> {
        let name = column.column.as_str();
        if name == self.select.identifier_field().as_str() {
            return Ok(Some(BindValue::Int(self.offer.id().value())));
        }

        match name.parse::<OfferField>() {
            Ok(OfferField::ProductId) => Ok(Some(BindValue::Int(self.offer.product_id()))),
            Ok(OfferField::SellerId) => Ok(Some(BindValue::Int(self.offer.seller_id()))),
            Ok(OfferField::StartDate) => Ok(self.offer.start_date().map(BindValue::Date)),
            Ok(OfferField::EndDate) => Ok(self.offer.end_date().map(BindValue::Date)),
            Err(_) => Err(FetchError::Unsupported(format!("unknown column {}", column))),
        }
    }
}

fn evaluate(condition: &Condition, row: &RowView<'_>) -> Result<bool, FetchError> {
    match condition {
        Condition::Compare { column, op, value } => Ok(match row.cell(column)? {
            Some(cell) => compare(&cell, *op, value),
            None => false,
        }),
        Condition::IsNull(column) => Ok(row.cell(column)?.is_none()),
        Condition::AnyOf(conditions) => {
            for condition in conditions {
                if evaluate(condition, row)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn compare_values(left: &BindValue, right: &BindValue) -> Option<CmpOrdering> {
    match (left, right) {
        (BindValue::Int(a), BindValue::Int(b)) => Some(a.cmp(b)),
        (BindValue::Date(a), BindValue::Date(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare(cell: &BindValue, op: CompareOp, value: &BindValue) -> bool {
    match (compare_values(cell, value), op) {
        (None, _) => false,
        (Some(ordering), CompareOp::Eq) => ordering == CmpOrdering::Equal,
        (Some(ordering), CompareOp::LtEq) => ordering != CmpOrdering::Greater,
        (Some(ordering), CompareOp::GtEq) => ordering != CmpOrdering::Less,
    }
}

fn compare_sort_keys(
    left: &Option<BindValue>,
    right: &Option<BindValue>,
    direction: SortDirection,
) -> CmpOrdering {
    let ascending = match (left, right) {
        (None, None) => CmpOrdering::Equal,
        (None, Some(_)) => CmpOrdering::Greater,
        (Some(_), None) => CmpOrdering::Less,
        (Some(a), Some(b)) => compare_values(a, b).unwrap_or(CmpOrdering::Equal),
    };

    match direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}
