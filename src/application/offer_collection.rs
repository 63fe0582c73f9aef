use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::application::errors::OfferCollectionError;
use crate::application::ports::{
    CollectionEvent, CollectionEventDispatcher, EntityKind, FetchStrategy, MetadataResolver,
    SellerClassification,
};
use crate::application::query::{
    BindValue, ColumnRef, CompareOp, Condition, Join, OfferSelect, SortDirection,
};
use crate::domain::entities::Offer;
use crate::domain::value_objects::{Identifier, OfferField, OfferId, SellerType};

/// Seller column holding the classification
pub const ATTRIBUTE_SET_ID_FIELD: &str = "attribute_set_id";

/// Shared services a collection reads from. Cheap to clone.
#[derive(Clone)]
pub struct CollectionDependencies {
    pub metadata: Arc<dyn MetadataResolver>,
    pub classification: Arc<dyn SellerClassification>,
    pub fetch: Arc<dyn FetchStrategy>,
    pub events: Arc<dyn CollectionEventDispatcher>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionOptions {
    /// Fail with `SellerClassificationMissing` instead of skipping the
    /// seller-type filter when a label does not resolve
    pub strict_seller_type: bool,
}

/// Model and resource the collection hydrates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub model: &'static str,
    pub resource: &'static str,
    pub main_table: Identifier,
}

#[derive(Debug)]
enum CollectionState {
    Unfrozen,
    Materialized(Vec<Offer>),
}

/// Query builder over offers.
///
/// Filters accumulate into an [`OfferSelect`] until the first [`load`], which
/// executes it through the fetch strategy and freezes the collection.
///
/// [`load`]: OfferCollection::load
pub struct OfferCollection {
    dependencies: CollectionDependencies,
    options: CollectionOptions,
    resource: ResourceDescriptor,
    select: OfferSelect,
    state: CollectionState,
}

impl OfferCollection {
    pub const MODEL: &'static str = "Offer";
    pub const RESOURCE: &'static str = "Offer resource";

    pub fn new(
        dependencies: CollectionDependencies,
        options: CollectionOptions,
    ) -> Result<Self, OfferCollectionError> {
        let offer_metadata = dependencies.metadata.get_metadata(EntityKind::Offer)?;
        let resource = ResourceDescriptor {
            model: Self::MODEL,
            resource: Self::RESOURCE,
            main_table: offer_metadata.entity_table().clone(),
        };

        debug!(
            model = resource.model,
            table = %resource.main_table,
            "Offer collection initialized"
        );

        Ok(Self {
            dependencies,
            options,
            resource,
            select: OfferSelect::new(&offer_metadata),
            state: CollectionState::Unfrozen,
        })
    }

    /// Construct a collection already restricted to `seller_type`, so the
    /// first load sees the filter.
    pub async fn for_seller_type(
        dependencies: CollectionDependencies,
        options: CollectionOptions,
        seller_type: Option<&str>,
    ) -> Result<Self, OfferCollectionError> {
        let mut collection = Self::new(dependencies, options)?;
        if seller_type.is_some() {
            collection.add_seller_type_filter(seller_type).await?;
        }
        Ok(collection)
    }

    pub fn add_product_filter(
        &mut self,
        product_id: i64,
    ) -> Result<&mut Self, OfferCollectionError> {
        self.add_field_filter(OfferField::ProductId, product_id)
    }

    pub fn add_seller_filter(&mut self, seller_id: i64) -> Result<&mut Self, OfferCollectionError> {
        self.add_field_filter(OfferField::SellerId, seller_id)
    }

    /// Keep offers whose validity window contains `date`. A missing start or
    /// end date leaves that side of the window open.
    pub fn add_date_filter(&mut self, date: NaiveDate) -> Result<&mut Self, OfferCollectionError> {
        self.ensure_unfrozen()?;
        debug!(%date, "Adding offer date filter");

        let start = self.select.main_column(OfferField::StartDate.identifier());
        let end = self.select.main_column(OfferField::EndDate.identifier());

        self.select.and_where(Condition::any_of(vec![
            Condition::is_null(start.clone()),
            Condition::compare(start, CompareOp::LtEq, BindValue::Date(date)),
        ]));
        self.select.and_where(Condition::any_of(vec![
            Condition::is_null(end.clone()),
            Condition::compare(end, CompareOp::GtEq, BindValue::Date(date)),
        ]));

        Ok(self)
    }

    /// Keep offers whose seller belongs to the attribute set labelled
    /// `seller_type`.
    ///
    /// `None` is a no-op. A label that does not resolve is a no-op too,
    /// unless the collection is strict. Seller metadata is resolved first, so
    /// missing metadata fails even for an unknown label.
    pub async fn add_seller_type_filter(
        &mut self,
        seller_type: Option<&str>,
    ) -> Result<&mut Self, OfferCollectionError> {
        self.ensure_unfrozen()?;

        let Some(label) = seller_type else {
            return Ok(self);
        };

        let seller_metadata = self.dependencies.metadata.get_metadata(EntityKind::Seller)?;

        let attribute_set_id = match SellerType::new(label) {
            Ok(seller_type) => {
                self.dependencies
                    .classification
                    .attribute_set_id_by_name(&seller_type)
                    .await?
            }
            Err(_) => None,
        };

        let Some(attribute_set_id) = attribute_set_id else {
            if self.options.strict_seller_type {
                return Err(OfferCollectionError::SellerClassificationMissing(
                    label.to_string(),
                ));
            }
            warn!(seller_type = label, "Unknown seller type, seller type filter skipped");
            return Ok(self);
        };

        debug!(
            seller_type = label,
            attribute_set_id, "Adding offer seller type filter"
        );

        let seller_table = seller_metadata.entity_table().clone();
        let join = Join::inner(
            seller_table.clone(),
            ColumnRef::new(
                seller_table.clone(),
                seller_metadata.identifier_field().clone(),
            ),
            self.select.main_column(OfferField::SellerId.identifier()),
        );
        if !self.select.join_inner(join) {
            debug!(table = %seller_table, "Seller table already joined");
        }

        self.select.and_where(Condition::eq(
            ColumnRef::new(seller_table, Identifier::from_static(ATTRIBUTE_SET_ID_FIELD)),
            BindValue::Int(attribute_set_id),
        ));

        Ok(self)
    }

    pub fn set_order(
        &mut self,
        field: OfferField,
        direction: SortDirection,
    ) -> Result<&mut Self, OfferCollectionError> {
        self.ensure_unfrozen()?;
        let column = self.select.main_column(field.identifier());
        self.select.order_by(column, direction);
        Ok(self)
    }

    /// `None` or 0 removes pagination
    pub fn set_page_size(
        &mut self,
        page_size: Option<u32>,
    ) -> Result<&mut Self, OfferCollectionError> {
        self.ensure_unfrozen()?;
        self.select.set_page_size(page_size);
        Ok(self)
    }

    pub fn set_current_page(&mut self, page: u32) -> Result<&mut Self, OfferCollectionError> {
        self.ensure_unfrozen()?;
        self.select.set_current_page(page);
        Ok(self)
    }

    /// Execute the select once and cache the hydrated offers
    pub async fn load(&mut self) -> Result<&[Offer], OfferCollectionError> {
        if !self.is_loaded() {
            let sql = self.select.to_sql();
            self.dependencies.events.dispatch(&CollectionEvent::LoadBefore {
                model: self.resource.model,
                sql: sql.clone(),
            });

            let offers = self.dependencies.fetch.fetch_all(&self.select).await?;
            info!(sql = %sql, count = offers.len(), "Offer collection loaded");

            self.dependencies.events.dispatch(&CollectionEvent::LoadAfter {
                model: self.resource.model,
                item_count: offers.len(),
            });
            self.state = CollectionState::Materialized(offers);
        }

        Ok(self.items())
    }

    /// Number of offers matching the filters, regardless of pagination.
    /// Does not load the collection.
    pub async fn count(&self) -> Result<i64, OfferCollectionError> {
        Ok(self.dependencies.fetch.fetch_count(&self.select).await?)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, CollectionState::Materialized(_))
    }

    /// Loaded offers; empty until [`load`](OfferCollection::load)
    pub fn items(&self) -> &[Offer] {
        match &self.state {
            CollectionState::Materialized(offers) => offers,
            CollectionState::Unfrozen => &[],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Offer> {
        self.items().iter()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn get_item_by_id(&self, id: OfferId) -> Option<&Offer> {
        self.items().iter().find(|offer| offer.id() == id)
    }

    pub fn into_items(self) -> Vec<Offer> {
        match self.state {
            CollectionState::Materialized(offers) => offers,
            CollectionState::Unfrozen => Vec::new(),
        }
    }

    pub fn select(&self) -> &OfferSelect {
        &self.select
    }

    pub fn resource(&self) -> &ResourceDescriptor {
        &self.resource
    }

    pub fn options(&self) -> CollectionOptions {
        self.options
    }

    fn add_field_filter(
        &mut self,
        field: OfferField,
        value: i64,
    ) -> Result<&mut Self, OfferCollectionError> {
        self.ensure_unfrozen()?;
        debug!(field = field.column_name(), value, "Adding offer field filter");

        let column = self.select.main_column(field.identifier());
        self.select.and_where(Condition::eq(column, BindValue::Int(value)));
        Ok(self)
    }

    fn ensure_unfrozen(&self) -> Result<(), OfferCollectionError> {
        if self.is_loaded() {
            return Err(OfferCollectionError::AlreadyMaterialized);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a OfferCollection {
    type Item = &'a Offer;
    type IntoIter = std::slice::Iter<'a, Offer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for OfferCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfferCollection")
            .field("options", &self.options)
            .field("resource", &self.resource)
            .field("select", &self.select.to_sql())
            .field("state", &self.state)
            .finish()
    }
}
