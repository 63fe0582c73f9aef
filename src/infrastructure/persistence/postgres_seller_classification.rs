use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::application::ports::{ClassificationError, SellerClassification};
use crate::domain::value_objects::{Identifier, SellerType};

/// Resolves seller types against the attribute-set table, restricted to the
/// seller entity type.
pub struct PostgresSellerClassification {
    pool: PgPool,
    attribute_set_table: Identifier,
    entity_type: String,
}

impl PostgresSellerClassification {
    pub fn new(
        pool: PgPool,
        attribute_set_table: Identifier,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            attribute_set_table,
            entity_type: entity_type.into(),
        }
    }

    fn lookup_sql(&self) -> String {
        format!(
            r#"
            SELECT attribute_set_id::BIGINT
            FROM {}
            WHERE attribute_set_name = $1 AND entity_type_code = $2
            ORDER BY attribute_set_id
            LIMIT 1
            "#,
            self.attribute_set_table.quoted()
        )
    }
}

#[async_trait]
impl SellerClassification for PostgresSellerClassification {
    async fn attribute_set_id_by_name(
        &self,
        seller_type: &SellerType,
    ) -> Result<Option<i64>, ClassificationError> {
        let sql = self.lookup_sql();
        let row: Option<(i64,)> = sqlx::query_as(&sql)
            .bind(seller_type.as_str())
            .bind(&self.entity_type)
            .fetch_optional(&self.pool)
            .await?;

        let attribute_set_id = row.map(|(id,)| id);
        debug!(
            seller_type = %seller_type,
            ?attribute_set_id,
            "Resolved seller type"
        );

        Ok(attribute_set_id)
    }
}
