use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, categories};

use super::{Engine, normalize_category_name, with_tx};

impl Engine {
    /// Append categories to an existing config. All of them land in one
    /// transaction.
    pub async fn create_categories(
        &self,
        user_tg_id: i64,
        names: &[String],
    ) -> ResultEngine<()> {
        if !self.config_exists(user_tg_id).await? {
            return Err(EngineError::ConfigNotFound(user_tg_id));
        }
        let names = names
            .iter()
            .map(|name| normalize_category_name(name))
            .collect::<ResultEngine<Vec<_>>>()?;

        with_tx!(self, |db_tx| {
            for name in names {
                categories::ActiveModel {
                    id: ActiveValue::NotSet,
                    name: ActiveValue::Set(name),
                    config_id: ActiveValue::Set(user_tg_id),
                }
                .insert(&db_tx)
                .await?;
            }
            Ok(())
        })
    }

    /// List the user's categories as `(name, id)` pairs, in insertion order.
    pub async fn categories(&self, user_tg_id: i64) -> ResultEngine<Vec<(String, i64)>> {
        if !self.config_exists(user_tg_id).await? {
            return Err(EngineError::ConfigNotFound(user_tg_id));
        }
        let models = categories::Entity::find()
            .filter(categories::Column::ConfigId.eq(user_tg_id))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models
            .into_iter()
            .map(|model| (model.name, model.id))
            .collect())
    }

    /// Delete one of the user's categories. Expenses recorded under it go
    /// with it through the cascade.
    pub async fn delete_category(&self, user_tg_id: i64, category_id: i64) -> ResultEngine<()> {
        let found = categories::Entity::find_by_id(category_id)
            .filter(categories::Column::ConfigId.eq(user_tg_id))
            .one(&self.database)
            .await?
            .ok_or(EngineError::CategoryNotFound(category_id))?;
        found.delete(&self.database).await?;
        Ok(())
    }
}
