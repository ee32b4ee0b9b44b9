use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{EngineError, ResultEngine, categories, expenses};

use super::Engine;

impl Engine {
    pub async fn create_expense(
        &self,
        user_tg_id: i64,
        name: &str,
        currency: &str,
        amount: f64,
        date: NaiveDate,
        category_id: i64,
    ) -> ResultEngine<()> {
        if !self.user_exists(user_tg_id).await? {
            return Err(EngineError::UserNotFound(user_tg_id));
        }
        if categories::Entity::find_by_id(category_id)
            .filter(categories::Column::ConfigId.eq(user_tg_id))
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(EngineError::CategoryNotFound(category_id));
        }

        let active = expenses::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name.trim().to_string()),
            currency: ActiveValue::Set(currency.to_string()),
            amount: ActiveValue::Set(amount),
            date: ActiveValue::Set(date),
            user_tg_id: ActiveValue::Set(user_tg_id),
            category_id: ActiveValue::Set(category_id),
        };
        active.insert(&self.database).await?;
        Ok(())
    }

    /// All expenses of one user, oldest first.
    pub async fn expenses(&self, user_tg_id: i64) -> ResultEngine<Vec<expenses::Model>> {
        if !self.config_exists(user_tg_id).await? {
            return Err(EngineError::ConfigNotFound(user_tg_id));
        }
        let models = expenses::Entity::find()
            .filter(expenses::Column::UserTgId.eq(user_tg_id))
            .order_by_asc(expenses::Column::Date)
            .all(&self.database)
            .await?;
        if models.is_empty() {
            return Err(EngineError::ExpenseNotFound(user_tg_id));
        }
        Ok(models)
    }

    /// Every currency the user has ever recorded an expense in.
    pub async fn currencies_used(&self, user_tg_id: i64) -> ResultEngine<Vec<String>> {
        let rows: Vec<String> = expenses::Entity::find()
            .filter(expenses::Column::UserTgId.eq(user_tg_id))
            .select_only()
            .column(expenses::Column::Currency)
            .distinct()
            .into_tuple()
            .all(&self.database)
            .await?;
        Ok(rows)
    }
}
