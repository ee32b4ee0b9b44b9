use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, user_configs, users};

use super::{Engine, normalize_category_name, with_tx};

impl Engine {
    pub async fn user_exists(&self, user_tg_id: i64) -> ResultEngine<bool> {
        let found = users::Entity::find_by_id(user_tg_id)
            .one(&self.database)
            .await?;
        Ok(found.is_some())
    }

    pub async fn create_user(&self, user_tg_id: i64) -> ResultEngine<()> {
        if self.user_exists(user_tg_id).await? {
            return Err(EngineError::ExistingKey(user_tg_id.to_string()));
        }
        let active = users::ActiveModel {
            user_tg_id: ActiveValue::Set(user_tg_id),
        };
        active.insert(&self.database).await?;
        Ok(())
    }

    /// Register a user in one shot: the user row, its config and the initial
    /// categories all land in a single transaction, so a failure half-way
    /// leaves no partially registered user behind.
    pub async fn register_user(
        &self,
        user_tg_id: i64,
        language: &str,
        currency: &str,
        categories: &[String],
    ) -> ResultEngine<()> {
        if categories.is_empty() {
            return Err(EngineError::InvalidName(
                "at least one category is required".to_string(),
            ));
        }
        let names = categories
            .iter()
            .map(|name| normalize_category_name(name))
            .collect::<ResultEngine<Vec<_>>>()?;

        with_tx!(self, |db_tx| {
            let existing = user_configs::Entity::find_by_id(user_tg_id)
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(user_tg_id.to_string()));
            }

            if users::Entity::find_by_id(user_tg_id)
                .one(&db_tx)
                .await?
                .is_none()
            {
                users::ActiveModel {
                    user_tg_id: ActiveValue::Set(user_tg_id),
                }
                .insert(&db_tx)
                .await?;
            }

            user_configs::ActiveModel {
                user_tg_id: ActiveValue::Set(user_tg_id),
                language: ActiveValue::Set(language.to_string()),
                currency: ActiveValue::Set(currency.to_string()),
            }
            .insert(&db_tx)
            .await?;

            for name in names {
                crate::categories::ActiveModel {
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
}
