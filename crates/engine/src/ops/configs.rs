use sea_orm::{ActiveValue, prelude::*};

use crate::{EngineError, ResultEngine, user_configs};

use super::Engine;

impl Engine {
    pub async fn config_exists(&self, user_tg_id: i64) -> ResultEngine<bool> {
        let found = user_configs::Entity::find_by_id(user_tg_id)
            .one(&self.database)
            .await?;
        Ok(found.is_some())
    }

    pub async fn config(&self, user_tg_id: i64) -> ResultEngine<user_configs::Model> {
        user_configs::Entity::find_by_id(user_tg_id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::ConfigNotFound(user_tg_id))
    }

    pub async fn create_config(
        &self,
        user_tg_id: i64,
        language: &str,
        currency: &str,
    ) -> ResultEngine<()> {
        if !self.user_exists(user_tg_id).await? {
            return Err(EngineError::UserNotFound(user_tg_id));
        }
        if self.config_exists(user_tg_id).await? {
            return Err(EngineError::ExistingKey(user_tg_id.to_string()));
        }
        let active = user_configs::ActiveModel {
            user_tg_id: ActiveValue::Set(user_tg_id),
            language: ActiveValue::Set(language.to_string()),
            currency: ActiveValue::Set(currency.to_string()),
        };
        active.insert(&self.database).await?;
        Ok(())
    }

    pub async fn set_language(&self, user_tg_id: i64, language: &str) -> ResultEngine<()> {
        let config = self.config(user_tg_id).await?;
        let mut active: user_configs::ActiveModel = config.into();
        active.language = ActiveValue::Set(language.to_string());
        active.update(&self.database).await?;
        Ok(())
    }

    pub async fn set_currency(&self, user_tg_id: i64, currency: &str) -> ResultEngine<()> {
        let config = self.config(user_tg_id).await?;
        let mut active: user_configs::ActiveModel = config.into();
        active.currency = ActiveValue::Set(currency.to_string());
        active.update(&self.database).await?;
        Ok(())
    }
}
