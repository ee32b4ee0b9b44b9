//! Flow-level operations on top of the raw engine ops.
//!
//! The bot does not care which low-level step failed, only that a flow as a
//! whole could not complete, so every composite operation collapses engine
//! errors into one coarse `ServiceError` per flow.

use chrono::Local;
use thiserror::Error;

use crate::{Engine, StatisticsRequest, StatsPage, statistics::build_pages};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ServiceError {
    #[error("user is not registered")]
    NotRegistered,
    #[error("expense was not added")]
    ExpenseNotAdded,
    #[error("config was not changed")]
    ConfigNotChanged,
    #[error("statistics were not generated")]
    StatisticsNotGenerated,
}

impl Engine {
    pub async fn is_registered(&self, user_tg_id: i64) -> bool {
        self.config_exists(user_tg_id).await.unwrap_or(false)
    }

    pub async fn register(
        &self,
        user_tg_id: i64,
        language: &str,
        currency: &str,
        categories: &[String],
    ) -> Result<(), ServiceError> {
        self.register_user(user_tg_id, language, currency, categories)
            .await
            .map_err(|_| ServiceError::NotRegistered)
    }

    pub async fn language_of(&self, user_tg_id: i64) -> Option<String> {
        self.config(user_tg_id).await.map(|c| c.language).ok()
    }

    pub async fn currency_of(&self, user_tg_id: i64) -> Option<String> {
        self.config(user_tg_id).await.map(|c| c.currency).ok()
    }

    pub async fn categories_of(&self, user_tg_id: i64) -> Option<Vec<(String, i64)>> {
        match self.categories(user_tg_id).await {
            Ok(categories) if !categories.is_empty() => Some(categories),
            _ => None,
        }
    }

    /// Record an expense dated today in the user's local time.
    pub async fn add_expense(
        &self,
        user_tg_id: i64,
        name: &str,
        currency: &str,
        amount: f64,
        category_id: i64,
    ) -> Result<(), ServiceError> {
        let today = Local::now().date_naive();
        self.create_expense(user_tg_id, name, currency, amount, today, category_id)
            .await
            .map_err(|_| ServiceError::ExpenseNotAdded)
    }

    pub async fn change_language(
        &self,
        user_tg_id: i64,
        language: &str,
    ) -> Result<(), ServiceError> {
        self.set_language(user_tg_id, language)
            .await
            .map_err(|_| ServiceError::ConfigNotChanged)
    }

    pub async fn change_currency(
        &self,
        user_tg_id: i64,
        currency: &str,
    ) -> Result<(), ServiceError> {
        self.set_currency(user_tg_id, currency)
            .await
            .map_err(|_| ServiceError::ConfigNotChanged)
    }

    pub async fn add_categories(
        &self,
        user_tg_id: i64,
        names: &[String],
    ) -> Result<(), ServiceError> {
        self.create_categories(user_tg_id, names)
            .await
            .map_err(|_| ServiceError::ConfigNotChanged)
    }

    pub async fn remove_category(
        &self,
        user_tg_id: i64,
        category_id: i64,
    ) -> Result<(), ServiceError> {
        self.delete_category(user_tg_id, category_id)
            .await
            .map_err(|_| ServiceError::ConfigNotChanged)
    }

    /// Run a statistics request over the user's whole expense history.
    ///
    /// An invalid request, a user with no expenses at all, or a date window
    /// that filters everything out all fail the same way: no partial report.
    pub async fn statistics(
        &self,
        user_tg_id: i64,
        request: &StatisticsRequest,
    ) -> Result<Vec<StatsPage>, ServiceError> {
        let rows = self
            .expenses(user_tg_id)
            .await
            .map_err(|_| ServiceError::StatisticsNotGenerated)?;
        let today = Local::now().date_naive();
        build_pages(&rows, request, today).ok_or(ServiceError::StatisticsNotGenerated)
    }
}
