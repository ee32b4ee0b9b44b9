use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod categories;
mod configs;
mod expenses;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Telegram caps callback data at 64 bytes and the `category:<id>:` prefix
/// can take up to 30 of them, so names are bounded too.
const MAX_CATEGORY_NAME_LEN: usize = 32;

/// Category names travel inside `:`-delimited callback payloads, so the
/// delimiter is banned from the name itself and the length is capped.
fn normalize_category_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(
            "category name must not be empty".to_string(),
        ));
    }
    if trimmed.contains(':') {
        return Err(EngineError::InvalidName(format!(
            "category name \"{trimmed}\" must not contain ':'"
        )));
    }
    if trimmed.len() > MAX_CATEGORY_NAME_LEN {
        return Err(EngineError::InvalidName(format!(
            "category name \"{trimmed}\" is longer than {MAX_CATEGORY_NAME_LEN} bytes"
        )));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_name_trimmed() {
        assert_eq!(
            normalize_category_name("  Food  "),
            Ok("Food".to_string())
        );
    }

    #[test]
    fn category_name_rejects_empty() {
        assert!(matches!(
            normalize_category_name("   "),
            Err(EngineError::InvalidName(_))
        ));
    }

    #[test]
    fn category_name_rejects_delimiter() {
        assert!(matches!(
            normalize_category_name("Food:Drinks"),
            Err(EngineError::InvalidName(_))
        ));
    }

    #[test]
    fn category_name_fits_callback_payloads() {
        let longest = "x".repeat(MAX_CATEGORY_NAME_LEN);
        assert_eq!(normalize_category_name(&longest), Ok(longest.clone()));
        assert!(matches!(
            normalize_category_name(&format!("{longest}x")),
            Err(EngineError::InvalidName(_))
        ));
    }
}
