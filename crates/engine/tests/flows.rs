use chrono::NaiveDate;
use sea_orm::Database;

use engine::{ALL_CATEGORIES_ID, Engine, EngineError, Period, ServiceError, StatisticsRequest};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

async fn registered_engine(user: i64) -> Engine {
    let engine = engine_with_db().await;
    engine
        .register(user, "en", "EUR", &["Food".to_string(), "Bar".to_string()])
        .await
        .unwrap();
    engine
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn registration_creates_user_config_and_categories() {
    let engine = registered_engine(42).await;

    assert!(engine.is_registered(42).await);
    assert_eq!(engine.language_of(42).await, Some("en".to_string()));
    assert_eq!(engine.currency_of(42).await, Some("EUR".to_string()));

    let categories = engine.categories_of(42).await.unwrap();
    let names: Vec<&str> = categories.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Bar"]);
}

#[tokio::test]
async fn registration_is_rejected_twice() {
    let engine = registered_engine(42).await;

    let second = engine.register(42, "ru", "USD", &["Taxi".to_string()]).await;
    assert_eq!(second, Err(ServiceError::NotRegistered));

    // The failed attempt must not have touched the existing config.
    assert_eq!(engine.language_of(42).await, Some("en".to_string()));
    assert_eq!(engine.categories_of(42).await.unwrap().len(), 2);
}

#[tokio::test]
async fn registration_requires_at_least_one_category() {
    let engine = engine_with_db().await;

    let result = engine.register(42, "en", "EUR", &[]).await;
    assert_eq!(result, Err(ServiceError::NotRegistered));
    assert!(!engine.is_registered(42).await);
    assert_eq!(engine.user_exists(42).await, Ok(false));

    assert!(matches!(
        engine.register_user(42, "en", "EUR", &[]).await,
        Err(EngineError::InvalidName(_))
    ));
}

#[tokio::test]
async fn registration_with_bad_category_leaves_nothing_behind() {
    let engine = engine_with_db().await;

    let result = engine
        .register(42, "en", "EUR", &["Food".to_string(), "a:b".to_string()])
        .await;
    assert_eq!(result, Err(ServiceError::NotRegistered));
    assert!(!engine.is_registered(42).await);
    assert_eq!(engine.user_exists(42).await, Ok(false));
}

#[tokio::test]
async fn expense_round_trip() {
    let engine = registered_engine(42).await;
    let (_, food_id) = engine.categories_of(42).await.unwrap()[0].clone();

    engine
        .add_expense(42, "Groceries", "EUR", 150.0, food_id)
        .await
        .unwrap();

    let rows = engine.expenses(42).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Groceries");
    assert_eq!(rows[0].amount, 150.0);
    assert_eq!(rows[0].category_id, food_id);
    assert_eq!(rows[0].date, chrono::Local::now().date_naive());
}

#[tokio::test]
async fn expense_requires_owned_category() {
    let engine = registered_engine(42).await;
    engine
        .register(7, "en", "USD", &["Taxi".to_string()])
        .await
        .unwrap();
    let (_, taxi_id) = engine.categories_of(7).await.unwrap()[0].clone();

    let result = engine.add_expense(42, "Ride", "EUR", 10.0, taxi_id).await;
    assert_eq!(result, Err(ServiceError::ExpenseNotAdded));
}

#[tokio::test]
async fn expenses_of_unknown_user_fail() {
    let engine = engine_with_db().await;
    assert_eq!(
        engine.expenses(42).await,
        Err(EngineError::ConfigNotFound(42))
    );
}

#[tokio::test]
async fn removing_category_cascades_to_expenses() {
    let engine = registered_engine(42).await;
    let categories = engine.categories_of(42).await.unwrap();
    let (_, food_id) = categories[0].clone();
    let (_, bar_id) = categories[1].clone();

    engine
        .add_expense(42, "Groceries", "EUR", 20.0, food_id)
        .await
        .unwrap();
    engine
        .add_expense(42, "Beer", "EUR", 5.0, bar_id)
        .await
        .unwrap();

    engine.remove_category(42, food_id).await.unwrap();

    let remaining = engine.expenses(42).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Beer");
    assert_eq!(engine.categories_of(42).await.unwrap().len(), 1);
}

#[tokio::test]
async fn removing_foreign_category_is_rejected() {
    let engine = registered_engine(42).await;
    engine
        .register(7, "en", "USD", &["Taxi".to_string()])
        .await
        .unwrap();
    let (_, taxi_id) = engine.categories_of(7).await.unwrap()[0].clone();

    assert_eq!(
        engine.remove_category(42, taxi_id).await,
        Err(ServiceError::ConfigNotChanged)
    );
    assert_eq!(engine.categories_of(7).await.unwrap().len(), 1);
}

#[tokio::test]
async fn config_updates_persist() {
    let engine = registered_engine(42).await;

    engine.change_language(42, "ru").await.unwrap();
    engine.change_currency(42, "USD").await.unwrap();

    assert_eq!(engine.language_of(42).await, Some("ru".to_string()));
    assert_eq!(engine.currency_of(42).await, Some("USD".to_string()));
}

#[tokio::test]
async fn config_update_for_unknown_user_fails() {
    let engine = engine_with_db().await;
    assert_eq!(
        engine.change_currency(42, "USD").await,
        Err(ServiceError::ConfigNotChanged)
    );
}

#[tokio::test]
async fn currencies_used_are_distinct() {
    let engine = registered_engine(42).await;
    let (_, food_id) = engine.categories_of(42).await.unwrap()[0].clone();

    for currency in ["EUR", "USD", "EUR"] {
        engine
            .add_expense(42, "x", currency, 1.0, food_id)
            .await
            .unwrap();
    }

    let mut currencies = engine.currencies_used(42).await.unwrap();
    currencies.sort();
    assert_eq!(currencies, vec!["EUR".to_string(), "USD".to_string()]);
}

#[tokio::test]
async fn statistics_over_custom_range() {
    let engine = registered_engine(42).await;
    let categories = engine.categories_of(42).await.unwrap();
    let (_, food_id) = categories[0].clone();
    let (_, bar_id) = categories[1].clone();

    engine
        .create_expense(42, "Groceries", "USD", 100.0, date(2026, 8, 27), food_id)
        .await
        .unwrap();
    engine
        .create_expense(42, "Market", "USD", 50.0, date(2026, 8, 25), food_id)
        .await
        .unwrap();
    engine
        .create_expense(42, "Beer", "EUR", 200.0, date(2026, 7, 21), bar_id)
        .await
        .unwrap();

    let request = StatisticsRequest {
        custom_range: Some((date(2026, 8, 24), date(2026, 8, 30))),
        categories: vec![(food_id, "Food".to_string())],
        ..StatisticsRequest::default()
    };

    let pages = engine.statistics(42, &request).await.unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].category_name, "Food");
    assert_eq!(pages[0].totals, vec![("USD".to_string(), 150.0)]);
}

#[tokio::test]
async fn statistics_with_all_sentinel_sees_everything() {
    let engine = registered_engine(42).await;
    let categories = engine.categories_of(42).await.unwrap();
    let (_, food_id) = categories[0].clone();
    let (_, bar_id) = categories[1].clone();

    engine
        .create_expense(42, "Groceries", "EUR", 10.0, date(2026, 8, 27), food_id)
        .await
        .unwrap();
    engine
        .create_expense(42, "Beer", "EUR", 5.0, date(2026, 8, 27), bar_id)
        .await
        .unwrap();

    let request = StatisticsRequest {
        custom_range: Some((date(2026, 8, 24), date(2026, 8, 30))),
        categories: vec![
            (ALL_CATEGORIES_ID, "All".to_string()),
            (food_id, "Food".to_string()),
        ],
        ..StatisticsRequest::default()
    };

    let pages = engine.statistics(42, &request).await.unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].totals, vec![("EUR".to_string(), 15.0)]);
    assert_eq!(pages[1].totals, vec![("EUR".to_string(), 10.0)]);
}

#[tokio::test]
async fn statistics_without_expenses_fail() {
    let engine = registered_engine(42).await;
    let request = StatisticsRequest {
        period: Some(Period::Week),
        categories: vec![(ALL_CATEGORIES_ID, "All".to_string())],
        ..StatisticsRequest::default()
    };
    assert_eq!(
        engine.statistics(42, &request).await,
        Err(ServiceError::StatisticsNotGenerated)
    );
}
