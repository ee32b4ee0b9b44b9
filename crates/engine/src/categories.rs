//! A user-defined expense category.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub config_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_configs::Entity",
        from = "Column::ConfigId",
        to = "super::user_configs::Column::UserTgId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Config,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::user_configs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Config.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
