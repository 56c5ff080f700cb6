use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog product. `article` is the human-facing SKU string and the external
/// lookup key for detail pages; variants carry prices and inventory.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub article: String,
    pub name: String,
    pub gender: Gender,
    pub season: String,
    pub category_id: i32,
    #[sea_orm(nullable)]
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::variant::Entity")]
    Variants,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Catalog partition tokens. Stored as the locale strings the storefront and
/// its data have always used; the enum keeps invalid tokens out of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Gender {
    #[sea_orm(string_value = "чол")]
    #[serde(rename = "чол")]
    Men,
    #[sea_orm(string_value = "жін")]
    #[serde(rename = "жін")]
    Women,
    #[sea_orm(string_value = "хлопч")]
    #[serde(rename = "хлопч")]
    Boys,
    #[sea_orm(string_value = "дівч")]
    #[serde(rename = "дівч")]
    Girls,
}
