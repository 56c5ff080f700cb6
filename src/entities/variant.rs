use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Purchasable size/color combination with its own price and stock count.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "variants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub size: String,
    pub color: String,
    #[sea_orm(nullable)]
    pub barcode: Option<String>,
    pub stock: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub purchase_price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub sale_price: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub new_price: Option<Decimal>,
    pub discount: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `stock > 0` is the sole purchasability gate.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Price shown to the shopper: `sale_price` while a discount is running,
    /// `purchase_price` otherwise.
    pub fn effective_price(&self) -> Decimal {
        if self.discount > 0 {
            self.sale_price.unwrap_or(self.purchase_price)
        } else {
            self.purchase_price
        }
    }

    /// Pre-discount price, present only while a discount is running.
    pub fn crossed_out_price(&self) -> Option<Decimal> {
        if self.discount > 0 {
            Some(self.purchase_price)
        } else {
            None
        }
    }
}
