#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240201_000001_create_categories_table::Migration),
            Box::new(m20240201_000002_create_products_table::Migration),
            Box::new(m20240201_000003_create_variants_table::Migration),
            Box::new(m20240201_000004_create_user_table::Migration),
            Box::new(m20240201_000005_create_order_tables::Migration),
            Box::new(m20240201_000006_create_pages_table::Migration),
            Box::new(m20240201_000007_add_catalog_indexes::Migration),
        ]
    }
}

mod m20240201_000001_create_categories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000001_create_categories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Categories::Name).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Categories {
        Table,
        Id,
        Name,
    }
}

mod m20240201_000002_create_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000002_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Products::Article)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(
                            ColumnDef::new(Products::Gender)
                                .string_len(10)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::Season).string().not_null())
                        .col(ColumnDef::new(Products::CategoryId).integer().not_null())
                        .col(ColumnDef::new(Products::Image).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_category")
                                .from(Products::Table, Products::CategoryId)
                                .to(Categories::Table, Categories::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Products {
        Table,
        Id,
        Article,
        Name,
        Gender,
        Season,
        CategoryId,
        Image,
    }

    #[derive(Iden)]
    enum Categories {
        Table,
        Id,
    }
}

mod m20240201_000003_create_variants_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000003_create_variants_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Variants::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Variants::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Variants::ProductId).integer().not_null())
                        .col(ColumnDef::new(Variants::Size).string().not_null())
                        .col(ColumnDef::new(Variants::Color).string().not_null())
                        .col(ColumnDef::new(Variants::Barcode).string().null())
                        .col(
                            ColumnDef::new(Variants::Stock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Variants::PurchasePrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Variants::SalePrice)
                                .decimal_len(10, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Variants::NewPrice)
                                .decimal_len(10, 2)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Variants::Discount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_variants_product")
                                .from(Variants::Table, Variants::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Variants::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Variants {
        Table,
        Id,
        ProductId,
        Size,
        Color,
        Barcode,
        Stock,
        PurchasePrice,
        SalePrice,
        NewPrice,
        Discount,
    }

    #[derive(Iden)]
    enum Products {
        Table,
        Id,
    }
}

mod m20240201_000004_create_user_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000004_create_user_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(User::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(User::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(User::Name).string().not_null())
                        .col(ColumnDef::new(User::Tel).string().not_null().unique_key())
                        .col(ColumnDef::new(User::Sale).integer().not_null().default(0))
                        .col(ColumnDef::new(User::PasswordHash).string().not_null())
                        .col(ColumnDef::new(User::Salt).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(User::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum User {
        Table,
        Id,
        Name,
        Tel,
        Sale,
        PasswordHash,
        Salt,
    }
}

mod m20240201_000005_create_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000005_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Card::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Card::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Card::CustomerName).string().not_null())
                        .col(ColumnDef::new(Card::Tel).string().not_null())
                        .col(ColumnDef::new(Card::City).string().not_null())
                        .col(ColumnDef::new(Card::Branch).string().null())
                        .col(ColumnDef::new(Card::Article).string().not_null())
                        .col(ColumnDef::new(Card::ProductName).string().not_null())
                        .col(ColumnDef::new(Card::Size).string().not_null())
                        .col(ColumnDef::new(Card::Color).string().not_null())
                        .col(
                            ColumnDef::new(Card::Price)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Card::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(Card::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QuickOrder::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QuickOrder::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(QuickOrder::Name).string().not_null())
                        .col(ColumnDef::new(QuickOrder::Tel).string().not_null())
                        .col(ColumnDef::new(QuickOrder::Article).string().not_null())
                        .col(
                            ColumnDef::new(QuickOrder::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(QuickOrder::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Card::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Card {
        Table,
        Id,
        CustomerName,
        Tel,
        City,
        Branch,
        Article,
        ProductName,
        Size,
        Color,
        Price,
        Quantity,
        CreatedAt,
    }

    #[derive(Iden)]
    pub enum QuickOrder {
        Table,
        Id,
        Name,
        Tel,
        Article,
        CreatedAt,
    }
}

mod m20240201_000006_create_pages_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000006_create_pages_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Pages::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Pages::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Pages::Slug).string().not_null().unique_key())
                        .col(ColumnDef::new(Pages::Title).string().not_null())
                        .col(ColumnDef::new(Pages::Content).text().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Pages::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Pages {
        Table,
        Id,
        Slug,
        Title,
        Content,
    }
}

mod m20240201_000007_add_catalog_indexes {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240201_000007_add_catalog_indexes"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_gender_category")
                        .table(Products::Table)
                        .col(Products::Gender)
                        .col(Products::CategoryId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_variants_product")
                        .table(Variants::Table)
                        .col(Variants::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_variants_stock")
                        .table(Variants::Table)
                        .col(Variants::Stock)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_index(
                    Index::drop()
                        .name("idx_products_gender_category")
                        .table(Products::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_index(
                    Index::drop()
                        .name("idx_variants_product")
                        .table(Variants::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_index(
                    Index::drop()
                        .name("idx_variants_stock")
                        .table(Variants::Table)
                        .to_owned(),
                )
                .await
        }
    }

    #[derive(Iden)]
    enum Products {
        Table,
        Gender,
        CategoryId,
    }

    #[derive(Iden)]
    enum Variants {
        Table,
        ProductId,
        Stock,
    }
}
