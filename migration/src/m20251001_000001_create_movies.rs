use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_len(Movies::Title, 120))
                    .col(string_len_null(Movies::Director, 80))
                    .col(integer(Movies::Year))
                    .col(string_len_null(Movies::Genre, 40))
                    .col(integer(Movies::RuntimeMins))
                    .col(integer(Movies::Rating))
                    .col(string_len_null(Movies::Description, 1000))
                    .col(string_len_null(Movies::PosterUrl, 300))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_year")
                    .table(Movies::Table)
                    .col(Movies::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    Director,
    Year,
    Genre,
    RuntimeMins,
    Rating,
    Description,
    PosterUrl,
}
