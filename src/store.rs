use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Order,
};

use crate::{
    entities::movie,
    models::{Movie, NewMovie},
};

/// Predicate, ordering and limit for a single movie query.
#[derive(Clone, Debug)]
pub struct MovieQuery {
    pub condition: Condition,
    pub order: Vec<(movie::Column, Order)>,
    pub limit: Option<u64>,
}

impl MovieQuery {
    pub fn new(condition: Condition) -> Self {
        Self { condition, order: Vec::new(), limit: None }
    }

    pub fn order_by(mut self, column: movie::Column, order: Order) -> Self {
        self.order.push((column, order));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn find_all(&self, query: MovieQuery) -> Result<Vec<Movie>, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Movie>, DbErr>;

    async fn insert(&self, movie: NewMovie) -> Result<Movie, DbErr>;

    /// Overwrites every column of an existing row. `None` means the row was
    /// not there to overwrite.
    async fn replace(&self, movie: Movie) -> Result<Option<Movie>, DbErr>;

    /// Returns whether a row was removed.
    async fn remove(&self, id: i32) -> Result<bool, DbErr>;

    async fn count(&self) -> Result<u64, DbErr>;

    /// Distinct non-empty genres, ascending.
    async fn distinct_genres(&self) -> Result<Vec<String>, DbErr>;

    /// Distinct years, newest first.
    async fn distinct_years(&self) -> Result<Vec<i32>, DbErr>;
}

#[derive(Clone)]
pub struct SqlMovieStore {
    db: DatabaseConnection,
}

impl SqlMovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieStore for SqlMovieStore {
    async fn find_all(&self, query: MovieQuery) -> Result<Vec<Movie>, DbErr> {
        let mut select = movie::Entity::find().filter(query.condition);
        for (column, order) in query.order {
            select = select.order_by(column, order);
        }
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }
        select.all(&self.db).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Movie>, DbErr> {
        movie::Entity::find_by_id(id).one(&self.db).await
    }

    async fn insert(&self, movie: NewMovie) -> Result<Movie, DbErr> {
        let model = movie::ActiveModel {
            id: ActiveValue::NotSet,
            title: Set(movie.title),
            director: Set(movie.director),
            year: Set(movie.year),
            genre: Set(movie.genre),
            runtime_mins: Set(movie.runtime_mins),
            rating: Set(movie.rating),
            description: Set(movie.description),
            poster_url: Set(movie.poster_url),
            is_top_pick: Set(movie.is_top_pick),
        };
        model.insert(&self.db).await
    }

    async fn replace(&self, movie: Movie) -> Result<Option<Movie>, DbErr> {
        let model = movie::ActiveModel {
            id: ActiveValue::Unchanged(movie.id),
            title: Set(movie.title),
            director: Set(movie.director),
            year: Set(movie.year),
            genre: Set(movie.genre),
            runtime_mins: Set(movie.runtime_mins),
            rating: Set(movie.rating),
            description: Set(movie.description),
            poster_url: Set(movie.poster_url),
            is_top_pick: Set(movie.is_top_pick),
        };

        match model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn remove(&self, id: i32) -> Result<bool, DbErr> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, DbErr> {
        movie::Entity::find().count(&self.db).await
    }

    async fn distinct_genres(&self) -> Result<Vec<String>, DbErr> {
        movie::Entity::find()
            .select_only()
            .column(movie::Column::Genre)
            .distinct()
            .filter(movie::Column::Genre.is_not_null())
            .filter(movie::Column::Genre.ne(""))
            .order_by_asc(movie::Column::Genre)
            .into_tuple::<String>()
            .all(&self.db)
            .await
    }

    async fn distinct_years(&self) -> Result<Vec<i32>, DbErr> {
        movie::Entity::find()
            .select_only()
            .column(movie::Column::Year)
            .distinct()
            .order_by_desc(movie::Column::Year)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
    }
}
