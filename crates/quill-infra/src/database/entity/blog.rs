//! Blog entity for SeaORM.

use async_trait::async_trait;
use sea_orm::{ActiveValue, Set};
use sea_orm::entity::prelude::*;

use quill_core::domain::{BlogPost, BlogState};

/// Stored publication state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum State {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

impl From<BlogState> for State {
    fn from(state: BlogState) -> Self {
        match state {
            BlogState::Draft => State::Draft,
            BlogState::Published => State::Published,
        }
    }
}

impl From<State> for BlogState {
    fn from(state: State) -> Self {
        match state {
            State::Draft => BlogState::Draft,
            State::Published => BlogState::Published,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub tags: Vec<String>,
    pub author: String,
    pub owner_id: Uuid,
    pub state: State,
    pub read_count: i64,
    pub read_time: f64,
    pub created_at: DateTimeWithTimeZone,
    pub last_updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// `read_count` is only ever written by the atomic increment. Updates
    /// leave the column out so reads landing mid-edit are kept.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.read_count = ActiveValue::NotSet;
        }
        Ok(self)
    }
}

/// Conversion from SeaORM Model to domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            body: model.body,
            tags: model.tags,
            author: model.author,
            owner_id: model.owner_id,
            state: model.state.into(),
            read_count: model.read_count,
            read_time: model.read_time,
            created_at: model.created_at.into(),
            last_updated_at: model.last_updated_at.into(),
        }
    }
}

/// Conversion from domain BlogPost to SeaORM ActiveModel.
impl From<BlogPost> for ActiveModel {
    fn from(blog: BlogPost) -> Self {
        Self {
            id: Set(blog.id),
            title: Set(blog.title),
            description: Set(blog.description),
            body: Set(blog.body),
            tags: Set(blog.tags),
            author: Set(blog.author),
            owner_id: Set(blog.owner_id),
            state: Set(blog.state.into()),
            read_count: Set(blog.read_count),
            read_time: Set(blog.read_time),
            created_at: Set(blog.created_at.into()),
            last_updated_at: Set(blog.last_updated_at.into()),
        }
    }
}
