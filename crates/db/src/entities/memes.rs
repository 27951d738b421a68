//! `SeaORM` Entity for memes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "memes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub meme_url: String,
    #[sea_orm(unique)]
    pub meme_description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for memeshare_core::media::Media {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            url: model.meme_url,
            description: model.meme_description,
        }
    }
}
