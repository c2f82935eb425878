use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "daily_games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub game_type: String,
    #[sea_orm(column_type = "Text")]
    pub daily_words: String,
    #[sea_orm(column_type = "Text")]
    pub previous_words: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
