use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "played_games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: String,
    pub game_type: String,
    pub start_time: i64,
    pub end_time: i64,
    #[sea_orm(column_type = "Text")]
    pub guesses: String,
    pub number_of_guesses: i32,
    pub word: String,
    pub won_game: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
