use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "leaderboard_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `general` or a game type
    pub kind: String,
    pub rank: i32,
    pub user: String,
    /// Average guesses on daily boards, average win rate on the general board
    pub score: f64,
    pub average_time: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
