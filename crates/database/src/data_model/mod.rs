use model::WithId;
use utility::id::{HasId, Id};
use weather_info::database::Result;

pub mod location;
pub mod weather;

/// A row as it is stored in a table, convertible into its model type.
pub trait DatabaseRow {
    type Model: HasId<IdType = i32>;

    fn get_id(&self) -> Id<Self::Model>;
    fn to_model(self) -> Result<Self::Model>;
}

pub fn with_id<R: DatabaseRow>(row: R) -> Result<WithId<R::Model>> {
    let id = row.get_id();
    Ok(WithId::new(id, row.to_model()?))
}
