use weather_info::database::DatabaseError;

pub mod location;
pub mod weather;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(db) = &why {
        if db.is_unique_violation() {
            return DatabaseError::Conflict(db.message().to_owned());
        }
        // referenced location does not exist
        if db.is_foreign_key_violation() {
            return DatabaseError::NotFound;
        }
    }
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}
