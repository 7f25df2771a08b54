use serde::{Serialize, Serializer, ser::SerializeTuple};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub user_name: String,
    pub password: String,
}

/// Rows go over the wire as `[id, user_name, password]` triples.
impl Serialize for DbUser {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.id)?;
        tup.serialize_element(&self.user_name)?;
        tup.serialize_element(&self.password)?;
        tup.end()
    }
}
