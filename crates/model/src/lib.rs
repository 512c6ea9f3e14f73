use schemars::JsonSchema;
use std::fmt::Debug;

use serde::Serialize;
pub use serde_with;
use utility::id::{HasId, Id};

pub mod location;
pub mod pincode;
pub mod provider;
pub mod weather;

pub trait ExampleData {
    fn example_data() -> Self;
}

/// A stored value together with its surrogate key.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
