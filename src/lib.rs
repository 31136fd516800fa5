//! Quarry: the typed fetch layer.
//!
//! Turns SQL text and positional arguments into values of a target type: row
//! backed entities ([`Entity`]) or single column scalars ([`Scalar`]), as a lazy
//! stream, a vector or a single optional value. Entities with table metadata can
//! also be looked up by primary key or by any ordered set of columns.
//!
//! ```rust,ignore
//! use quarry::{Entity, Query, Scalar};
//!
//! #[derive(Entity)]
//! #[quarry(name = "players")]
//! struct Player {
//!     #[quarry(primary_key)]
//!     id: i64,
//!     name: String,
//!     team: Option<String>,
//! }
//!
//! let player = Player::fetch_one_by_primary_key(&mut executor, 42).await?;
//! let query = Query::new("SELECT * FROM players WHERE team = ?").bind("red");
//! let red = Player::fetch_all(&mut executor, query).await?;
//! let count = i64::fetch_one(&mut executor, "SELECT COUNT(*) FROM players").await?;
//! ```
//!
//! ## Derive attributes
//!
//! Column names come from the field names (raw identifiers and a leading `_`
//! are stripped) unless renamed with `#[quarry(name = "..")]`:
//! ```rust
//! use quarry::{Entity, PrimaryKey};
//!
//! #[derive(Entity)]
//! #[quarry(schema = "shop", primary_key = (Self::r#type, "code"))]
//! struct Item {
//!     r#type: String,
//!     #[quarry(name = "code")]
//!     _sku: String,
//! }
//!
//! let table = Item::table().unwrap();
//! assert_eq!(table.full_name(), "shop.item");
//! assert_eq!(table.primary_key, Some(PrimaryKey::Columns(&["type", "code"])));
//! ```
//!
//! A composite primary key must name at least one column:
//! ```compile_fail
//! #[derive(quarry::Entity)]
//! #[quarry(primary_key = ())]
//! struct Item {
//!     code: String,
//! }
//! ```
//!
//! and it cannot repeat a column:
//! ```compile_fail
//! #[derive(quarry::Entity)]
//! #[quarry(primary_key = ("code", Self::code))]
//! struct Item {
//!     code: String,
//!     name: String,
//! }
//! ```
//!
//! Two fields cannot read the same column:
//! ```compile_fail
//! #[derive(quarry::Entity)]
//! struct Item {
//!     code: String,
//!     #[quarry(name = "code")]
//!     other_code: String,
//! }
//! ```
pub use quarry_core::*;
pub use quarry_macros::*;
