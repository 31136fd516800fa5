mod as_value;
mod driver;
mod entity;
mod executor;
mod key;
mod query;
mod scalar;
mod sql_writer;
mod table;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use driver::*;
pub use entity::*;
pub use executor::*;
pub use key::*;
pub use query::*;
pub use scalar::*;
pub use sql_writer::*;
pub use table::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
