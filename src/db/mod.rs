pub mod pg;
pub mod schema;

pub use pg::establish_connection;
