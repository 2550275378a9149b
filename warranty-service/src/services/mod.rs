pub mod database;
pub mod session;

pub use database::MongoDb;
pub use session::{CookieSessionStore, SessionStore};
