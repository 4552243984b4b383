// Built-in backend checks. Each one holds its own connection settings,
// issues one trivial command, and maps any error to an unhealthy result.

pub mod http;
pub mod postgres;
pub mod redis;
pub mod tcp;

pub use http::HttpCheck;
pub use postgres::PostgresCheck;
pub use redis::RedisCheck;
pub use tcp::TcpCheck;
