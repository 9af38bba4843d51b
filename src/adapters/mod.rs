// Adapters layer: concrete implementations of the domain ports (http, smtp, storage).

pub mod http;
pub mod smtp;
pub mod storage;

pub use http::N2yoClient;
pub use smtp::SmtpMailer;
pub use storage::FileLogStore;
