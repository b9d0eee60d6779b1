pub mod http;

pub use http::HttpApiAdapter;
