pub mod config;
pub mod logging;

pub mod allow_list;
pub mod fetcher;
pub mod persist;
pub mod pipeline;
pub mod storage;
pub mod url_model;
pub mod user_db;
pub mod validate;

pub use allow_list::AllowList;
pub use fetcher::{ByteStream, CurlFetcher, Fetch, FetchError};
pub use persist::{PersistError, PersistOutcome, Persister};
pub use pipeline::{ImageRequest, ProfileImageService, UploadError};
pub use validate::{validate, ParsedTarget, ValidationError};
