mod batch_api_client;

pub use batch_api_client::HttpBatchApi;
