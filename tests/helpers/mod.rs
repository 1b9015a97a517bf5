
pub use mock_batch_api::{MockBatchApi, raw_job, stat};
