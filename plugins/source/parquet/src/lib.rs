mod convert;
mod source;

pub use source::ParquetSource;
