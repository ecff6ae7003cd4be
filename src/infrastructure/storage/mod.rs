mod local_store;
mod object_ops;
mod s3_store;
mod store_factory;

pub use local_store::LocalMediaStore;
pub use s3_store::S3MediaStore;
pub use store_factory::MediaStoreFactory;
