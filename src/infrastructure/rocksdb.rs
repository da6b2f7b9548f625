use crate::domain::ports::PersistenceStore;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Column Family holding cart snapshots.
pub const CF_CARTS: &str = "carts";

/// A persistent store implementation using RocksDB.
///
/// Snapshots live in their own Column Family keyed by the UTF-8 storage key.
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_carts = ColumnFamilyDescriptor::new(CF_CARTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_carts]).map_err(io::Error::other)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn carts(&self) -> io::Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_CARTS)
            .ok_or_else(|| io::Error::other("Carts column family not found"))
    }
}

impl PersistenceStore for RocksDBStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        let cf = self.carts()?;
        let Some(bytes) = self.db.get_cf(cf, key.as_bytes()).map_err(io::Error::other)? else {
            return Ok(None);
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        let cf = self.carts()?;
        self.db
            .put_cf(cf, key.as_bytes(), value.as_bytes())
            .map_err(io::Error::other)
    }
}
