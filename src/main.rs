use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use stockcart::application::config::{CartConfig, DEFAULT_STORAGE_KEY};
use stockcart::application::engine::CartEngine;
use stockcart::domain::ports::{PersistenceStoreBox, ProductCatalogBox, StockProviderBox};
use stockcart::error::ErrorKind;
use stockcart::infrastructure::in_memory::{InMemoryCatalog, InMemoryStore};
use stockcart::infrastructure::json_file::JsonFileStore;
use stockcart::interfaces::console::ConsoleNotifier;
use stockcart::interfaces::csv::cart_writer::CartWriter;
use stockcart::interfaces::csv::operation_reader::OperationReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file (type, product, amount)
    input: PathBuf,

    /// JSON catalog fixture with `products` and `stock` collections
    #[arg(long)]
    catalog: PathBuf,

    /// Directory holding the cart snapshot as JSON files
    #[arg(long, conflicts_with = "db_path")]
    data_dir: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Key under which the cart snapshot is stored
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    storage_key: String,
}

fn open_store(cli: &Cli) -> Result<PersistenceStoreBox> {
    if let Some(db_path) = &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            let store = stockcart::infrastructure::rocksdb::RocksDBStore::open(db_path)
                .into_diagnostic()?;
            return Ok(Box::new(store));
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path ({}), but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage.",
                db_path.display()
            );
            return Ok(Box::new(InMemoryStore::new()));
        }
    }

    match &cli.data_dir {
        Some(dir) => Ok(Box::new(JsonFileStore::open(dir).into_diagnostic()?)),
        None => Ok(Box::new(InMemoryStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog_file = File::open(&cli.catalog).into_diagnostic()?;
    let catalog = InMemoryCatalog::from_reader(catalog_file).into_diagnostic()?;
    let stock: StockProviderBox = Box::new(catalog.clone());
    let products: ProductCatalogBox = Box::new(catalog);

    let store = open_store(&cli)?;
    let engine = CartEngine::new(
        CartConfig::with_storage_key(cli.storage_key.clone()),
        stock,
        products,
        store,
        Box::new(ConsoleNotifier),
    );

    // Process operations
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for op_result in reader.operations() {
        match op_result {
            Ok(op) => {
                // Engine failures are already reported through the notifier.
                match op.apply(&engine).await {
                    Err(e) if e.kind() == ErrorKind::Invalid => {
                        eprintln!("Error processing operation: {}", e);
                    }
                    Err(e) => tracing::debug!(error = %e, "operation failed"),
                    Ok(_) => {}
                }
            }
            Err(e) => {
                eprintln!("Error reading operation: {}", e);
            }
        }
    }

    let cart = engine.into_cart();

    let stdout = io::stdout();
    let mut writer = CartWriter::new(stdout.lock());
    writer.write_cart(&cart).into_diagnostic()?;

    Ok(())
}
