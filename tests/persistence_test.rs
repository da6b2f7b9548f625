use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_json_store_persistence_recovery() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("cart_data");

    // 1. First run: add two units of product 1
    let ops1 = common::operations_file(&["add, 1,", "add, 1,"]).unwrap();

    let mut cmd1 = Command::new(cargo_bin!("stockcart"));
    cmd1.arg(ops1.path())
        .arg("--catalog")
        .arg(common::catalog_fixture())
        .arg("--data-dir")
        .arg(&data_dir);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("1,Street Low,179.90,2,359.80"));

    // 2. Second run: one more unit against the same data directory
    let ops2 = common::operations_file(&["add, 1,", "add, 2,"]).unwrap();

    let mut cmd2 = Command::new(cargo_bin!("stockcart"));
    cmd2.arg(ops2.path())
        .arg("--catalog")
        .arg(common::catalog_fixture())
        .arg("--data-dir")
        .arg(&data_dir);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // Should have recovered 2 units and added 1 = 3
    assert!(stdout2.contains("1,Street Low,179.90,3,539.70"));
    assert!(stdout2.contains("2,Trail Runner,139.90,1,139.90"));

    let snapshot = std::fs::read_to_string(data_dir.join("stockcart_3Acart.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 2);
    assert_eq!(entries[0]["amount"], 3);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("stockcart_3Acart.json"), "{ broken").unwrap();

    let ops = common::operations_file(&["add, 2,"]).unwrap();

    let output = Command::new(cargo_bin!("stockcart"))
        .arg(ops.path())
        .arg("--catalog")
        .arg(common::catalog_fixture())
        .arg("--data-dir")
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "id,title,price,amount,subtotal\n2,Trail Runner,139.90,1,139.90\n"
    );
}

#[test]
fn test_storage_key_isolates_carts() {
    let dir = tempdir().unwrap();

    let ops = common::operations_file(&["add, 1,"]).unwrap();
    let first = Command::new(cargo_bin!("stockcart"))
        .arg(ops.path())
        .arg("--catalog")
        .arg(common::catalog_fixture())
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--storage-key")
        .arg("shop:cart")
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let empty = common::operations_file(&[]).unwrap();
    let second = Command::new(cargo_bin!("stockcart"))
        .arg(empty.path())
        .arg("--catalog")
        .arg(common::catalog_fixture())
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--storage-key")
        .arg("shop_cart")
        .output()
        .expect("Failed to execute command");

    assert!(second.status.success());
    assert_eq!(
        String::from_utf8_lossy(&second.stdout),
        "id,title,price,amount,subtotal\n"
    );
    assert!(dir.path().join("shop_3Acart.json").exists());
}
