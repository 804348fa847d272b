use sheep_store::filter::build_filter;
use sheep_store::model::NewBenchmarkMeasurement;
use sheep_store::storage::store::Store;
use std::collections::HashMap;
use tempfile::tempdir;

fn sample(context: &str, gate: &str) -> NewBenchmarkMeasurement {
    NewBenchmarkMeasurement {
        context_name: context.into(),
        input_bitwidth: 8,
        input_signed: false,
        gate_name: gate.into(),
        depth: 3,
        num_slots: 1,
        tbb_enabled: None,
        parameters: "BaseParamA_4096".into(),
        execution_time: 0.125,
        is_correct: true,
        ciphertext_size: Some(32768),
        private_key_size: None,
        public_key_size: None,
    }
}

#[test]
fn test_storage_smoke_lifecycle() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("sheep.db");

    // 1. Open store (init schema)
    let store = Store::open(&db_path)?;
    store.init_schema()?;

    // 2. Insert a couple of gate benchmarks
    let id1 = store.insert_benchmark(&sample("HElib_F2", "AND"))?;
    let id2 = store.insert_benchmark(&sample("SEAL_BFV", "XOR"))?;
    assert!(id2 > id1);

    // 3. Read back through the filter path
    let all = store.query_benchmarks(&build_filter(&HashMap::new()))?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].context_name, "HElib_F2");
    assert_eq!(all[0].ciphertext_size, Some(32768));
    assert_eq!(all[0].private_key_size, None);

    // 4. Verify through an independent raw connection
    let conn = rusqlite::Connection::open(&db_path)?;
    let count: i64 = conn.query_row("SELECT count(*) FROM benchmarks", [], |r| r.get(0))?;
    assert_eq!(count, 2);

    Ok(())
}

#[test]
fn test_init_schema_is_idempotent() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let store = Store::open(&dir.path().join("sheep.db"))?;
    store.init_schema()?;
    store.insert_benchmark(&sample("HElib_F2", "AND"))?;

    // Re-applying the DDL must not touch existing rows.
    store.init_schema()?;
    let all = store.query_benchmarks(&build_filter(&HashMap::new()))?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[test]
fn test_open_creates_parent_dirs() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let nested = dir.path().join("SHEEP").join("frontend").join("sheep.db");
    let store = Store::open(&nested)?;
    store.init_schema()?;
    assert!(nested.exists());
    Ok(())
}

#[test]
fn test_mid_level_insert_and_stats() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.init_schema()?;

    store.insert_benchmark(&sample("HElib_F2", "AND"))?;
    store.insert_mid_level(&sheep_store::model::NewMidLevelBenchmark {
        context_name: "SEAL_BFV".into(),
        input_bitwidth: 16,
        input_signed: true,
        circuit_name: "bubble_sort".into(),
        tbb_enabled: Some(true),
        parameters: "default".into(),
        execution_time: 4.75,
        is_correct: true,
        ciphertext_size: None,
        private_key_size: None,
        public_key_size: None,
    })?;

    let circuits = store.fetch_mid_level_benchmarks()?;
    assert_eq!(circuits.len(), 1);
    assert_eq!(circuits[0].circuit_name, "bubble_sort");
    assert_eq!(circuits[0].tbb_enabled, Some(true));

    let stats = store.stats_best_effort()?;
    assert_eq!(stats.benchmarks, Some(1));
    assert_eq!(stats.mid_level_benchmarks, Some(1));
    assert_eq!(stats.circuit_tests, Some(0));
    Ok(())
}

#[test]
fn test_distinct_contexts_and_gates_are_sorted() -> anyhow::Result<()> {
    let store = Store::memory()?;
    store.init_schema()?;

    store.insert_benchmark(&sample("SEAL_BFV", "XOR"))?;
    store.insert_benchmark(&sample("HElib_F2", "AND"))?;
    store.insert_benchmark(&sample("HElib_F2", "XOR"))?;

    assert_eq!(store.distinct_contexts()?, ["HElib_F2", "SEAL_BFV"]);
    assert_eq!(store.distinct_gates()?, ["AND", "XOR"]);
    Ok(())
}
