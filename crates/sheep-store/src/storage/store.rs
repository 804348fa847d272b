use crate::filter::Filter;
use crate::model::{
    BenchmarkMeasurement, CustomMeasurement, MidLevelBenchmark, NewBenchmarkMeasurement,
    NewMidLevelBenchmark, TimingData, UploadRequest,
};
use anyhow::Context;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

const BENCHMARK_COLUMNS: &str = "id, context_name, input_bitwidth, input_signed, gate_name, \
     depth, num_slots, tbb_enabled, parameters, execution_time, is_correct, \
     ciphertext_size, private_key_size, public_key_size";

/// Shared handle to the results database. Cheap to clone; all access goes
/// through one connection guarded by a mutex, so callers never coordinate
/// writes themselves.
#[derive(Clone)]
pub struct Store {
    pub conn: Arc<Mutex<Connection>>,
}

pub struct StoreStats {
    pub benchmarks: Option<u64>,
    pub mid_level_benchmarks: Option<u64>,
    pub circuit_tests: Option<u64>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(path).context("failed to open sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the store at the `SHEEP_HOME`-resolved default location.
    pub fn open_default() -> anyhow::Result<Self> {
        let path = crate::config::db_location()?;
        Self::open(&path)
    }

    pub fn memory() -> anyhow::Result<Self> {
        // SQLite in-memory DB
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Ensure the three tables exist. Existing tables are never altered.
    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    pub fn insert_benchmark(&self, m: &NewBenchmarkMeasurement) -> anyhow::Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO benchmarks(context_name, input_bitwidth, input_signed, gate_name,
                                    depth, num_slots, tbb_enabled, parameters, execution_time,
                                    is_correct, ciphertext_size, private_key_size, public_key_size)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                m.context_name,
                m.input_bitwidth,
                m.input_signed,
                m.gate_name,
                m.depth,
                m.num_slots,
                m.tbb_enabled,
                m.parameters,
                m.execution_time,
                m.is_correct,
                m.ciphertext_size,
                m.private_key_size,
                m.public_key_size
            ],
        )
        .context("insert benchmark measurement")?;
        Ok(conn.last_insert_rowid())
    }

    pub fn insert_mid_level(&self, m: &NewMidLevelBenchmark) -> anyhow::Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO mid_level_benchmarks(context_name, input_bitwidth, input_signed,
                                              circuit_name, tbb_enabled, parameters,
                                              execution_time, is_correct, ciphertext_size,
                                              private_key_size, public_key_size)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                m.context_name,
                m.input_bitwidth,
                m.input_signed,
                m.circuit_name,
                m.tbb_enabled,
                m.parameters,
                m.execution_time,
                m.is_correct,
                m.ciphertext_size,
                m.private_key_size,
                m.public_key_size
            ],
        )
        .context("insert mid-level benchmark")?;
        Ok(conn.last_insert_rowid())
    }

    /// Fetch benchmark rows matching a web-form filter. The identity filter
    /// returns the whole table.
    pub fn query_benchmarks(&self, filter: &Filter) -> anyhow::Result<Vec<BenchmarkMeasurement>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM benchmarks{}",
            BENCHMARK_COLUMNS,
            filter.where_clause()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(filter.params()), |row| {
            Ok(BenchmarkMeasurement {
                id: row.get(0)?,
                context_name: row.get(1)?,
                input_bitwidth: row.get(2)?,
                input_signed: row.get(3)?,
                gate_name: row.get(4)?,
                depth: row.get(5)?,
                num_slots: row.get(6)?,
                tbb_enabled: row.get(7)?,
                parameters: row.get(8)?,
                execution_time: row.get(9)?,
                is_correct: row.get(10)?,
                ciphertext_size: row.get(11)?,
                private_key_size: row.get(12)?,
                public_key_size: row.get(13)?,
            })
        })?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        Ok(results)
    }

    /// Save one user-specified circuit test. Constructed entirely before the
    /// transaction starts, so a binding failure never leaves a partial row.
    pub fn upload_test_result(
        &self,
        timing_data: &TimingData,
        request: &UploadRequest,
    ) -> anyhow::Result<i64> {
        let uploaded_at = chrono::Utc::now().to_rfc3339();
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO circuit_tests(circuit_name, num_inputs, context_name, input_type,
                                       setup_time, encryption_time, evaluation_time,
                                       decryption_time, uploaded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                request.circuit_name(),
                request.num_inputs,
                request.he_library,
                request.input_type,
                timing_data.setup(),
                timing_data.encryption(),
                timing_data.evaluation(),
                timing_data.decryption(),
                uploaded_at
            ],
        )
        .context("insert circuit test")?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        tracing::info!(
            circuit = request.circuit_name(),
            context = %request.he_library,
            "uploaded custom test result"
        );
        Ok(id)
    }

    pub fn fetch_mid_level_benchmarks(&self) -> anyhow::Result<Vec<MidLevelBenchmark>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, context_name, input_bitwidth, input_signed, circuit_name, tbb_enabled,
                    parameters, execution_time, is_correct, ciphertext_size, private_key_size,
                    public_key_size
             FROM mid_level_benchmarks
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(MidLevelBenchmark {
                id: row.get(0)?,
                context_name: row.get(1)?,
                input_bitwidth: row.get(2)?,
                input_signed: row.get(3)?,
                circuit_name: row.get(4)?,
                tbb_enabled: row.get(5)?,
                parameters: row.get(6)?,
                execution_time: row.get(7)?,
                is_correct: row.get(8)?,
                ciphertext_size: row.get(9)?,
                private_key_size: row.get(10)?,
                public_key_size: row.get(11)?,
            })
        })?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        Ok(results)
    }

    pub fn fetch_circuit_tests(&self) -> anyhow::Result<Vec<CustomMeasurement>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, circuit_name, num_inputs, context_name, input_type,
                    setup_time, encryption_time, evaluation_time, decryption_time, uploaded_at
             FROM circuit_tests
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CustomMeasurement {
                id: row.get(0)?,
                circuit_name: row.get(1)?,
                num_inputs: row.get(2)?,
                context_name: row.get(3)?,
                input_type: row.get(4)?,
                setup_time: row.get(5)?,
                encryption_time: row.get(6)?,
                evaluation_time: row.get(7)?,
                decryption_time: row.get(8)?,
                uploaded_at: row.get(9)?,
            })
        })?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        Ok(results)
    }

    /// Context names present in the benchmarks table, for form population.
    pub fn distinct_contexts(&self) -> anyhow::Result<Vec<String>> {
        self.distinct_column("context_name")
    }

    /// Gate names present in the benchmarks table, for form population.
    pub fn distinct_gates(&self) -> anyhow::Result<Vec<String>> {
        self.distinct_column("gate_name")
    }

    fn distinct_column(&self, column: &str) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT DISTINCT {col} FROM benchmarks ORDER BY {col}",
            col = column
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn stats_best_effort(&self) -> anyhow::Result<StoreStats> {
        let conn = self.conn.lock().unwrap();

        let count = |table: &str| -> Option<u64> {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                r.get::<_, i64>(0).map(|x| x as u64)
            })
            .ok()
        };

        Ok(StoreStats {
            benchmarks: count("benchmarks"),
            mid_level_benchmarks: count("mid_level_benchmarks"),
            circuit_tests: count("circuit_tests"),
        })
    }
}
