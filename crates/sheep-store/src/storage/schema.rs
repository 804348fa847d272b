pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS benchmarks (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  context_name TEXT NOT NULL,
  input_bitwidth INTEGER NOT NULL,
  input_signed INTEGER NOT NULL,
  gate_name TEXT NOT NULL,
  depth INTEGER NOT NULL,
  num_slots INTEGER NOT NULL,
  tbb_enabled INTEGER,
  parameters TEXT NOT NULL,
  execution_time REAL NOT NULL,
  is_correct INTEGER NOT NULL,
  ciphertext_size INTEGER,
  private_key_size INTEGER,
  public_key_size INTEGER
);

CREATE TABLE IF NOT EXISTS mid_level_benchmarks (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  context_name TEXT NOT NULL,
  input_bitwidth INTEGER NOT NULL,
  input_signed INTEGER NOT NULL,
  circuit_name TEXT NOT NULL,
  tbb_enabled INTEGER,
  parameters TEXT NOT NULL,
  execution_time REAL NOT NULL,
  is_correct INTEGER NOT NULL,
  ciphertext_size INTEGER,
  private_key_size INTEGER,
  public_key_size INTEGER
);

CREATE TABLE IF NOT EXISTS circuit_tests (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  circuit_name TEXT NOT NULL,
  num_inputs INTEGER NOT NULL,
  context_name TEXT NOT NULL,
  input_type TEXT NOT NULL,
  setup_time REAL NOT NULL,
  encryption_time REAL NOT NULL,
  evaluation_time REAL NOT NULL,
  decryption_time REAL NOT NULL,
  uploaded_at TEXT NOT NULL
);
"#;
