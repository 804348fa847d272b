use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One low-level gate benchmark run. The size and tbb columns are nullable
/// because not every library reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMeasurement {
    pub id: i64,
    pub context_name: String,
    pub input_bitwidth: i64,
    pub input_signed: bool,
    pub gate_name: String,
    pub depth: i64,
    pub num_slots: i64,
    pub tbb_enabled: Option<bool>,
    pub parameters: String,
    pub execution_time: f64,
    pub is_correct: bool,
    pub ciphertext_size: Option<i64>,
    pub private_key_size: Option<i64>,
    pub public_key_size: Option<i64>,
}

/// Insert shape for `benchmarks` (id is assigned by the store).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBenchmarkMeasurement {
    pub context_name: String,
    pub input_bitwidth: i64,
    pub input_signed: bool,
    pub gate_name: String,
    pub depth: i64,
    pub num_slots: i64,
    pub tbb_enabled: Option<bool>,
    pub parameters: String,
    pub execution_time: f64,
    pub is_correct: bool,
    pub ciphertext_size: Option<i64>,
    pub private_key_size: Option<i64>,
    pub public_key_size: Option<i64>,
}

/// One named-circuit benchmark run, same nullability pattern as
/// [`BenchmarkMeasurement`] but keyed by circuit rather than gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidLevelBenchmark {
    pub id: i64,
    pub context_name: String,
    pub input_bitwidth: i64,
    pub input_signed: bool,
    pub circuit_name: String,
    pub tbb_enabled: Option<bool>,
    pub parameters: String,
    pub execution_time: f64,
    pub is_correct: bool,
    pub ciphertext_size: Option<i64>,
    pub private_key_size: Option<i64>,
    pub public_key_size: Option<i64>,
}

/// Insert shape for `mid_level_benchmarks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMidLevelBenchmark {
    pub context_name: String,
    pub input_bitwidth: i64,
    pub input_signed: bool,
    pub circuit_name: String,
    pub tbb_enabled: Option<bool>,
    pub parameters: String,
    pub execution_time: f64,
    pub is_correct: bool,
    pub ciphertext_size: Option<i64>,
    pub private_key_size: Option<i64>,
    pub public_key_size: Option<i64>,
}

/// One user-uploaded custom circuit test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomMeasurement {
    pub id: i64,
    pub circuit_name: String,
    pub num_inputs: i64,
    pub context_name: String,
    pub input_type: String,
    pub setup_time: f64,
    pub encryption_time: f64,
    pub evaluation_time: f64,
    pub decryption_time: f64,
    pub uploaded_at: String,
}

/// Setup, encryption, evaluation and decryption times, in that fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingData(pub [f64; 4]);

impl TimingData {
    pub fn setup(&self) -> f64 {
        self.0[0]
    }

    pub fn encryption(&self) -> f64 {
        self.0[1]
    }

    pub fn evaluation(&self) -> f64 {
        self.0[2]
    }

    pub fn decryption(&self) -> f64 {
        self.0[3]
    }
}

/// Validated upload input. The web layer hands over an `app_data` mapping;
/// binding it here means a missing key fails before anything touches the
/// database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "HE_library")]
    pub he_library: String,
    pub input_type: String,
    #[serde(default)]
    pub num_inputs: i64,
    pub uploaded_filenames: UploadedFilenames,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFilenames {
    pub circuit_file: String,
}

impl UploadRequest {
    pub fn from_app_data(app_data: &serde_json::Value) -> anyhow::Result<Self> {
        serde_json::from_value(app_data.clone()).context("failed to bind upload app_data")
    }

    /// The uploaded circuit file path doubles as the persisted circuit name.
    pub fn circuit_name(&self) -> &str {
        &self.uploaded_filenames.circuit_file
    }
}
