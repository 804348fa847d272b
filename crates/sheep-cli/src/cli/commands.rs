use crate::cli::args::{Cli, Command, QueryArgs, UploadArgs};
use anyhow::Context;
use rusqlite::types::Value;
use sheep_store::model::{TimingData, UploadRequest, UploadedFilenames};
use sheep_store::storage::store::Store;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let store = match cli.db {
        Some(path) => Store::open(&path)?,
        None => Store::open_default()?,
    };
    store.init_schema()?;

    match cli.cmd {
        Command::Query(args) => query(&store, args),
        Command::Stats => stats(&store),
        Command::Upload(args) => upload(&store, args),
    }
}

fn query(store: &Store, args: QueryArgs) -> anyhow::Result<i32> {
    let (columns, rows) = store.execute_raw(&args.sql)?;

    match args.format.as_str() {
        "json" => {
            let out = serde_json::json!({
                "columns": columns,
                "rows": rows
                    .iter()
                    .map(|row| row.iter().map(value_to_json).collect::<Vec<_>>())
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        "text" => {
            if !columns.is_empty() {
                println!("{}", columns.join("\t"));
            }
            for row in &rows {
                let cells: Vec<String> = row.iter().map(value_to_string).collect();
                println!("{}", cells.join("\t"));
            }
        }
        other => anyhow::bail!("unknown format '{}' (expected text or json)", other),
    }
    Ok(0)
}

fn stats(store: &Store) -> anyhow::Result<i32> {
    let stats = store.stats_best_effort()?;
    let show = |n: Option<u64>| n.map_or_else(|| "?".to_string(), |n| n.to_string());
    println!("benchmarks: {}", show(stats.benchmarks));
    println!("mid_level_benchmarks: {}", show(stats.mid_level_benchmarks));
    println!("circuit_tests: {}", show(stats.circuit_tests));
    Ok(0)
}

fn upload(store: &Store, args: UploadArgs) -> anyhow::Result<i32> {
    let parts: Vec<f64> = args
        .timings
        .split(',')
        .map(|s| s.trim().parse())
        .collect::<Result<_, _>>()
        .context("invalid --timings (expected four floats)")?;
    anyhow::ensure!(
        parts.len() == 4,
        "--timings needs setup,encryption,evaluation,decryption"
    );

    let request = UploadRequest {
        he_library: args.library,
        input_type: args.input_type,
        num_inputs: args.num_inputs,
        uploaded_filenames: UploadedFilenames {
            circuit_file: args.circuit_file,
        },
    };
    let timings = TimingData([parts[0], parts[1], parts[2], parts[3]]);
    let id = store.upload_test_result(&timings, &request)?;
    println!("uploaded circuit test {}", id);
    Ok(0)
}

fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => hex::encode(b),
    }
}

fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => (*i).into(),
        Value::Real(f) => serde_json::json!(f),
        Value::Text(s) => s.clone().into(),
        Value::Blob(b) => hex::encode(b).into(),
    }
}
