use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::fs;
use std::process::Command; // Run programs
use tempfile::tempdir; // Create temporary directories for testing

fn pipe_forge() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("pipe-forge")?;
    // Keep the environment from leaking settings into the run
    cmd.env_remove("PIPE_FORGE_ROWS")
        .env_remove("PIPE_FORGE_COLS")
        .env_remove("PIPE_FORGE_SEED")
        .env_remove("PIPE_FORGE_EPSILON")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_basic_run_writes_json() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let output_file = tmp_dir.path().join("puzzle.json");

    let mut cmd = pipe_forge()?;
    cmd.args(["--rows", "5", "--cols", "4", "--seed", "7", "--no-color"])
        .arg("--output-path")
        .arg(&output_file);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Seed 7 (5x4"))
        .stderr(predicate::str::contains("Generated 1 puzzle(s)"));

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output_file)?)?;
    let puzzle = &value[0];
    assert_eq!(puzzle["seed"], 7);
    assert_eq!(puzzle["rows"], 5);
    assert_eq!(puzzle["entry_port"]["row"], -1);
    assert_eq!(puzzle["exit_port"]["row"], 5);
    let pieces = puzzle["pieces"].as_array().ok_or("pieces is not an array")?;
    assert!(pieces.len() >= 5, "path must span every row");
    Ok(())
}

#[test]
fn test_same_seed_same_output() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let first = tmp_dir.path().join("first.json");
    let second = tmp_dir.path().join("second.json");

    for path in [&first, &second] {
        pipe_forge()?
            .args(["--rows", "8", "--cols", "8", "--seed", "123"])
            .args(["--visualization-mode", "none", "--output-path"])
            .arg(path)
            .assert()
            .success();
    }

    assert_eq!(fs::read_to_string(&first)?, fs::read_to_string(&second)?);
    Ok(())
}

#[test]
fn test_batch_stats_csv_and_text() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let stats = tmp_dir.path().join("stats.csv");
    let text = tmp_dir.path().join("boards.txt");

    pipe_forge()?
        .args(["--rows", "3", "--cols", "3", "--seed", "1", "--count", "4"])
        .args(["--visualization-mode", "none"])
        .arg("--stats-csv")
        .arg(&stats)
        .arg("--text-output")
        .arg(&text)
        .assert()
        .success();

    let csv = fs::read_to_string(&stats)?;
    assert_eq!(csv.lines().count(), 5, "header plus one row per puzzle");
    assert!(csv.starts_with("seed,rows,cols,path_length"));
    assert!(csv.contains("\n1,3,3,"));
    assert!(csv.contains("\n4,3,3,"));

    let boards = fs::read_to_string(&text)?;
    assert_eq!(boards.matches('▼').count(), 8, "two ports per board");
    Ok(())
}

#[test]
fn test_show_solution() -> Result<(), Box<dyn std::error::Error>> {
    pipe_forge()?
        .args(["--rows", "2", "--cols", "2", "--seed", "3"])
        .args(["--show-solution", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution"));
    Ok(())
}

#[test]
fn test_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let config = tmp_dir.path().join("pipes.toml");
    fs::write(&config, "rows = 2\ncols = 9\nseed = 99\n")?;

    pipe_forge()?
        .arg("--config")
        .arg(&config)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed 99 (2x9"));
    Ok(())
}

#[test]
fn test_env_overrides_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let config = tmp_dir.path().join("pipes.toml");
    fs::write(&config, "rows = 2\ncols = 9\nseed = 5\n")?;

    // rows and seed come from the file, cols from the environment
    pipe_forge()?
        .env("PIPE_FORGE_COLS", "6")
        .arg("--config")
        .arg(&config)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed 5 (2x6"));
    Ok(())
}

#[test]
fn test_flag_overrides_env() -> Result<(), Box<dyn std::error::Error>> {
    pipe_forge()?
        .env("PIPE_FORGE_COLS", "6")
        .args(["--rows", "2", "--cols", "3", "--seed", "5", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2x3"));
    Ok(())
}

#[test]
fn test_angle_check_rejects_short_list() -> Result<(), Box<dyn std::error::Error>> {
    // A 4-row path has at least four pieces
    pipe_forge()?
        .args(["--rows", "4", "--cols", "4", "--seed", "2"])
        .args(["--visualization-mode", "none", "--angles", "0,90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solved: false"));
    Ok(())
}

#[test]
fn test_single_cell_is_solved_upright() -> Result<(), Box<dyn std::error::Error>> {
    pipe_forge()?
        .args(["--rows", "1", "--cols", "1", "--seed", "0"])
        .args(["--visualization-mode", "none", "--angles", "180.01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solved: true"));
    Ok(())
}

#[test]
fn test_invalid_dimensions_fail() -> Result<(), Box<dyn std::error::Error>> {
    pipe_forge()?
        .args(["--rows", "0", "--cols", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1x1"));
    Ok(())
}

#[test]
fn test_missing_config_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    pipe_forge()?
        .args(["--config", "/no/such/pipes.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
    Ok(())
}
