// tests/run_entry.rs

use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use ca_packager::cli::CliArgs;
use ca_packager::engine::report::FAILURE_MESSAGE;
use ca_packager::{print_dry_run, run_with};
use ca_packager::config::ConfigFile;
use ca_packager_test_utils::builders::workdir_with_inputs;
use ca_packager_test_utils::fake_backend::{Call, CountingPrompt, FakeBackend, FakeEnvironment};
use ca_packager_test_utils::{init_tracing, with_timeout};
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn Error>>;

struct EntryRun {
    code: i32,
    output: String,
    pauses: usize,
}

async fn run_entry(args: CliArgs, env: &FakeEnvironment) -> Result<EntryRun, Box<dyn Error>> {
    let cfg = ConfigFile::default();
    let mut out = Vec::new();
    let mut prompt = CountingPrompt::default();

    let code = with_timeout(run_with(
        &args,
        FakeBackend::new(env.clone()),
        Arc::new(workdir_with_inputs(&cfg)),
        &mut out,
        &mut prompt,
    ))
    .await?;

    Ok(EntryRun {
        code,
        output: String::from_utf8_lossy(&out).into_owned(),
        pauses: prompt.pauses(),
    })
}

#[tokio::test]
async fn dry_run_prints_commands_without_running_them() -> TestResult {
    init_tracing();
    let env = FakeEnvironment::with_tool(false);
    let args = CliArgs {
        dry_run: true,
        ..CliArgs::default()
    };

    let run = run_entry(args, &env).await?;

    assert_eq!(run.code, 0);
    assert!(env.calls().is_empty());
    assert_eq!(run.pauses, 0);
    assert!(run.output.contains("check:   pyinstaller --version"));
    assert!(run.output.contains("install: pip install pyinstaller"));
    assert!(run.output.contains("build:   pyinstaller --name=CA_Update --onefile --windowed"));
    assert!(run.output.contains("CA_Tracking_GUI.py"));
    Ok(())
}

#[test]
fn dry_run_lists_output_path() -> TestResult {
    let cfg = ConfigFile::default();
    let mut out = Vec::new();

    print_dry_run(&cfg, &mut out)?;

    let text = String::from_utf8(out)?;
    let output_line = text
        .lines()
        .find(|l| l.trim_start().starts_with("output:"))
        .ok_or("no output line")?;
    assert!(output_line.contains(&cfg.build.output_path().display().to_string()));
    Ok(())
}

#[tokio::test]
async fn missing_config_file_is_reported_and_paused_on() -> TestResult {
    init_tracing();
    let env = FakeEnvironment::with_tool(true);
    let dir = tempfile::tempdir()?;
    let args = CliArgs {
        config: Some(dir.path().join("CaPackager.toml")),
        ..CliArgs::default()
    };

    let run = run_entry(args, &env).await?;

    assert_eq!(run.code, 1);
    assert!(run.output.contains(FAILURE_MESSAGE));
    assert_eq!(run.pauses, 1);
    assert!(env.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn invalid_config_is_reported_and_paused_on() -> TestResult {
    init_tracing();
    let env = FakeEnvironment::with_tool(true);
    let mut file = NamedTempFile::new()?;
    write!(file, "[build]\nentry = \"CA_Tracking_GUI.exe\"\n")?;
    let args = CliArgs {
        config: Some(file.path().to_path_buf()),
        ..CliArgs::default()
    };

    let run = run_entry(args, &env).await?;

    assert_eq!(run.code, 1);
    assert!(run.output.contains("CA_Tracking_GUI.exe"));
    assert_eq!(run.pauses, 1);
    Ok(())
}

#[tokio::test]
async fn skip_install_flag_stops_before_install() -> TestResult {
    init_tracing();
    let env = FakeEnvironment::with_tool(false);
    let args = CliArgs {
        skip_install: true,
        ..CliArgs::default()
    };

    let run = run_entry(args, &env).await?;

    assert_eq!(run.code, 1);
    assert_eq!(env.calls(), vec![Call::CheckPresence]);
    assert_eq!(run.pauses, 1);
    Ok(())
}

#[tokio::test]
async fn default_arguments_run_the_full_sequence() -> TestResult {
    init_tracing();
    let env = FakeEnvironment::with_tool(false);

    let run = run_entry(CliArgs::default(), &env).await?;

    assert_eq!(run.code, 0);
    assert_eq!(env.install_count(), 1);
    assert_eq!(env.build_calls(), vec![ConfigFile::default().build.pyinstaller_args()]);
    assert_eq!(run.pauses, 1);
    Ok(())
}
