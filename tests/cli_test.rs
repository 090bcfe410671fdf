use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn pydev() -> Command {
    let mut cmd = Command::cargo_bin("pydev-docker").unwrap();
    cmd.env_remove("PYDEV_DOCKER_RUNTIME").env_remove("RUST_LOG");
    cmd
}

fn make_package(root: &Path, name: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("__init__.py"), "").unwrap();
}

#[test]
fn test_dry_run_prints_invocation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    make_package(temp_dir.path(), "netpkg");
    std::fs::write(
        temp_dir.path().join("pydev.yml"),
        r#"
docker_options:
  environment:
    APP_ENV: dev
  network: backend
  ports: [8080, "5432:5432"]
"#,
    )?;

    pydev()
        .current_dir(temp_dir.path())
        .args([
            "--dry-run",
            "-p",
            "netpkg",
            "-c",
            "pydev.yml",
            "run",
            "py3_dev",
            "pytest -x",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("docker run --rm -v "))
        .stdout(predicate::str::contains(":/src:rw"))
        .stdout(predicate::str::contains(":/pypath/netpkg:rw"))
        .stdout(predicate::str::contains("-p '8080:8080' -p '5432:5432'"))
        .stdout(predicate::str::contains("--network backend"))
        .stdout(predicate::str::contains("-e APP_ENV=dev -e PYTHONPATH=/pypath/netpkg"))
        .stdout(predicate::str::contains("py3_dev sh -c 'pytest -x'"));
    Ok(())
}

#[test]
fn test_dry_run_pty_with_keep() -> Result<()> {
    let temp_dir = TempDir::new()?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["--dry-run", "--keep", "run_pty", "py3_dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rm").not())
        .stdout(predicate::str::contains("PYTHONPATH").not())
        .stdout(predicate::str::contains("-i -t py3_dev /bin/bash"));
    Ok(())
}

#[test]
fn test_dry_run_windows_target_platform() -> Result<()> {
    let temp_dir = TempDir::new()?;
    make_package(temp_dir.path(), "alpha");
    make_package(temp_dir.path(), "beta");

    pydev()
        .current_dir(temp_dir.path())
        .args([
            "--dry-run",
            "--target-platform",
            "windows",
            "-p",
            "alpha",
            "-p",
            "beta",
            "run",
            "img",
            "ls",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("PYTHONPATH=/pypath/alpha;/pypath/beta"));
    Ok(())
}

#[test]
fn test_runtime_from_environment() -> Result<()> {
    let temp_dir = TempDir::new()?;

    pydev()
        .current_dir(temp_dir.path())
        .env("PYDEV_DOCKER_RUNTIME", "podman")
        .args(["--dry-run", "run", "img", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("podman run"));
    Ok(())
}

#[test]
fn test_missing_config_file_exits_with_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["-c", "nope.yml", "run", "img", "ls"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("nope.yml"));
    Ok(())
}

#[test]
fn test_package_without_init_exits_with_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::create_dir(temp_dir.path().join("plain"))?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["-p", "plain", "run", "img", "ls"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("__init__.py"));
    Ok(())
}

#[test]
fn test_reserved_pythonpath_key_exits_with_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("pydev.yml"),
        "docker_options:\n  environment:\n    PYTHONPATH: /custom\n",
    )?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["-c", "pydev.yml", "run", "img", "ls"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("PYTHONPATH"));
    Ok(())
}

#[test]
fn test_reserved_pythonpath_key_without_value() -> Result<()> {
    for env_section in ["    PYTHONPATH:\n", "    - PYTHONPATH\n"] {
        let temp_dir = TempDir::new()?;
        std::fs::write(
            temp_dir.path().join("pydev.yml"),
            format!("docker_options:\n  environment:\n{env_section}"),
        )?;

        pydev()
            .current_dir(temp_dir.path())
            .env_remove("PYTHONPATH")
            .args(["--dry-run", "-c", "pydev.yml", "run", "img", "ls"])
            .assert()
            .code(64)
            .stderr(predicate::str::contains("PYTHONPATH"));
    }
    Ok(())
}

#[test]
fn test_missing_runtime_binary() -> Result<()> {
    let temp_dir = TempDir::new()?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["--runtime", "/nonexistent/docker", "run", "img", "ls"])
        .assert()
        .code(127);
    Ok(())
}

#[cfg(unix)]
fn fake_runtime(dir: &Path, body: &str) -> Result<String> {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-docker");
    std::fs::write(&script, format!("#!/bin/sh\n{body}\n"))?;
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
    Ok(script.to_string_lossy().into_owned())
}

#[cfg(unix)]
#[test]
fn test_runtime_exit_code_is_propagated() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let runtime = fake_runtime(
        temp_dir.path(),
        "case \"$1\" in image|network) exit 0 ;; esac\nexit 7",
    )?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["--runtime", runtime.as_str(), "run", "img", "false"])
        .assert()
        .code(7);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unknown_image_exits_with_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let runtime = fake_runtime(
        temp_dir.path(),
        "[ \"$1\" = image ] && exit 1\nexit 0",
    )?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["--runtime", runtime.as_str(), "run", "no_such_image", "ls"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("no_such_image"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unknown_network_exits_with_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let runtime = fake_runtime(
        temp_dir.path(),
        "[ \"$1\" = network ] && exit 1\nexit 0",
    )?;
    std::fs::write(
        temp_dir.path().join("pydev.yml"),
        "docker_options:\n  network: no_such_network\n",
    )?;

    pydev()
        .current_dir(temp_dir.path())
        .args(["--runtime", runtime.as_str(), "-c", "pydev.yml", "run", "img", "ls"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("no_such_network"));
    Ok(())
}
