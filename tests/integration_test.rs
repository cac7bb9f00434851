// file: tests/integration_test.rs
// version: 2.0.0
// guid: 3a6c0f81-d2e9-4b57-8c14-f7b5e20a9d63

//! Integration tests for the provisioning workflow

mod common;

use common::FakeHost;
use pve_template_kit::{
    config::ConfigLoader,
    provision::{ProvisionState, Provisioner},
    Result, TemplateError,
};
use tempfile::TempDir;

const LIST: &str = "pveam available --section system";
const T24: &str = "ubuntu-24.04-standard_24.04-2_amd64.tar.zst";
const T22: &str = "ubuntu-22.04-standard_22.04-1_amd64.tar.zst";
const T20: &str = "ubuntu-20.04-standard_20.04-1_amd64.tar.gz";

fn write_env(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(".env");
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_end_to_end_downloads_newest_release() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let env = write_env(&temp_dir, "HOST=h\nUSER=u\n");

    let config = ConfigLoader::isolated().load_env_file(&env)?;
    let mut host = FakeHost::new()
        .on("pveversion", 0, "pve-manager/8.2.4\n")
        .on(LIST, 0, &format!("system          {}\nsystem          {}\n", T24, T22))
        .on(&format!("test -f /var/lib/vz/template/cache/{}", T24), 1, "")
        .on(&format!("test -f /var/lib/vz/template/cache/{}", T24), 0, "")
        .on(&format!("pveam download local {}", T24), 0, "")
        .on("ls -1t /var/lib/vz/template/cache", 0, &format!("{}\n", T24));

    let summary = Provisioner::new(&config)?.run(&mut host).await?;

    assert_eq!(summary.template.name, T24);
    assert_eq!(host.count_prefix("pveam download"), 1);
    assert!(host.calls.contains(&format!("pveam download local {}", T24)));
    assert_eq!(host.count_prefix("rm "), 0);
    assert_eq!(host.count_prefix("pveam update"), 0);
    assert_eq!(summary.states.last(), Some(&ProvisionState::Done));

    Ok(())
}

#[tokio::test]
async fn test_missing_host_fails_before_any_remote_call() {
    let temp_dir = TempDir::new().unwrap();
    let env = write_env(&temp_dir, "USER=root\nFORCE_DOWNLOAD=true\n");

    let err = ConfigLoader::isolated().load_env_file(&env).unwrap_err();

    assert!(matches!(err, TemplateError::ConfigInvalid(_)));
    assert!(err.to_string().contains("HOST"));
}

#[tokio::test]
async fn test_cleanup_removes_everything_but_newest() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let env = write_env(&temp_dir, "HOST=h\nUSER=u\nCLEANUP_OLD_TEMPLATES=true\n");

    let config = ConfigLoader::isolated().load_env_file(&env)?;
    let mut host = FakeHost::new()
        .on("pveversion", 0, "pve-manager/8.2.4\n")
        .on(LIST, 0, &format!("system {}\nsystem {}\nsystem {}\n", T20, T22, T24))
        .on(&format!("test -f /var/lib/vz/template/cache/{}", T24), 1, "")
        .on(&format!("test -f /var/lib/vz/template/cache/{}", T24), 0, "")
        .on(&format!("pveam download local {}", T24), 0, "")
        .on(
            "ls -1t /var/lib/vz/template/cache",
            0,
            &format!("{}\ndebian-12-standard_12.7-1_amd64.tar.zst\n{}\n{}\n", T24, T22, T20),
        )
        .on(&format!("rm -f /var/lib/vz/template/cache/{}", T22), 0, "")
        .on(&format!("rm -f /var/lib/vz/template/cache/{}", T20), 0, "");

    let summary = Provisioner::new(&config)?.run(&mut host).await?;

    let cleanup = summary.cleanup.expect("cleanup ran");
    assert_eq!(cleanup.removed, vec![T22, T20]);
    assert!(cleanup.failed.is_empty());
    assert_eq!(host.count_prefix("rm "), 2);

    Ok(())
}

#[tokio::test]
async fn test_cleanup_disabled_never_deletes() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let env = write_env(&temp_dir, "HOST=h\nUSER=u\nCLEANUP_OLD_TEMPLATES=false\n");

    let config = ConfigLoader::isolated().load_env_file(&env)?;
    let mut host = FakeHost::new()
        .on("pveversion", 0, "pve-manager/8.2.4\n")
        .on(LIST, 0, &format!("system {}\n", T24))
        .on(&format!("test -f /var/lib/vz/template/cache/{}", T24), 1, "")
        .on(&format!("test -f /var/lib/vz/template/cache/{}", T24), 0, "")
        .on(&format!("pveam download local {}", T24), 0, "")
        .on("ls -1t /var/lib/vz/template/cache", 0, &format!("{}\n{}\n", T24, T22));

    let summary = Provisioner::new(&config)?.run(&mut host).await?;

    assert!(summary.cleanup.is_none());
    assert_eq!(host.count_prefix("rm "), 0);

    Ok(())
}

#[tokio::test]
async fn test_empty_repository_refreshes_once() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let env = write_env(&temp_dir, "HOST=h\nUSER=u\n");

    let config = ConfigLoader::isolated().load_env_file(&env)?;
    let mut host = FakeHost::new()
        .on("pveversion", 0, "pve-manager/8.2.4\n")
        .on(LIST, 0, "")
        .on("pveam update", 0, "");

    let err = Provisioner::new(&config)?.run(&mut host).await.unwrap_err();

    assert!(matches!(err, TemplateError::NoCandidateFound(_)));
    assert_eq!(host.count_prefix("pveam update"), 1);
    assert_eq!(host.count_prefix("pveam download"), 0);

    Ok(())
}
