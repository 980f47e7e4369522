// src/bootstrap.rs
// Makes sure turbostat is on PATH before the sampler starts.
use anyhow::{anyhow, bail, Context, Result};
use log::{info, warn};
use std::env;
use std::fmt;
use std::path::Path;
use std::process::Command;
use crate::config::MonitorConfig;
pub const TOOL: &str = "turbostat";
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
}
impl PackageManager {
    // detection order matters: apt first, then dnf, then pacman
    const ALL: [PackageManager; 3] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Pacman,
    ];
    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
        }
    }
}
/// One privileged command of an install plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallStep {
    pub args: Vec<String>,
}
impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sudo {}", self.args.join(" "))
    }
}
fn step(args: &[&str]) -> InstallStep {
    InstallStep {
        args: args.iter().map(|s| s.to_string()).collect(),
    }
}
pub fn detect_package_manager(available: impl Fn(&str) -> bool) -> Option<PackageManager> {
    PackageManager::ALL.into_iter().find(|pm| available(pm.binary()))
}
/// Commands (run through sudo) that install turbostat with `manager`.
pub fn install_plan(manager: PackageManager, kernel_release: &str) -> Vec<InstallStep> {
    match manager {
        PackageManager::Apt => {
            let tools = format!("linux-tools-{kernel_release}");
            vec![
                step(&["apt", "update"]),
                step(&["apt", "install", "-y", "linux-tools-common", tools.as_str()]),
            ]
        }
        PackageManager::Dnf => vec![step(&["dnf", "install", "-y", "kernel-tools"])],
        PackageManager::Pacman => vec![step(&["pacman", "-S", "--noconfirm", "linux-tools"])],
    }
}
/// Is `name` an executable file somewhere on PATH?
pub fn tool_available(name: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| is_executable(&dir.join(name)))
}
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
fn kernel_release() -> Result<String> {
    let output = Command::new("uname")
        .arg("-r")
        .output()
        .context("running uname -r")?;
    if !output.status.success() {
        bail!("uname -r exited with {}", output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}
fn run_step(step: &InstallStep) -> Result<()> {
    info!("running: {step}");
    let status = Command::new("sudo")
        .args(&step.args)
        .status()
        .with_context(|| format!("failed to start `{step}`"))?;
    if !status.success() {
        bail!("`{step}` exited with {status}");
    }
    Ok(())
}
pub fn ensure_installed(config: &MonitorConfig) -> Result<()> {
    if tool_available(TOOL) {
        return Ok(());
    }
    if !config.auto_install {
        bail!(
            "{TOOL} not found on PATH and auto_install is disabled; please install it manually"
        );
    }
    warn!("{TOOL} not found, installing");
    let manager = detect_package_manager(tool_available).ok_or_else(|| {
        anyhow!("Cannot detect package manager, please install {TOOL} manually")
    })?;
    let release = match manager {
        PackageManager::Apt => kernel_release()?,
        _ => String::new(),
    };
    for step in install_plan(manager, &release) {
        run_step(&step)?;
    }
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn detection_prefers_apt_then_dnf_then_pacman() {
        assert_eq!(detect_package_manager(|_| true), Some(PackageManager::Apt));
        assert_eq!(detect_package_manager(|b| b != "apt"), Some(PackageManager::Dnf));
        assert_eq!(
            detect_package_manager(|b| b == "pacman"),
            Some(PackageManager::Pacman)
        );
        assert_eq!(detect_package_manager(|_| false), None);
    }
    #[test]
    fn apt_plan_targets_running_kernel() {
        let plan = install_plan(PackageManager::Apt, "6.8.0-45-generic");
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].to_string(), "sudo apt update");
        assert_eq!(
            plan[1].to_string(),
            "sudo apt install -y linux-tools-common linux-tools-6.8.0-45-generic"
        );
    }
    #[test]
    fn dnf_and_pacman_plans() {
        assert_eq!(
            install_plan(PackageManager::Dnf, "")[0].to_string(),
            "sudo dnf install -y kernel-tools"
        );
        assert_eq!(
            install_plan(PackageManager::Pacman, "")[0].to_string(),
            "sudo pacman -S --noconfirm linux-tools"
        );
    }
    #[cfg(unix)]
    #[test]
    fn finds_shell_but_not_nonsense() {
        assert!(tool_available("sh"));
        assert!(!tool_available("pkgwatt-definitely-not-installed"));
    }
}
