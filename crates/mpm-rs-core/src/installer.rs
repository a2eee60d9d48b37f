//! Drives the downloaded mpm binary through an installation.

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::Release;

pub mod download;
pub mod extract;

#[derive(Debug, Error)]
pub enum LaunchError {
	#[error("failed to start mpm: {0}")]
	Spawn(std::io::Error),
	#[error("mpm exited with {0}")]
	Failed(std::process::ExitStatus),
}

/// Everything the user chose, ready to be handed to mpm.
#[derive(Debug, Clone)]
pub struct InstallRequest {
	pub release: Release,
	pub destination: PathBuf,
	pub products: Vec<String>,
	pub license_file: Option<PathBuf>,
}

impl InstallRequest {
	/// The argument list mpm is invoked with. Each product is a separate argument.
	pub fn to_args(&self) -> Vec<String> {
		let mut args = vec![
			"install".to_string(),
			format!("--release={}", self.release),
			format!("--destination={}", self.destination.display()),
			"--products".to_string(),
		];
		args.extend(self.products.iter().cloned());
		args
	}
}

/// mpm's license files are flexlm `.dat` or `.lic` files.
pub fn is_license_file(path: impl AsRef<Path>) -> bool {
	matches!(path.as_ref().extension().and_then(|e| e.to_str()), Some("dat") | Some("lic"))
}

/// Sets the exec bit on the bare Linux artifact. No-op elsewhere.
pub fn ensure_executable(path: impl AsRef<Path>) -> std::io::Result<()> {
	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		let path = path.as_ref();
		let mut permissions = std::fs::metadata(path)?.permissions();
		permissions.set_mode(permissions.mode() | 0o755);
		std::fs::set_permissions(path, permissions)?;
	}
	#[cfg(not(unix))]
	let _ = path;
	Ok(())
}

/// Runs mpm with the given request, streaming its stdout/stderr to ours, then
/// places the license file if one was chosen.
///
/// # Errors
/// - [`Launch`](crate::Error::Launch) when mpm cannot be started or exits non-zero.
/// - [`IO`](crate::Error::IO) when placing the license file.
pub async fn run_install(config: &crate::Config, platform: crate::Platform, request: &InstallRequest) -> crate::Result<()> {
	let mpm = platform.mpm_executable(config.download_dir());
	let args = request.to_args();

	log::debug!("Launching {} with args {:?}", mpm.display(), args);
	let status = tokio::process::Command::new(&mpm)
		.args(&args)
		.status()
		.await
		.map_err(LaunchError::Spawn)?;

	if !status.success() {
		return Err(LaunchError::Failed(status).into());
	}
	log::info!("mpm finished installing {} products.", request.products.len());

	if let Some(license_file) = &request.license_file {
		place_license_file(&request.destination, license_file)?;
	}

	Ok(())
}

/// Copies the chosen license file into `<destination>/licenses/`, where MATLAB
/// looks for it.
pub fn place_license_file(destination: impl AsRef<Path>, license_file: impl AsRef<Path>) -> std::io::Result<()> {
	let license_file = license_file.as_ref();
	let licenses_dir = destination.as_ref().join("licenses");
	std::fs::create_dir_all(&licenses_dir)?;

	let file_name = license_file.file_name().ok_or_else(|| {
		std::io::Error::new(std::io::ErrorKind::InvalidInput, "license path has no file name")
	})?;

	log::info!("Placing license file in {}", licenses_dir.display());
	std::fs::copy(license_file, licenses_dir.join(file_name))?;
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;

	fn request() -> InstallRequest {
		InstallRequest {
			release: "R2023a".parse().unwrap(),
			destination: PathBuf::from("/usr/local/MATLAB/R2023a"),
			products: vec!["MATLAB".to_string(), "Simulink".to_string()],
			license_file: None,
		}
	}

	#[test]
	fn args_follow_the_mpm_wire_shape() {
		assert_eq!(request().to_args(), vec![
			"install",
			"--release=R2023a",
			"--destination=/usr/local/MATLAB/R2023a",
			"--products",
			"MATLAB",
			"Simulink",
		]);
	}

	#[test] fn dat_and_lic_extensions_are_licenses() { assert!(is_license_file("network.dat") && is_license_file("/a/b/license.lic")) }
	#[test] fn other_extensions_are_not_licenses() { assert!(!is_license_file("license.txt") && !is_license_file("license")) }

	#[test]
	fn license_file_is_copied_into_licenses_dir() {
		let dir = tempfile::tempdir().unwrap();
		let license = dir.path().join("license.lic");
		std::fs::write(&license, "SERVER host ANY 27000").unwrap();

		let destination = dir.path().join("install");
		std::fs::create_dir_all(&destination).unwrap();
		place_license_file(&destination, &license).unwrap();

		let placed = destination.join("licenses").join("license.lic");
		assert_eq!(std::fs::read_to_string(placed).unwrap(), "SERVER host ANY 27000");
	}

	#[cfg(unix)]
	#[test]
	fn ensure_executable_sets_the_exec_bit() {
		use std::os::unix::fs::PermissionsExt;
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("mpm");
		std::fs::write(&path, "#!/bin/sh\n").unwrap();
		ensure_executable(&path).unwrap();
		assert_ne!(std::fs::metadata(&path).unwrap().permissions().mode() & 0o111, 0);
	}
}
