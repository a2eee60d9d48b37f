//! Host platform detection and per-platform mpm locations.

use serde::*;

use crate::Release;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
	Windows,
	Linux,
	MacX64,
	MacArm,
}

impl Platform {
	/// Detects the platform this process is running on.
	///
	/// # Errors
	/// - [`UnknownPlatform`](crate::Error::UnknownPlatform) when the host is not
	///   one mpm publishes a binary for.
	pub fn host() -> crate::Result<Platform> {
		match (std::env::consts::OS, std::env::consts::ARCH) {
			("windows", _) => Ok(Platform::Windows),
			("linux", _) => Ok(Platform::Linux),
			("macos", "aarch64") => Ok(Platform::MacArm),
			("macos", _) => Ok(Platform::MacX64),
			_ => Err(crate::Error::UnknownPlatform),
		}
	}

	/// The architecture tag MathWorks uses in download URLs and archive layouts.
	pub fn arch_tag(&self) -> &'static str {
		match self {
			Platform::Windows => "win64",
			Platform::Linux => "glnxa64",
			Platform::MacX64 => "maci64",
			Platform::MacArm => "maca64",
		}
	}

	pub fn mpm_url(&self) -> String {
		format!("https://www.mathworks.com/mpm/{}/mpm", self.arch_tag())
	}

	/// Whether the downloaded artifact is a zip archive that needs extracting.
	/// Only the Linux artifact is a bare executable.
	pub fn uses_archive(&self) -> bool {
		!matches!(self, Platform::Linux)
	}

	pub fn default_install_path(&self, release: Release) -> std::path::PathBuf {
		match self {
			Platform::Windows => std::path::PathBuf::from(format!("C:\\Program Files\\MATLAB\\{}", release)),
			Platform::Linux => std::path::PathBuf::from(format!("/usr/local/MATLAB/{}", release)),
			Platform::MacX64 | Platform::MacArm => std::path::PathBuf::from(format!("/Applications/MATLAB_{}", release)),
		}
	}

	/// Where the runnable mpm ends up under `download_dir` once
	/// [`download`](crate::installer::download) and
	/// [`extract`](crate::installer::extract) have done their part.
	pub fn mpm_executable(&self, download_dir: impl AsRef<std::path::Path>) -> std::path::PathBuf {
		let download_dir = download_dir.as_ref();
		match self {
			Platform::Linux => download_dir.join("mpm"),
			Platform::Windows => download_dir.join("mpm-contents").join("bin").join(self.arch_tag()).join("mpm.exe"),
			Platform::MacX64 | Platform::MacArm => download_dir.join("mpm-contents").join("bin").join(self.arch_tag()).join("mpm"),
		}
	}
}

impl std::fmt::Display for Platform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Platform::Windows => "windows",
			Platform::Linux => "linux",
			Platform::MacX64 => "macos-x64",
			Platform::MacArm => "macos-arm",
		})
	}
}
