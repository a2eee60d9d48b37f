//! Persistent front-end options.

use serde::*;

use crate::Release;

/// Options remembered between runs.
///
/// Saved as JSON in the platform's config directory. Everything here is a
/// default the interactive prompts offer, never a hard setting.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
	download_dir: std::path::PathBuf,
	preferred_release: Option<Release>,
	overwrite_existing: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			download_dir: {
				#[cfg(target_os = "windows")]
				let path = std::path::PathBuf::from(std::env::var("TMP").expect("TMP missing."));

				#[cfg(not(target_os = "windows"))]
				let path = std::path::PathBuf::from("/tmp");

				path
			},
			preferred_release: None,
			overwrite_existing: false,
		}
	}
}

impl Config {
	pub fn download_dir(&self) -> &std::path::PathBuf {
		&self.download_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_download_dir(&mut self, download_dir: std::path::PathBuf) -> bool {
		if download_dir.is_dir() {
			self.download_dir = download_dir;
			true
		} else {
			false
		}
	}

	pub fn preferred_release(&self) -> Option<Release> {
		self.preferred_release
	}
	pub fn set_preferred_release(&mut self, release: Option<Release>) {
		self.preferred_release = release;
	}

	pub fn overwrite_existing(&self) -> bool {
		self.overwrite_existing
	}
	pub fn set_overwrite_existing(&mut self, overwrite_existing: bool) {
		self.overwrite_existing = overwrite_existing;
	}

	fn config_path() -> std::path::PathBuf {
		#[cfg(target_os = "windows")]
		let path = std::path::PathBuf::from(std::env::var("APPDATA").expect("APPDATA missing."));

		#[cfg(not(target_os = "windows"))]
		let path = if let Ok(e) = std::env::var("XDG_CONFIG_HOME") {
			std::path::PathBuf::from(e)
		} else {
			std::path::PathBuf::from(std::env::var("HOME").expect("HOME environment variable not set.")).join(".config")
		};

		path.join("mpm-rs").join("config.json")
	}

	/// Loads the config from its well known location.
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when opening or reading the file.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when deserializing the file.
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_file(Self::config_path())
	}

	pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path)?;
		Ok(serde_json::from_reader(file)?)
	}

	/// Saves the config to its well known location.
	///
	/// # Errors
	/// - [`IO`](crate::error::Error::IO) when creating the parent directory or the file.
	/// - [`SerdeJSON`](crate::error::Error::SerdeJSON) when serializing the file.
	pub fn save_to_disk(&self) -> crate::Result<()> {
		self.save_to_file(Self::config_path())
	}

	pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		std::fs::create_dir_all(path.with_file_name(""))?;
		let file = std::fs::File::create(path)?;
		serde_json::to_writer_pretty(file, self)?;
		Ok(())
	}
}
