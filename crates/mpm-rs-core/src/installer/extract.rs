//! Extracts the mpm archive on the platforms that ship one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("zip error: {0}")]
	Zip(#[from] zip::result::ZipError),
}

/// Where the archive contents are unpacked to.
pub fn get_mpm_contents_path(config: &crate::Config) -> std::path::PathBuf {
	config.download_dir().join("mpm-contents")
}

/// Unpacks the downloaded mpm archive into `mpm-contents`, replacing any
/// previous extraction. Only meaningful on platforms where
/// [`uses_archive`](crate::Platform::uses_archive) is true.
pub fn extract_mpm(config: &crate::Config) -> Result<std::path::PathBuf, ExtractError> {
	let archive_path = super::download::get_mpm_download_path(config);
	let contents_path = get_mpm_contents_path(config);

	if contents_path.exists() {
		log::debug!("Removing stale mpm-contents at {}", contents_path.display());
		std::fs::remove_dir_all(&contents_path)?;
	}
	std::fs::create_dir_all(&contents_path)?;

	log::info!("Extracting {} to {}", archive_path.display(), contents_path.display());
	let file = std::fs::File::open(&archive_path)?;
	let mut zip = zip::ZipArchive::new(file)?;
	zip.extract(&contents_path)?;

	Ok(contents_path)
}
