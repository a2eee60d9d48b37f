//! Downloads the mpm binary from MathWorks.

use thiserror::Error;

/// Errors that can occur while fetching mpm.
#[derive(Debug, Error)]
pub enum DownloadError {
	#[error("server returned status {0}")]
	BadStatus(reqwest::StatusCode),
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
}

/// Where the mpm artifact lands under the configured download directory.
/// On Windows and macOS this file is a zip archive despite the bare name,
/// matching what MathWorks serves.
pub fn get_mpm_download_path(config: &crate::Config) -> std::path::PathBuf {
	config.download_dir().join("mpm")
}

/// Downloads the mpm artifact for `platform` into the configured download directory.
///
/// # Parameters
/// - `config` - Required for the download directory.
/// - `platform` - Which platform's artifact to fetch.
/// - `force` - Overwrite an existing download.
///
/// # Returns
/// The path of the downloaded artifact.
pub async fn download_mpm(config: &crate::Config, platform: crate::Platform, force: bool) -> Result<std::path::PathBuf, DownloadError> {
	let download_path = get_mpm_download_path(config);
	if download_path.exists() && !force {
		log::info!("mpm already downloaded, skipping.");
		return Ok(download_path);
	}

	let url = platform.mpm_url();
	log::info!("Downloading mpm from {}", url);

	let response = reqwest::Client::new().get(&url).send().await?;
	if !response.status().is_success() {
		return Err(DownloadError::BadStatus(response.status()));
	}
	let content = response.bytes().await?.to_vec();

	tokio::fs::create_dir_all(download_path.with_file_name("")).await?;
	let mut download_file = tokio::fs::File::create(&download_path).await?;

	log::info!("Writing mpm download to disk: {}", download_path.display());
	tokio::io::copy(&mut content.as_slice(), &mut download_file).await?;

	Ok(download_path)
}
