//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("host platform is unrecognized")]
	UnknownPlatform,
	#[error("release {release} is not supported on {platform}")]
	UnsupportedRelease {
		platform: crate::Platform,
		release: crate::Release,
	},
	#[error("downloader failed: {0}")]
	Download(#[from] crate::installer::download::DownloadError),
	#[error("extraction failed: {0}")]
	Extract(#[from] crate::installer::extract::ExtractError),
	#[error("mpm launch failed: {0}")]
	Launch(#[from] crate::installer::LaunchError),
}
