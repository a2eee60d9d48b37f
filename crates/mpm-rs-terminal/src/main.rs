use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use mpm_rs_core::catalog;
use mpm_rs_core::catalog::PlatformCatalog;
use mpm_rs_core::installer;
use mpm_rs_core::Platform;
use mpm_rs_core::Release;

#[tokio::main]
async fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag("h", "help", "Show help");
		opts.optflag("v", "verbose", "Increased verbosity");

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m) => m,
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Interactive installer front-end for the MATLAB Package Manager."));
			return;
		}

		parsed_options
	};

	if parsed_options.opt_present("v") {
		env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
	} else {
		env_logger::init();
	}

	/* A Ctrl+C anywhere in the prompts should leave cleanly rather than panic a read. */
	tokio::spawn(async {
		if tokio::signal::ctrl_c().await.is_ok() {
			println!("\nExiting from user input...");
			std::process::exit(0);
		}
	});

	let platform = match Platform::host() {
		Ok(p) => p,
		Err(_) => {
			log::error!("Your operating system is unrecognized. Exiting.");
			return;
		}
	};
	log::debug!("Detected platform {}", platform);

	if matches!(platform, Platform::MacX64 | Platform::MacArm) {
		println!("mpm currently requires Gatekeeper to be disabled on macOS. Please disable it before continuing, if you haven't already.");
	}

	let mut config = mpm_rs_core::Config::load_from_disk().unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		mpm_rs_core::Config::default()
	});

	/* Get a runnable mpm, re-prompting for a directory on failure. */
	loop {
		choose_download_dir(&mut config);
		match acquire_mpm(&config, platform).await {
			Ok(_) => break,
			Err(e) => println!("Failed to set up mpm: {}. Please select a different directory.", e),
		}
	}

	let platform_catalog = catalog::catalog_for(platform);
	let release = choose_release(platform_catalog, &config);

	let resolved = match platform_catalog.resolve(release) {
		Ok(resolved) => resolved,
		Err(e) => {
			/* The release prompt only accepts supported releases so this is a bug. */
			log::error!("Failed to resolve product catalog: {}", e);
			return;
		}
	};

	let request = installer::InstallRequest {
		products: choose_products(&resolved),
		destination: choose_destination(platform, release),
		license_file: choose_license_file(),
		release,
	};

	match perform_install(&config, platform, &request).await {
		Ok(_) => println!("Installation complete."),
		Err(Error::UserCancelled) => println!("Installation cancelled."),
		Err(e) => log::error!("Error executing mpm: {}", e),
	}

	config.set_preferred_release(Some(release));
	if let Err(e) = config.save_to_disk() {
		log::warn!("Failed to save config file: {}", e);
	}
}

/// Reads one trimmed line, or `None` once the input is exhausted.
fn read_trimmed_line(reader: &mut impl std::io::BufRead) -> Option<String> {
	let mut input = String::new();
	match reader.read_line(&mut input) {
		Ok(0) | Err(_) => None,
		Ok(_) => Some(input.trim().to_string()),
	}
}

/// Prints `message`, reads one trimmed line. `exit`/`quit` anywhere leaves the
/// program, as does running out of piped input.
fn prompt(message: &str) -> String {
	print!("{}\n> ", message);
	let _ = std::io::stdout().flush();

	let input = match read_trimmed_line(&mut std::io::stdin().lock()) {
		Some(input) => input,
		None => {
			println!("\nExiting from user input...");
			std::process::exit(0);
		}
	};

	if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
		std::process::exit(0);
	}
	input
}

fn prompt_yes_no(message: &str) -> bool {
	loop {
		match prompt(message).to_lowercase().as_str() {
			"y" | "yes" => return true,
			"n" | "no" => return false,
			_ => println!("Invalid choice. Please enter either 'y' or 'n'."),
		}
	}
}

fn choose_download_dir(config: &mut mpm_rs_core::Config) {
	loop {
		let input = prompt(&format!(
			"Enter the path to the directory where you would like mpm to download to. Press Enter to use \"{}\"",
			config.download_dir().display()
		));
		if input.is_empty() {
			return;
		}

		let path = PathBuf::from(&input);
		if config.set_download_dir(path.clone()) {
			return;
		}

		if prompt_yes_no(&format!("The directory \"{}\" does not exist. Do you want to create it? (y/n)", path.display())) {
			match std::fs::create_dir_all(&path) {
				Ok(_) => {
					println!("Directory created successfully.");
					if config.set_download_dir(path) {
						return;
					}
				}
				Err(e) => println!("Failed to create the directory: {}. Please select a different directory.", e),
			}
		} else {
			println!("Directory creation skipped. Please select a different directory.");
		}
	}
}

/// Downloads and, where the artifact is an archive, extracts mpm, leaving a
/// runnable binary at the platform's executable path.
async fn acquire_mpm(config: &mpm_rs_core::Config, platform: Platform) -> mpm_rs_core::Result<()> {
	let download_path = installer::download::get_mpm_download_path(config);

	let overwrite = if download_path.exists() {
		config.overwrite_existing() || prompt_yes_no(
			"mpm already exists in this directory. Would you like to overwrite it? \
			This will also replace the \"mpm-contents\" directory if it exists. (y/n)",
		)
	} else {
		false
	};

	if !download_path.exists() || overwrite {
		println!("Beginning download of mpm. Please wait.");
		installer::download::download_mpm(config, platform, overwrite).await?;
		println!("mpm downloaded successfully.");
	} else {
		println!("Skipping download.");
	}

	if platform.uses_archive() {
		let contents_path = installer::extract::get_mpm_contents_path(config);
		if overwrite || !contents_path.exists() {
			println!("Beginning extraction of mpm.");
			installer::extract::extract_mpm(config)?;
			println!("mpm extracted successfully.");
		} else {
			println!("Skipping extraction.");
		}
	} else {
		installer::ensure_executable(platform.mpm_executable(config.download_dir()))?;
	}

	Ok(())
}

fn choose_release(platform_catalog: &PlatformCatalog, config: &mpm_rs_core::Config) -> Release {
	let default_release = config.preferred_release()
		.filter(|r| platform_catalog.supports(*r))
		.unwrap_or_else(|| platform_catalog.last_release());

	loop {
		let input = prompt(&format!("Enter which release you would like to install. Press Enter to select {}:", default_release));
		if input.is_empty() {
			return default_release;
		}

		match input.parse::<Release>() {
			Ok(release) if platform_catalog.supports(release) => return release,
			Ok(release) => println!(
				"{} is not supported on {}. Enter a release between {} and {}.",
				release,
				platform_catalog.platform(),
				platform_catalog.first_release(),
				platform_catalog.last_release()
			),
			Err(e) => println!("{}", e),
		}
	}
}

fn choose_products(resolved: &BTreeSet<&'static str>) -> Vec<String> {
	loop {
		let input = prompt(
			"Enter the products you would like to install, separated by spaces. \
			\"parallel_products\" is shorthand for MATLAB and its parallel computing products. \
			Press Enter to install all products.",
		);
		if input.is_empty() {
			return resolved.iter().map(|p| p.to_string()).collect();
		}

		let mut products: Vec<String> = Vec::new();
		for token in input.split_whitespace() {
			if token == "parallel_products" {
				products.extend(catalog::PARALLEL_PRODUCTS.iter().map(|p| p.to_string()));
			} else {
				products.push(token.to_string());
			}
		}

		let missing = catalog::validate_selection(products.iter().map(|s| s.as_str()), resolved);
		if missing.is_empty() {
			products.sort();
			products.dedup();
			return products;
		}

		/* The user may know better than the catalog tables, so an explicit selection
		 * can be forced through to mpm after a warning. */
		println!(
			"These products are not available for this release: {}",
			missing.into_iter().collect::<Vec<_>>().join(" ")
		);
		if prompt_yes_no("Pass your selection to mpm anyway? mpm will fail if it doesn't recognize a product. (y/n)") {
			products.sort();
			products.dedup();
			return products;
		}
	}
}

fn choose_destination(platform: Platform, release: Release) -> PathBuf {
	let default_path = platform.default_install_path(release);
	let input = prompt(&format!(
		"Enter the full path where you would like to install these products. Press Enter to install to \"{}\"",
		default_path.display()
	));
	if input.is_empty() {
		default_path
	} else {
		PathBuf::from(input)
	}
}

fn choose_license_file() -> Option<PathBuf> {
	loop {
		let input = prompt(
			"If you have a license file you'd like to include in your installation, \
			provide the full path to it. Press Enter to skip.",
		);
		if input.is_empty() {
			return None;
		}

		let path = PathBuf::from(&input);
		if !path.is_file() {
			println!("\"{}\" does not exist or is not a file.", path.display());
			continue;
		}
		if !installer::is_license_file(&path) {
			println!("Invalid file extension. Please provide a file with .dat or .lic extension.");
			continue;
		}
		return Some(path);
	}
}

async fn perform_install(config: &mpm_rs_core::Config, platform: Platform, request: &installer::InstallRequest) -> Result<(), Error> {
	println!("Installing {} products of {} to \"{}\".", request.products.len(), request.release, request.destination.display());
	if !prompt_yes_no("Start the installation? (y/n)") {
		return Err(Error::UserCancelled);
	}

	installer::run_install(config, platform, request).await?;
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("mpm-rs error: {0}")]
	Core(#[from] mpm_rs_core::Error),
	#[error("User cancelled an action")]
	UserCancelled,
}
