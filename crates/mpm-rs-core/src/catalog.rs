//! # Product catalogs
//!
//! mpm expects `--products` to be told exactly which product identifiers to install,
//! and the valid identifiers differ per release and per platform. Products get added
//! over time and occasionally renamed or discontinued, so rather than one literal
//! list per (platform, release) pair the catalog is two tables keyed by release:
//! what became available starting at a release and what stopped being available
//! starting at a release. Resolving a release unions every addition up to it and
//! then subtracts every removal up to it.
//!
//! The tables are `const` data. Resolution allocates a fresh set per call and holds
//! no state, so it is safe to call from anywhere.

use std::collections::BTreeSet;

use crate::release::{Half, Release};
use crate::Platform;

type ProductList = &'static [&'static str];

const R2017B: Release = Release::new(2017, Half::B);
const R2018A: Release = Release::new(2018, Half::A);
const R2018B: Release = Release::new(2018, Half::B);
const R2019A: Release = Release::new(2019, Half::A);
const R2019B: Release = Release::new(2019, Half::B);
const R2020A: Release = Release::new(2020, Half::A);
const R2020B: Release = Release::new(2020, Half::B);
const R2021A: Release = Release::new(2021, Half::A);
const R2021B: Release = Release::new(2021, Half::B);
const R2022A: Release = Release::new(2022, Half::A);
const R2022B: Release = Release::new(2022, Half::B);
const R2023A: Release = Release::new(2023, Half::A);
const R2023B: Release = Release::new(2023, Half::B);

/// Everything installable at R2017b, the oldest release mpm can install.
/// Includes the old names of products renamed later (`Neural_Network_Toolbox`,
/// `Simulink_Requirements`, ...) which the removal table retires at the release
/// their replacement appears.
const BASE_R2017B: ProductList = &[
	"Aerospace_Blockset", "Aerospace_Toolbox", "Antenna_Toolbox", "Audio_System_Toolbox",
	"Automated_Driving_System_Toolbox", "Bioinformatics_Toolbox", "Communications_System_Toolbox",
	"Computer_Vision_System_Toolbox", "Control_System_Toolbox", "Curve_Fitting_Toolbox",
	"DSP_System_Toolbox", "Database_Toolbox", "Datafeed_Toolbox", "Econometrics_Toolbox",
	"Embedded_Coder", "Filter_Design_HDL_Coder", "Financial_Instruments_Toolbox",
	"Financial_Toolbox", "Fixed-Point_Designer", "Fuzzy_Logic_Toolbox", "GPU_Coder",
	"Global_Optimization_Toolbox", "HDL_Coder", "HDL_Verifier", "Image_Acquisition_Toolbox",
	"Image_Processing_Toolbox", "Instrument_Control_Toolbox", "LTE_HDL_Toolbox",
	"LTE_System_Toolbox", "MATLAB", "MATLAB_Coder", "MATLAB_Compiler", "MATLAB_Compiler_SDK",
	"MATLAB_Distributed_Computing_Server", "MATLAB_Production_Server", "MATLAB_Report_Generator",
	"Mapping_Toolbox", "Model_Predictive_Control_Toolbox", "Neural_Network_Toolbox",
	"Optimization_Toolbox", "Parallel_Computing_Toolbox", "Partial_Differential_Equation_Toolbox",
	"Phased_Array_System_Toolbox", "Polyspace_Bug_Finder", "Polyspace_Code_Prover",
	"Powertrain_Blockset", "RF_Blockset", "RF_Toolbox", "Risk_Management_Toolbox",
	"Robotics_System_Toolbox", "Robust_Control_Toolbox", "Signal_Processing_Toolbox",
	"SimBiology", "SimEvents", "Simscape", "Simscape_Driveline", "Simscape_Electronics",
	"Simscape_Fluids", "Simscape_Multibody", "Simscape_Power_Systems", "Simulink",
	"Simulink_3D_Animation", "Simulink_Check", "Simulink_Coder", "Simulink_Control_Design",
	"Simulink_Coverage", "Simulink_Design_Optimization", "Simulink_Design_Verifier",
	"Simulink_Report_Generator", "Simulink_Requirements", "Simulink_Test", "Stateflow",
	"Statistics_and_Machine_Learning_Toolbox", "Symbolic_Math_Toolbox",
	"System_Identification_Toolbox", "Text_Analytics_Toolbox", "Trading_Toolbox",
	"Vision_HDL_Toolbox", "WLAN_System_Toolbox", "Wavelet_Toolbox",
];

/// Products that became available starting at the keyed release.
const ADDITIONS: &[(Release, ProductList)] = &[
	(R2017B, BASE_R2017B),
	(R2018A, &[
		"Predictive_Maintenance_Toolbox", "Vehicle_Dynamics_Blockset", "Vehicle_Network_Toolbox",
	]),
	(R2018B, &[
		"5G_Toolbox", "Communications_Toolbox", "Deep_Learning_Toolbox", "LTE_Toolbox",
		"Sensor_Fusion_and_Tracking_Toolbox", "Simscape_Electrical", "WLAN_Toolbox",
	]),
	(R2019A, &[
		"AUTOSAR_Blockset", "Audio_Toolbox", "Automated_Driving_Toolbox", "Computer_Vision_Toolbox",
		"MATLAB_Parallel_Server", "Mixed-Signal_Blockset", "Polyspace_Bug_Finder_Server",
		"Polyspace_Code_Prover_Server", "Reinforcement_Learning_Toolbox", "SerDes_Toolbox",
		"SoC_Blockset", "System_Composer",
	]),
	(R2019B, &[
		"Navigation_Toolbox", "ROS_Toolbox", "Simulink_PLC_Coder",
	]),
	(R2020A, &[
		"MATLAB_Web_App_Server", "Motor_Control_Blockset", "Simulink_Compiler", "Wireless_HDL_Toolbox",
	]),
	(R2020B, &[
		"Deep_Learning_HDL_Toolbox", "Lidar_Toolbox", "Radar_Toolbox", "UAV_Toolbox",
	]),
	(R2021A, &[
		"DDS_Blockset", "Satellite_Communications_Toolbox",
	]),
	(R2021B, &[
		"RF_PCB_Toolbox", "Signal_Integrity_Toolbox",
	]),
	(R2022A, &[
		"Bluetooth_Toolbox", "DSP_HDL_Toolbox", "Industrial_Communication_Toolbox",
		"Requirements_Toolbox", "Simulink_Real-Time", "Wireless_Testbench",
	]),
	(R2022B, &[
		"Medical_Imaging_Toolbox", "Simscape_Battery",
	]),
	(R2023A, &[
		"C2000_Microcontroller_Blockset", "MATLAB_Test",
	]),
	(R2023B, &[
		"Polyspace_Test", "Simulink_Desktop_Real-Time", "Simulink_Fault_Analyzer",
	]),
];

/// Products that stopped being available starting at the keyed release, because
/// they were renamed (the new name appears in [`ADDITIONS`] under the same key)
/// or discontinued outright.
const REMOVALS: &[(Release, ProductList)] = &[
	(R2018B, &[
		"Communications_System_Toolbox", "LTE_System_Toolbox", "Neural_Network_Toolbox",
		"Simscape_Electronics", "Simscape_Power_Systems", "WLAN_System_Toolbox",
	]),
	(R2019A, &[
		"Audio_System_Toolbox", "Automated_Driving_System_Toolbox",
		"Computer_Vision_System_Toolbox", "MATLAB_Distributed_Computing_Server",
	]),
	(R2020A, &["LTE_HDL_Toolbox"]),
	(R2021A, &["Trading_Toolbox"]),
	(R2022A, &["Simulink_Requirements"]),
];

/// Products that require CUDA and therefore never ship on macOS.
const MAC_EXCLUSIONS: ProductList = &["GPU_Coder"];

/// The expansion of the `parallel_products` shorthand accepted at the product
/// prompt. Fixed regardless of release; on releases predating
/// `MATLAB_Parallel_Server` the expansion simply fails validation and the user
/// is re-prompted.
pub const PARALLEL_PRODUCTS: [&str; 3] = ["MATLAB", "Parallel_Computing_Toolbox", "MATLAB_Parallel_Server"];

/// The addition and removal tables for one platform.
///
/// The product tables themselves are shared across platforms; what varies per
/// platform is the supported release range and a short list of products that are
/// never available there.
#[derive(Debug)]
pub struct PlatformCatalog {
	platform: Platform,
	first_release: Release,
	last_release: Release,
	additions: &'static [(Release, ProductList)],
	removals: &'static [(Release, ProductList)],
	exclusions: ProductList,
}

const CATALOGS: &[PlatformCatalog] = &[
	PlatformCatalog {
		platform: Platform::Windows,
		first_release: R2017B,
		/* mpm does not support R2023b on Windows. */
		last_release: R2023A,
		additions: ADDITIONS,
		removals: REMOVALS,
		exclusions: &[],
	},
	PlatformCatalog {
		platform: Platform::Linux,
		first_release: R2017B,
		last_release: R2023B,
		additions: ADDITIONS,
		removals: REMOVALS,
		exclusions: &[],
	},
	PlatformCatalog {
		platform: Platform::MacX64,
		first_release: R2017B,
		last_release: R2023B,
		additions: ADDITIONS,
		removals: REMOVALS,
		exclusions: MAC_EXCLUSIONS,
	},
	PlatformCatalog {
		platform: Platform::MacArm,
		/* Apple silicon mpm only exists from R2023b. */
		first_release: R2023B,
		last_release: R2023B,
		additions: ADDITIONS,
		removals: REMOVALS,
		exclusions: MAC_EXCLUSIONS,
	},
];

pub fn catalog_for(platform: Platform) -> &'static PlatformCatalog {
	CATALOGS.iter().find(|c| c.platform == platform).expect("every platform has a catalog entry")
}

impl PlatformCatalog {
	pub fn platform(&self) -> Platform {
		self.platform
	}

	pub fn first_release(&self) -> Release {
		self.first_release
	}

	pub fn last_release(&self) -> Release {
		self.last_release
	}

	pub fn supports(&self, release: Release) -> bool {
		self.first_release <= release && release <= self.last_release
	}

	/// Every release this platform supports, oldest first.
	pub fn supported_releases(&self) -> Vec<Release> {
		let mut releases = Vec::new();
		let mut release = self.first_release;
		while release <= self.last_release {
			releases.push(release);
			release = release.next();
		}
		releases
	}

	/// Resolves the full set of installable product identifiers for a release.
	///
	/// All applicable additions are unioned in before any removal is applied, so
	/// the result does not depend on table order and a removal always wins over
	/// an addition at an earlier or equal release. Removing a product that was
	/// never added is a no-op.
	///
	/// # Errors
	/// - [`UnsupportedRelease`](crate::Error::UnsupportedRelease) when the release
	///   is outside this platform's supported range. Upstream prompt validation is
	///   expected to make this unreachable.
	pub fn resolve(&self, release: Release) -> crate::Result<BTreeSet<&'static str>> {
		if !self.supports(release) {
			return Err(crate::Error::UnsupportedRelease { platform: self.platform, release });
		}

		let mut products = BTreeSet::new();
		for (added_at, list) in self.additions {
			if *added_at <= release {
				products.extend(list.iter().copied());
			}
		}
		for (removed_at, list) in self.removals {
			if *removed_at <= release {
				for product in list.iter() {
					products.remove(product);
				}
			}
		}
		for product in self.exclusions {
			products.remove(product);
		}

		Ok(products)
	}
}

/// Returns the requested identifiers that are not in the catalog.
///
/// An empty result means the whole selection is installable. A non-empty result
/// is user input to re-prompt for, not an error.
pub fn validate_selection<'a>(requested: impl IntoIterator<Item = &'a str>, catalog: &BTreeSet<&'static str>) -> BTreeSet<String> {
	requested.into_iter()
		.filter(|product| !catalog.contains(*product))
		.map(|product| product.to_string())
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;

	fn rel(s: &str) -> Release { s.parse().unwrap() }

	fn all_platforms() -> [Platform; 4] {
		[Platform::Windows, Platform::Linux, Platform::MacX64, Platform::MacArm]
	}

	#[test]
	fn every_supported_pair_resolves_non_empty() {
		for platform in all_platforms() {
			let catalog = catalog_for(platform);
			for release in catalog.supported_releases() {
				assert!(!catalog.resolve(release).unwrap().is_empty(), "{} {}", platform, release);
			}
		}
	}

	#[test]
	fn products_only_disappear_through_a_removal() {
		for platform in all_platforms() {
			let catalog = catalog_for(platform);
			let releases = catalog.supported_releases();
			for pair in releases.windows(2) {
				let (r1, r2) = (pair[0], pair[1]);
				let before = catalog.resolve(r1).unwrap();
				let after = catalog.resolve(r2).unwrap();
				for lost in before.difference(&after) {
					let removed_in_window = REMOVALS.iter()
						.any(|(removed_at, list)| r1 < *removed_at && *removed_at <= r2 && list.contains(lost));
					assert!(removed_in_window, "{} vanished between {} and {} without a removal entry", lost, r1, r2);
				}
			}
		}
	}

	#[test]
	fn applicable_removals_never_survive_resolution() {
		for platform in all_platforms() {
			let catalog = catalog_for(platform);
			for release in catalog.supported_releases() {
				let resolved = catalog.resolve(release).unwrap();
				for (removed_at, list) in REMOVALS {
					if *removed_at <= release {
						for product in list.iter() {
							assert!(!resolved.contains(product), "{} resolved on {} {} despite removal at {}", product, platform, release, removed_at);
						}
					}
				}
			}
		}
	}

	#[test]
	fn every_removal_was_previously_added() {
		for (removed_at, list) in REMOVALS {
			for product in list.iter() {
				let added_before = ADDITIONS.iter()
					.any(|(added_at, added)| added_at < removed_at && added.contains(product));
				assert!(added_before, "{} removed at {} but never added before it", product, removed_at);
			}
		}
	}

	#[test]
	fn renames_add_the_new_name_at_the_removal_release() {
		/* Every removal key is also an addition key. Discontinued products make this
		 * vacuous for their entry but it holds for the observed tables. */
		for (removed_at, _) in REMOVALS {
			assert!(ADDITIONS.iter().any(|(added_at, _)| added_at == removed_at));
		}
	}

	#[test]
	fn resolve_is_idempotent() {
		let catalog = catalog_for(Platform::Linux);
		assert_eq!(catalog.resolve(rel("R2020b")).unwrap(), catalog.resolve(rel("R2020b")).unwrap());
	}

	#[test]
	fn resolve_rejects_out_of_range_releases() {
		assert!(matches!(catalog_for(Platform::Windows).resolve(rel("R2023b")), Err(crate::Error::UnsupportedRelease { .. })));
		assert!(matches!(catalog_for(Platform::MacArm).resolve(rel("R2023a")), Err(crate::Error::UnsupportedRelease { .. })));
		assert!(matches!(catalog_for(Platform::Linux).resolve(rel("R2017a")), Err(crate::Error::UnsupportedRelease { .. })));
	}

	#[test]
	fn oldest_release_excludes_later_additions() {
		let resolved = catalog_for(Platform::Linux).resolve(rel("R2017b")).unwrap();
		assert!(!resolved.contains("5G_Toolbox"));
		assert!(resolved.contains("Simulink_Requirements"));
		assert!(resolved.contains("Neural_Network_Toolbox"));
	}

	#[test]
	fn renamed_products_swap_at_the_rename_release() {
		let catalog = catalog_for(Platform::Windows);
		let before = catalog.resolve(rel("R2021b")).unwrap();
		let after = catalog.resolve(rel("R2022a")).unwrap();
		assert!(before.contains("Simulink_Requirements") && !before.contains("Requirements_Toolbox"));
		assert!(after.contains("Requirements_Toolbox") && !after.contains("Simulink_Requirements"));
	}

	#[test]
	fn windows_r2022a_includes_bluetooth() {
		assert!(catalog_for(Platform::Windows).resolve(rel("R2022a")).unwrap().contains("Bluetooth_Toolbox"));
	}

	#[test]
	fn macos_never_resolves_gpu_coder() {
		for platform in [Platform::MacX64, Platform::MacArm] {
			let catalog = catalog_for(platform);
			for release in catalog.supported_releases() {
				assert!(!catalog.resolve(release).unwrap().contains("GPU_Coder"));
			}
		}
		assert!(catalog_for(Platform::Linux).resolve(rel("R2023b")).unwrap().contains("GPU_Coder"));
	}

	#[test]
	fn full_catalog_validates_against_itself() {
		let catalog = catalog_for(Platform::Linux).resolve(rel("R2023b")).unwrap();
		assert!(validate_selection(catalog.iter().copied(), &catalog).is_empty());
	}

	#[test]
	fn unknown_products_are_reported_missing() {
		let catalog = catalog_for(Platform::Linux).resolve(rel("R2023b")).unwrap();
		let missing = validate_selection(["MATLAB", "NotAProduct"], &catalog);
		assert_eq!(missing, BTreeSet::from(["NotAProduct".to_string()]));
	}

	#[test]
	fn parallel_products_expansion_is_valid_on_recent_releases() {
		let catalog = catalog_for(Platform::Linux).resolve(rel("R2019a")).unwrap();
		assert!(validate_selection(PARALLEL_PRODUCTS, &catalog).is_empty());
	}

	#[test]
	fn parallel_products_expansion_fails_before_r2019a() {
		let catalog = catalog_for(Platform::Linux).resolve(rel("R2018b")).unwrap();
		assert_eq!(validate_selection(PARALLEL_PRODUCTS, &catalog), BTreeSet::from(["MATLAB_Parallel_Server".to_string()]));
	}
}
