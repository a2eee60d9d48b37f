//! MATLAB release labels.
//!
//! Labels such as `R2023b` look like they sort correctly as plain strings but that
//! only holds for the range observed so far. `Release` parses the label into its
//! year and half so comparisons are always chronological, and keeps the string
//! form purely for display and (de)serialization at the boundary.

/// Which half of the year a release shipped in. `a` precedes `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Half {
	A,
	B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Release {
	/* Field order matters, the derived `Ord` compares year before half. */
	year: u16,
	half: Half,
}

impl Release {
	pub const fn new(year: u16, half: Half) -> Self {
		Self { year, half }
	}

	pub fn year(&self) -> u16 {
		self.year
	}

	pub fn half(&self) -> Half {
		self.half
	}

	/// The release immediately following this one.
	pub fn next(self) -> Release {
		match self.half {
			Half::A => Release::new(self.year, Half::B),
			Half::B => Release::new(self.year + 1, Half::A),
		}
	}
}

impl std::str::FromStr for Release {
	type Err = crate::Error;

	/// Parses labels of the form `R2023b`, case insensitively.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let parse_err = || crate::Error::Parse(format!("\"{}\" is not a release label such as \"R2023b\"", s));

		let rest = s.strip_prefix('R').or_else(|| s.strip_prefix('r')).ok_or_else(parse_err)?;
		if rest.len() != 5 || !rest.is_char_boundary(4) {
			return Err(parse_err());
		}

		let (year, half) = rest.split_at(4);
		let year = year.parse::<u16>().map_err(|_| parse_err())?;
		let half = match half {
			"a" | "A" => Half::A,
			"b" | "B" => Half::B,
			_ => return Err(parse_err()),
		};

		Ok(Release::new(year, half))
	}
}

impl std::fmt::Display for Release {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let half = match self.half {
			Half::A => 'a',
			Half::B => 'b',
		};
		write!(f, "R{}{}", self.year, half)
	}
}

impl serde::Serialize for Release {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> serde::Deserialize<'de> for Release {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = <String as serde::Deserialize>::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn rel(s: &str) -> Release { s.parse().unwrap() }

	#[test] fn release_halves_are_ordered() { assert!(rel("R2024a") < rel("R2024b")) }
	#[test] fn release_years_are_ordered() { assert!(rel("R2024b") < rel("R2025a")) }
	#[test] fn release_ordering_is_structured_not_lexical() { assert_eq!(rel("R2024a").cmp(&rel("R2025a")), Release::new(2024, Half::A).cmp(&Release::new(2025, Half::A))) }
	#[test] fn release_identical_are_eq() { assert_eq!(rel("R2020a"), Release::new(2020, Half::A)) }
	#[test] fn release_parse_is_case_insensitive() { assert_eq!(rel("r2019B"), Release::new(2019, Half::B)) }
	#[test] fn release_display_round_trips() { assert_eq!(rel("R2017b").to_string(), "R2017b") }
	#[test] fn release_next_crosses_year() { assert_eq!(rel("R2022b").next(), rel("R2023a")) }
	#[test] fn release_next_stays_in_year() { assert_eq!(rel("R2022a").next(), rel("R2022b")) }
	#[test] fn release_rejects_missing_prefix() { assert!("2023b".parse::<Release>().is_err()) }
	#[test] fn release_rejects_bad_half() { assert!("R2023c".parse::<Release>().is_err()) }
	#[test] fn release_rejects_short_year() { assert!("R202a".parse::<Release>().is_err()) }
	#[test] fn release_rejects_empty() { assert!("".parse::<Release>().is_err()) }
	#[test] fn release_serde_uses_string_form() { assert_eq!(serde_json::to_string(&rel("R2021b")).unwrap(), "\"R2021b\"") }
	#[test] fn release_serde_round_trips() { assert_eq!(serde_json::from_str::<Release>("\"R2021b\"").unwrap(), rel("R2021b")) }
}
