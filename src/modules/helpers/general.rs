use unicode_normalization::UnicodeNormalization;

pub struct Helpers {}

impl Helpers {
    /// # remove accents
    /// strip accents and other diacritics, e.g. "Räikkönen" becomes "Raikkonen"
    ///
    /// ## Arguments
    /// * `input` - the string to strip
    ///
    /// ## Returns
    /// * `String` - the ascii-only version of the input
    pub fn remove_accents(input: &str) -> String {
        input.nfkd().filter(|c| c.is_ascii()).collect()
    }

    /// # normalize a name
    /// lowercase, accent-free and with all whitespace runs collapsed to a single space.
    /// used as the key when names are compared
    ///
    /// ## Arguments
    /// * `input` - the name to normalize
    ///
    /// ## Returns
    /// * `String` - the normalized name
    pub fn normalize_name(input: &str) -> String {
        Helpers::remove_accents(input)
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<&str>>()
            .join(" ")
    }

    /// # normalize a country
    /// normalize a country name the same way as names, and map the short
    /// forms used by the archive to the full country name
    ///
    /// ## Arguments
    /// * `input` - the country as found in the archive
    ///
    /// ## Returns
    /// * `String` - the normalized country
    pub fn normalize_country(input: &str) -> String {
        let country = Helpers::normalize_name(input);
        match country.as_str() {
            "usa" => "united states".to_string(),
            "uk" => "united kingdom".to_string(),
            _ => country,
        }
    }
}
