/// predicate on a career total: the driver reached at least the modifier
macro_rules! career_threshold {
    ( $name:ident, $field:ident ) => {
        pub fn $name(modifier: &Modifier, driver: &Driver, _archive: &Archive) -> bool {
            match modifier {
                Modifier::AtLeast(n) => driver.career.$field as f64 >= *n as f64,
                _ => false,
            }
        }
    };
}

/// predicate on a single season: in at least one season the driver reached the modifier
macro_rules! season_threshold {
    ( $name:ident, $field:ident ) => {
        pub fn $name(modifier: &Modifier, driver: &Driver, _archive: &Archive) -> bool {
            match modifier {
                Modifier::AtLeast(n) => driver.best_season(|s| s.$field as f64) >= *n as f64,
                _ => false,
            }
        }
    };
}

pub(crate) use career_threshold;
pub(crate) use season_threshold;
