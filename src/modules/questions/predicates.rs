use crate::macros::predicates::{career_threshold, season_threshold};
use crate::modules::helpers::general::Helpers;
use crate::modules::models::archive::Archive;
use crate::modules::models::driver::Driver;
use crate::modules::questions::question::Modifier;

/********** CAREER **********/
career_threshold!(championships, championships);
career_threshold!(wins, wins);
career_threshold!(podiums, podiums);
career_threshold!(poles, poles);
career_threshold!(points, points);
career_threshold!(entries, entries);
career_threshold!(seasons, seasons);
career_threshold!(sprint_wins, sprint_wins);

/********** SINGLE SEASON **********/
season_threshold!(season_wins, wins);
season_threshold!(season_podiums, podiums);
season_threshold!(season_poles, poles);
season_threshold!(season_points, points);

pub fn teams_driven_for(modifier: &Modifier, driver: &Driver, _archive: &Archive) -> bool {
    match modifier {
        Modifier::AtLeast(n) => driver.teams.len() >= *n as usize,
        _ => false,
    }
}

/********** DRIVER DATA **********/
pub fn nationality(modifier: &Modifier, driver: &Driver, _archive: &Archive) -> bool {
    match modifier {
        Modifier::Is(value) => Helpers::normalize_name(&driver.nationality) == Helpers::normalize_name(value),
        _ => false,
    }
}

/// drove for any team carrying the name, the archive may hold several
pub fn drove_for_team(modifier: &Modifier, driver: &Driver, archive: &Archive) -> bool {
    match modifier {
        Modifier::Is(name) => archive
            .teams_named(name)
            .iter()
            .any(|team| driver.drove_for(team.id)),
        _ => false,
    }
}

/********** SPECIAL **********/
pub fn won_from_pole(_modifier: &Modifier, driver: &Driver, archive: &Archive) -> bool {
    driver.all_entries().any(|entry| {
        archive
            .race(entry.race)
            .results_of(driver.id)
            .any(|(_, result)| result.grid == Some(1) && result.position == Some(1))
    })
}

/// won a race in the country the driver is from
pub fn won_at_home(_modifier: &Modifier, driver: &Driver, archive: &Archive) -> bool {
    let home = match &driver.home_country {
        Some(home) => home,
        None => return false,
    };

    driver.all_entries().any(|entry| {
        let race = archive.race(entry.race);
        archive.circuit(race.circuit).country == *home && race.winners().contains(&driver.id)
    })
}

pub fn teammate_of_champion(_modifier: &Modifier, driver: &Driver, archive: &Archive) -> bool {
    let champions = archive.champions();
    driver.teammates.iter().any(|mate| champions.contains(mate))
}

/// won a sprint and a race in the same season
pub fn sprint_and_race_winner(_modifier: &Modifier, driver: &Driver, _archive: &Archive) -> bool {
    driver
        .season_stats
        .values()
        .any(|season| season.wins > 0 && season.sprint_wins > 0)
}

pub fn any(_modifier: &Modifier, _driver: &Driver, _archive: &Archive) -> bool {
    true
}
