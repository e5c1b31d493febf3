use std::fs;

use log::{error, info};

use formula_grid::errors::{CustomResult, Error};
use formula_grid::modules::helpers::config::GridConfig;
use formula_grid::modules::helpers::logging::setup_logging;
use formula_grid::{Archive, ArchiveData, Axis, DemonymTable, PuzzleConstructor, QuestionCatalogue};

fn read_file(path: &str) -> CustomResult<String> {
    fs::read_to_string(path).map_err(|e| Error::ArchiveReadError {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn load_archive(config: &GridConfig) -> CustomResult<Archive> {
    let path = config.archive_path.clone().ok_or(Error::InvalidConfigError {
        key: "ARCHIVE_PATH".to_string(),
        value: String::new(),
    })?;

    let data: ArchiveData = serde_json::from_str(&read_file(&path)?).map_err(|e| Error::ArchiveReadError {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let countries = match &config.demonyms_path {
        Some(demonyms) => DemonymTable::from_json(&read_file(demonyms)?)?,
        None => DemonymTable::new(),
    };

    Archive::build(data, &countries)
}

fn main() {
    let config = match GridConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return;
        }
    };
    if let Err(err) = setup_logging(&config.logging_level, config.log_file.as_deref()) {
        eprintln!("failed to setup logging: {}", err);
        return;
    }

    let archive = match load_archive(&config) {
        Ok(archive) => archive,
        Err(err) => {
            error!(target:"generate_puzzle", "failed loading the archive: {}", err);
            return;
        }
    };

    let catalogue = QuestionCatalogue::standard();
    let grid = match PuzzleConstructor::new(&archive, &catalogue).build(&config.request()) {
        Ok(grid) => grid,
        Err(err) => {
            error!(target:"generate_puzzle", "{}", err);
            return;
        }
    };

    info!(target:"generate_puzzle", "seed: {}", grid.seed());
    for column in 0..grid.column_count() {
        info!(target:"generate_puzzle", "column {}: {}", column + 1, grid.question_text(Axis::Column, column).unwrap_or_default());
    }
    for row in 0..grid.row_count() {
        info!(target:"generate_puzzle", "row {}: {}", row + 1, grid.question_text(Axis::Row, row).unwrap_or_default());
    }

    if let Some(solution) = grid.solution() {
        for (cell, driver) in solution {
            let answers = grid.reveal(cell.column, cell.row).map(|a| a.len()).unwrap_or(0);
            info!(target:"generate_puzzle", "{}: {} ({} possible answers)", cell, archive.driver(*driver), answers);
        }
    }
}
