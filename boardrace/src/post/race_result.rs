use anyhow::Context;
use helpers::general::{argsort, SortOrder};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs::OpenOptions;
use std::path::Path;

/// CarResult contains the stats, the accumulated time (h) and the driven route of a car.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CarResult {
    pub car_id: usize,
    pub engine: u32,
    pub tires: u32,
    pub boost: u32,
    pub weight: u32,
    pub time: f64,
    pub route: Vec<usize>,
}

/// RaceResult contains all race information that is required for post-processing the results.
/// `finished` is false if the race was aborted, `winner` is only set for finished races.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RaceResult {
    pub seed: u64,
    pub no_locations: usize,
    pub finished: bool,
    pub winner: Option<usize>,
    pub car_results: Vec<CarResult>,
}

/// One line of the CSV export.
#[derive(Debug, Serialize)]
struct CsvResultRow {
    position: usize,
    car_id: usize,
    engine: u32,
    tires: u32,
    boost: u32,
    weight: u32,
    time_h: f64,
    route: String,
    winner: bool,
}

impl RaceResult {
    /// get_standings returns the car indices sorted by time, equal times keep the car order.
    pub fn get_standings(&self) -> Vec<usize> {
        let times: Vec<f64> = self.car_results.iter().map(|c| c.time).collect();
        argsort(&times, SortOrder::Ascending)
    }

    /// write_results_to_file writes the standings as CSV to the given path (parent directories
    /// are created) and returns the path.
    pub fn write_results_to_file(&self, path: &Path) -> anyhow::Result<String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create output directory {:?}!", parent))?;
        }
        let fh = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)
            .context(format!("Failed to open result file {:?} for writing!", path))?;

        let mut csv_writer = csv::Writer::from_writer(fh);
        for (position, &idx) in self.get_standings().iter().enumerate() {
            let car_result = &self.car_results[idx];
            csv_writer.serialize(CsvResultRow {
                position: position + 1,
                car_id: car_result.car_id,
                engine: car_result.engine,
                tires: car_result.tires,
                boost: car_result.boost,
                weight: car_result.weight,
                time_h: car_result.time,
                route: format_route(&car_result.route),
                winner: self.winner == Some(car_result.car_id),
            })
            .context("Failed to write results as CSV!")?;
        }
        csv_writer
            .flush()
            .context(format!("Failed to flush result file {:?}!", path))?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// format_results returns the standings table as printed to the console.
    pub fn format_results(&self) -> anyhow::Result<String> {
        let mut content = String::new();

        if self.finished {
            writeln!(&mut content, "RESULT: Race finished")?;
        } else {
            writeln!(
                &mut content,
                "RESULT: Race aborted before every car reached its end location"
            )?;
        }
        writeln!(
            &mut content,
            "seed {}, {} locations",
            self.seed, self.no_locations
        )?;
        writeln!(
            &mut content,
            "pos, car, engine, tires, boost, weight,     time, route"
        )?;

        for (position, &idx) in self.get_standings().iter().enumerate() {
            let c = &self.car_results[idx];
            writeln!(
                &mut content,
                "{:3}, {:3}, {:6}, {:5}, {:5}, {:6}, {:7.3}h, {}",
                position + 1,
                c.car_id,
                c.engine,
                c.tires,
                c.boost,
                c.weight,
                c.time,
                format_route(&c.route)
            )?;
        }

        if let Some(winner) = self.winner {
            writeln!(&mut content, "Car #{} WINS!", winner)?;
        }

        Ok(content)
    }

    /// print_results prints the resulting standings to the console output.
    pub fn print_results(&self) -> anyhow::Result<()> {
        print!("{}", self.format_results()?);
        Ok(())
    }
}

fn format_route(route: &[usize]) -> String {
    route
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<String>>()
        .join("-")
}
